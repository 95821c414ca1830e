//! Row-to-entity mapping for the `manhwas` table.
//!
//! Every column in [`crate::builder::COLUMNS`] is read by name with its exact
//! type. There is no partial-row tolerance: a missing or mistyped column
//! fails the whole row.

use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};

use crate::error::DbError;
use crate::models::manhwa::{Manhwa, ManhwaResponse};

impl<'r> FromRow<'r, PgRow> for Manhwa {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Manhwa {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            author: row.try_get("author")?,
            cover_image: row.try_get("cover_image")?,
            genres: row.try_get("genres")?,
            status: row.try_get("status")?,
            chapter_count: row.try_get("chapter_count")?,
            release_date: row.try_get("release_date")?,
            last_update: row.try_get("last_update")?,
            rating: row.try_get("rating")?,
            view_count: row.try_get("view_count")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// Convert a fetched row into a [`Manhwa`].
///
/// Any failure is reported as [`DbError::Mapping`].
pub fn row_to_manhwa(row: &PgRow) -> Result<Manhwa, DbError> {
    Manhwa::from_row(row).map_err(DbError::Mapping)
}

impl From<Manhwa> for ManhwaResponse {
    fn from(entry: Manhwa) -> Self {
        ManhwaResponse {
            id: entry.id,
            title: entry.title,
            description: entry.description,
            author: entry.author,
            cover_image: entry.cover_image,
            genres: entry.genres,
            status: entry.status,
            chapter_count: entry.chapter_count,
            release_date: entry.release_date,
            last_update: entry.last_update,
            rating: entry.rating,
            view_count: entry.view_count,
        }
    }
}
