//! Manhwa catalog entity model and DTOs.
//!
//! JSON payloads use camelCase field names; enum values are snake_case
//! strings matching the PostgreSQL enum labels.

use manhwa_core::types::{Date, EntryId, Timestamp};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// Publication status, stored as the `manhwa_status` enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "manhwa_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ManhwaStatus {
    Ongoing,
    Completed,
    Hiatus,
    Cancelled,
}

/// Genre tag, stored as elements of a `manhwa_genre[]` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "manhwa_genre", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Genre {
    Action,
    Adventure,
    Comedy,
    Drama,
    Fantasy,
    Horror,
    Mystery,
    Romance,
    SciFi,
    SliceOfLife,
    Sports,
    Supernatural,
    Thriller,
    Historical,
    MartialArts,
    School,
    Isekai,
}

/// Drop repeated genres, keeping the first occurrence of each.
pub fn dedup_genres(genres: &[Genre]) -> Vec<Genre> {
    let mut out = Vec::with_capacity(genres.len());
    for genre in genres {
        if !out.contains(genre) {
            out.push(*genre);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `manhwas` table.
///
/// Built from rows by [`crate::mapper::row_to_manhwa`].
#[derive(Debug, Clone, PartialEq)]
pub struct Manhwa {
    pub id: EntryId,
    pub title: String,
    pub description: String,
    pub author: String,
    pub cover_image: String,
    pub genres: Vec<Genre>,
    pub status: ManhwaStatus,
    pub chapter_count: i32,
    pub release_date: Date,
    pub last_update: Timestamp,
    pub rating: f64,
    pub view_count: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

/// External-facing projection of [`Manhwa`].
///
/// Omits the soft-delete flag and the bookkeeping timestamps.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManhwaResponse {
    pub id: EntryId,
    pub title: String,
    pub description: String,
    pub author: String,
    pub cover_image: String,
    pub genres: Vec<Genre>,
    pub status: ManhwaStatus,
    pub chapter_count: i32,
    pub release_date: Date,
    pub last_update: Timestamp,
    pub rating: f64,
    pub view_count: i32,
}

/// Page envelope returned by listing and curated views.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManhwaPage {
    pub items: Vec<ManhwaResponse>,
    /// Number of active rows matching the filter, independent of paging.
    pub total_count: i64,
    pub page_number: i64,
    pub page_size: i64,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for creating a new catalog entry.
///
/// Text fields default to empty strings; `title` must not be blank.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateManhwa {
    #[serde(default)]
    #[validate(
        length(min = 1, max = 500, message = "title must be 1-500 characters"),
        custom(function = "not_blank")
    )]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    #[validate(length(max = 255, message = "author must be at most 255 characters"))]
    pub author: String,
    #[serde(default)]
    #[validate(length(max = 2048, message = "coverImage must be at most 2048 characters"))]
    pub cover_image: String,
    #[serde(default)]
    pub genres: Vec<Genre>,
    pub status: ManhwaStatus,
    #[serde(default)]
    #[validate(range(min = 0, message = "chapterCount must not be negative"))]
    pub chapter_count: i32,
    pub release_date: Date,
}

/// DTO for a sparse update. All fields are optional.
///
/// Text fields and `genres` count as provided only when non-empty, so an
/// update cannot clear them. `status` and `chapter_count` count as provided
/// whenever present, including `0`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateManhwa {
    #[validate(
        length(max = 500, message = "title must be at most 500 characters"),
        custom(function = "not_whitespace_only")
    )]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(length(max = 255, message = "author must be at most 255 characters"))]
    pub author: Option<String>,
    #[validate(length(max = 2048, message = "coverImage must be at most 2048 characters"))]
    pub cover_image: Option<String>,
    pub genres: Option<Vec<Genre>>,
    pub status: Option<ManhwaStatus>,
    #[validate(range(min = 0, message = "chapterCount must not be negative"))]
    pub chapter_count: Option<i32>,
}

/// Filter and paging parameters for listing.
///
/// Paging values are clamped by the query builder.
#[derive(Debug, Clone, Default)]
pub struct ManhwaFilter {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub search_term: Option<String>,
    pub genre: Option<Genre>,
    pub status: Option<ManhwaStatus>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("title must not be blank".into()));
    }
    Ok(())
}

/// An empty title means "not provided" on update; only whitespace is rejected.
fn not_whitespace_only(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    not_blank(value)
}
