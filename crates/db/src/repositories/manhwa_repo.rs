//! Repository for the `manhwas` table.
//!
//! Every operation acquires its own pooled connection and returns it when
//! the call finishes, on success or failure. No transaction spans a call:
//! a page's count and rows are read as two independent statements.

use chrono::Utc;
use manhwa_core::types::EntryId;
use sqlx::{PgConnection, PgPool};

use crate::builder::{self, CuratedView, PageQuery, Statement, COLUMNS};
use crate::error::DbError;
use crate::mapper::row_to_manhwa;
use crate::models::manhwa::{
    CreateManhwa, Manhwa, ManhwaFilter, ManhwaPage, ManhwaResponse, UpdateManhwa,
};

/// Provides the catalog operations for manhwa entries.
pub struct ManhwaRepo;

impl ManhwaRepo {
    /// Insert a new active entry with a fresh id, returning the created row.
    ///
    /// Rating and view count start at 0; `created_at` and `last_update` are
    /// the same instant.
    pub async fn create(pool: &PgPool, input: &CreateManhwa) -> Result<Manhwa, DbError> {
        let stmt = builder::build_insert(EntryId::new_v4(), input, Utc::now());
        let mut conn = pool.acquire().await?;
        fetch_optional(&mut conn, &stmt)
            .await?
            .ok_or(DbError::NoRowReturned("insert"))
    }

    /// Find an active entry by id. Soft-deleted rows are never returned.
    pub async fn find_by_id(pool: &PgPool, id: EntryId) -> Result<Option<Manhwa>, DbError> {
        let stmt = Statement {
            sql: format!("SELECT {COLUMNS} FROM manhwas WHERE id = $1 AND is_active = TRUE"),
            binds: vec![builder::BindValue::Id(id)],
        };
        let mut conn = pool.acquire().await?;
        fetch_optional(&mut conn, &stmt).await
    }

    /// List active entries matching the filter, newest update first.
    pub async fn list(pool: &PgPool, filter: &ManhwaFilter) -> Result<ManhwaPage, DbError> {
        let query = builder::build_list_query(filter);
        let mut conn = pool.acquire().await?;
        fetch_page(&mut conn, &query).await
    }

    /// Apply a sparse update to an active entry.
    ///
    /// Returns `None` if no active row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: EntryId,
        input: &UpdateManhwa,
    ) -> Result<Option<Manhwa>, DbError> {
        let stmt = builder::build_update(id, input, Utc::now());
        let mut conn = pool.acquire().await?;
        fetch_optional(&mut conn, &stmt).await
    }

    /// Soft-delete an entry. Returns `true` if an active row was deactivated.
    pub async fn soft_delete(pool: &PgPool, id: EntryId) -> Result<bool, DbError> {
        let mut conn = pool.acquire().await?;
        let result =
            sqlx::query("UPDATE manhwas SET is_active = FALSE WHERE id = $1 AND is_active = TRUE")
                .bind(id)
                .execute(&mut *conn)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Highest-rated active entries (ties by view count), as page 1.
    pub async fn top_rated(pool: &PgPool, limit: Option<i64>) -> Result<ManhwaPage, DbError> {
        let query = builder::build_curated_query(CuratedView::TopRated, limit);
        let mut conn = pool.acquire().await?;
        fetch_page(&mut conn, &query).await
    }

    /// Most recently updated active entries, as page 1.
    pub async fn recently_updated(
        pool: &PgPool,
        limit: Option<i64>,
    ) -> Result<ManhwaPage, DbError> {
        let query = builder::build_curated_query(CuratedView::RecentlyUpdated, limit);
        let mut conn = pool.acquire().await?;
        fetch_page(&mut conn, &query).await
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

async fn fetch_optional(
    conn: &mut PgConnection,
    stmt: &Statement,
) -> Result<Option<Manhwa>, DbError> {
    let row = sqlx::query_with(&stmt.sql, stmt.arguments()?)
        .fetch_optional(&mut *conn)
        .await?;
    row.as_ref().map(row_to_manhwa).transpose()
}

async fn fetch_page(conn: &mut PgConnection, query: &PageQuery) -> Result<ManhwaPage, DbError> {
    let total_count: i64 = sqlx::query_scalar_with(&query.count.sql, query.count.arguments()?)
        .fetch_one(&mut *conn)
        .await?;

    let rows = sqlx::query_with(&query.page.sql, query.page.arguments()?)
        .fetch_all(&mut *conn)
        .await?;

    let items = rows
        .iter()
        .map(|row| row_to_manhwa(row).map(ManhwaResponse::from))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        total_count,
        returned = items.len(),
        page_number = query.page_number,
        page_size = query.page_size,
        "Fetched catalog page"
    );

    Ok(ManhwaPage {
        items,
        total_count,
        page_number: query.page_number,
        page_size: query.page_size,
    })
}
