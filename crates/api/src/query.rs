//! Query parameter types for the catalog handlers.
//!
//! Paging values are clamped in the query builder, not here.

use manhwa_db::models::manhwa::{Genre, ManhwaFilter, ManhwaStatus};
use serde::Deserialize;

/// Listing parameters (`?page=&pageSize=&searchTerm=&genre=&status=`).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManhwaListParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub search_term: Option<String>,
    pub genre: Option<Genre>,
    pub status: Option<ManhwaStatus>,
}

impl From<ManhwaListParams> for ManhwaFilter {
    fn from(params: ManhwaListParams) -> Self {
        ManhwaFilter {
            page: params.page,
            page_size: params.page_size,
            search_term: params.search_term,
            genre: params.genre,
            status: params.status,
        }
    }
}

/// Size parameter for curated views (`?limit=`).
#[derive(Debug, Default, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}
