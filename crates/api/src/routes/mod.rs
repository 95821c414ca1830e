pub mod manhwa;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /manhwas                          list, create
/// /manhwas/top-rated                highest rated entries
/// /manhwas/recently-updated         most recently updated entries
/// /manhwas/{id}                     get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/manhwas", manhwa::router())
}
