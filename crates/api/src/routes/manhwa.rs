//! Route definitions for the `/manhwas` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::manhwa;
use crate::state::AppState;

/// Routes mounted at `/manhwas`.
///
/// ```text
/// GET    /                      -> list
/// POST   /                      -> create
/// GET    /top-rated             -> top_rated
/// GET    /recently-updated      -> recently_updated
/// GET    /{id}                  -> get_by_id
/// PUT    /{id}                  -> update
/// DELETE /{id}                  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(manhwa::list).post(manhwa::create))
        .route("/top-rated", get(manhwa::top_rated))
        .route("/recently-updated", get(manhwa::recently_updated))
        .route(
            "/{id}",
            get(manhwa::get_by_id)
                .put(manhwa::update)
                .delete(manhwa::delete),
        )
}
