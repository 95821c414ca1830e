//! Handlers for the `/manhwas` resource.

use axum::extract::{Path, Query, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderName, StatusCode};
use axum::Json;
use manhwa_core::catalog::ENTITY_NAME;
use manhwa_core::error::CoreError;
use manhwa_core::types::EntryId;
use manhwa_db::models::manhwa::{CreateManhwa, ManhwaPage, ManhwaResponse, UpdateManhwa};
use manhwa_db::repositories::ManhwaRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::query::{LimitParams, ManhwaListParams};
use crate::state::AppState;

fn not_found(id: EntryId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: ENTITY_NAME,
        id,
    })
}

/// POST /api/v1/manhwas
///
/// Responds 201 with the created entry and a `Location` header.
pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateManhwa>,
) -> AppResult<(StatusCode, [(HeaderName, String); 1], Json<ManhwaResponse>)> {
    input.validate()?;

    let manhwa = ManhwaRepo::create(&state.pool, &input).await?;

    tracing::info!(id = %manhwa.id, title = %manhwa.title, "Manhwa created");

    let location = format!("/api/v1/manhwas/{}", manhwa.id);
    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        Json(manhwa.into()),
    ))
}

/// GET /api/v1/manhwas
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ManhwaListParams>,
) -> AppResult<Json<ManhwaPage>> {
    let page = ManhwaRepo::list(&state.pool, &params.into()).await?;
    Ok(Json(page))
}

/// GET /api/v1/manhwas/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<EntryId>,
) -> AppResult<Json<ManhwaResponse>> {
    let manhwa = ManhwaRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(manhwa.into()))
}

/// PUT /api/v1/manhwas/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<EntryId>,
    JsonBody(input): JsonBody<UpdateManhwa>,
) -> AppResult<Json<ManhwaResponse>> {
    input.validate()?;

    let manhwa = ManhwaRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(id = %manhwa.id, "Manhwa updated");

    Ok(Json(manhwa.into()))
}

/// DELETE /api/v1/manhwas/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<EntryId>) -> AppResult<StatusCode> {
    let deleted = ManhwaRepo::soft_delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(%id, "Manhwa deactivated");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// GET /api/v1/manhwas/top-rated
pub async fn top_rated(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> AppResult<Json<ManhwaPage>> {
    let page = ManhwaRepo::top_rated(&state.pool, params.limit).await?;
    Ok(Json(page))
}

/// GET /api/v1/manhwas/recently-updated
pub async fn recently_updated(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> AppResult<Json<ManhwaPage>> {
    let page = ManhwaRepo::recently_updated(&state.pool, params.limit).await?;
    Ok(Json(page))
}
