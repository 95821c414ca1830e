use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use manhwa_core::error::CoreError;
use manhwa_db::DbError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`DbError`] for data-access
/// failures. Implements [`IntoResponse`] to produce consistent JSON error
/// responses of the form `{ "error": ..., "code": ... }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `manhwa_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A data-access error from `manhwa_db`.
    #[error(transparent)]
    Database(#[from] DbError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Core(CoreError::Validation(errors.to_string()))
    }
}

/// Unreadable bodies, missing required fields and unknown enum labels are
/// all reported as validation failures.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Core(CoreError::Validation(rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
            },

            // --- DbError variants ---
            AppError::Database(db) => match db {
                DbError::Mapping(err) => {
                    tracing::error!(error = %err, "Row mapping failed");
                    internal("MAPPING_ERROR")
                }
                DbError::Persistence(err) => {
                    tracing::error!(error = %err, "Database error");
                    internal("PERSISTENCE_ERROR")
                }
                DbError::NoRowReturned(op) => {
                    tracing::error!(operation = %op, "Statement returned no row");
                    internal("PERSISTENCE_ERROR")
                }
            },
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// A 500 with a sanitized message and the given code.
fn internal(code: &'static str) -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        code,
        "An internal error occurred".to_string(),
    )
}
