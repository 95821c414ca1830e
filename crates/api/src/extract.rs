//! Request extractors that report rejections in the `{ error, code }` shape.

use axum::extract::FromRequest;

use crate::error::AppError;

/// JSON request body whose rejections become [`AppError`] validation errors
/// instead of axum's plain-text 4xx responses.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);
