//! # Error Handling Middleware
//!
//! Maps [`EpgError`] onto HTTP status codes and JSON error bodies so every
//! handler reports failures the same way.
//!
//! Database and internal failures are logged here and reach the caller only
//! as a generic `Internal server error`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use epg_core::errors::EpgError;
use serde_json::json;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps [`EpgError`] and implements `IntoResponse`, so handlers
/// can return `Result<Json<T>, AppError>` and use `?` on both domain and
/// repository results.
///
/// # Example
///
/// ```
/// use axum::Json;
/// use epg_api::middleware::error_handling::AppError;
/// use epg_core::errors::EpgError;
///
/// async fn handler(found: bool) -> Result<Json<&'static str>, AppError> {
///     if !found {
///         return Err(AppError(EpgError::NotFound("Channel not found".to_string())));
///     }
///     Ok(Json("ok"))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub EpgError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            EpgError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            EpgError::NotFound(_) => StatusCode::NOT_FOUND,
            EpgError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            EpgError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            EpgError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = if self.0.is_unexpected() {
            error!(error = ?self.0, "Request failed unexpectedly");
            "Internal server error".to_string()
        } else {
            self.0.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<EpgError> for AppError {
    fn from(err: EpgError) -> Self {
        AppError(err)
    }
}

/// Repository failures surface as [`EpgError::Database`].
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(EpgError::Database(err))
    }
}
