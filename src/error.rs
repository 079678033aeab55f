use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::db::DatabaseError;
use crate::scheduling::Rejection;

#[derive(Debug, Error)]
pub enum AppError {
    /// A declined booking. Expected outcome, surfaced to the caller with the
    /// rejection message verbatim and never logged as a system error.
    #[error(transparent)]
    Rejected(#[from] Rejection),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Rejected(rejection) => {
                tracing::debug!(kind = ?rejection.kind(), "booking declined: {rejection}");
                let body = Json(json!({
                    "error": rejection.to_string(),
                    "kind": rejection.kind(),
                }));
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            AppError::Database(DatabaseError::NotFound) => {
                not_found_response("Resource not found")
            }
            AppError::NotFound(ref message) => not_found_response(message),
            AppError::Validation(message) => {
                let body = Json(json!({ "error": message }));
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            AppError::Database(ref err) => {
                tracing::error!("database failure: {err}");
                internal_error_response()
            }
            AppError::InternalServerError(ref message) => {
                tracing::error!("internal error: {message}");
                internal_error_response()
            }
        }
    }
}

fn not_found_response(message: &str) -> Response {
    let body = Json(json!({ "error": message }));
    (StatusCode::NOT_FOUND, body).into_response()
}

fn internal_error_response() -> Response {
    let body = Json(json!({ "error": "An internal server error occurred" }));
    (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
}

pub type AppResult<T> = Result<T, AppError>;
