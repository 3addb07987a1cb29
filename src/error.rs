//! Application error types with Axum response mapping.
//!
//! Token failures never show up here with a reason: malformed, forged and
//! expired sessions all become `NotAuthenticated`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Authenticated, but the session's role is not allowed here.
    #[error("Forbidden")]
    Forbidden,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotAuthenticated | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = match &self {
            AppError::NotAuthenticated => json!({"error": "Not authenticated"}),
            AppError::Forbidden => json!({"error": "Forbidden"}),
            AppError::InvalidCredentials => json!({"error": "Invalid email or password"}),
            AppError::BadRequest(msg) | AppError::Internal(msg) => json!({"error": msg}),
        };

        (self.status(), axum::Json(body)).into_response()
    }
}
