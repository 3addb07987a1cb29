//! Shared request/response DTOs.

use serde::{Deserialize, Serialize};

use crate::session::SessionUser;

/// POST /api/auth/signin request body.
#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// POST /api/auth/signin response.
#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub success: bool,
    pub user: SessionUser,
}

/// GET /api/auth/session response.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: SessionUser,
}

/// Response for handlers gated by the role guard.
#[derive(Debug, Serialize)]
pub struct GuardedResponse {
    pub ok: bool,
    pub user: SessionUser,
}

/// GET /health response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub environment: String,
}

/// Generic success response.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}
