//! GET /api/auth/session

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use std::sync::Arc;

use crate::error::AppError;
use crate::session::cookie::read_session_cookie;
use crate::types::SessionResponse;

/// Return the session user, or 401 without saying why the token failed.
pub async fn current_session(
    State(state): State<Arc<crate::AppState>>,
    headers: HeaderMap,
) -> Result<Json<SessionResponse>, AppError> {
    let user = read_session_cookie(&headers)
        .and_then(|token| state.authority.verify(token))
        .ok_or(AppError::NotAuthenticated)?;

    Ok(Json(SessionResponse { user }))
}
