//! GET /api/admin/overview

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use std::sync::Arc;

use crate::error::AppError;
use crate::guard::require_role;
use crate::session::Role;
use crate::types::GuardedResponse;

/// Admin-only endpoint, checked by the role guard on top of the route guard.
pub async fn overview(
    State(state): State<Arc<crate::AppState>>,
    headers: HeaderMap,
) -> Result<Json<GuardedResponse>, AppError> {
    let user = require_role(&state.authority, &headers, &[Role::Admin])?;
    Ok(Json(GuardedResponse { ok: true, user }))
}
