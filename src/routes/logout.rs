//! POST /api/auth/logout

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::ocsf;
use crate::session::cookie::read_session_cookie;
use crate::types::SuccessResponse;

/// Clear the session cookie.
///
/// Nothing is invalidated server-side: a copy of the old token keeps
/// verifying until it expires.
pub async fn logout(State(state): State<Arc<crate::AppState>>, headers: HeaderMap) -> Response {
    // Best-effort extraction for the audit record
    let email = read_session_cookie(&headers)
        .and_then(|token| state.authority.verify(token))
        .map(|user| user.email);

    let mut response = Json(SuccessResponse { success: true }).into_response();
    state.cookies.clear(&mut response);

    let (proto, proto_name) = if email.is_some() {
        (ocsf::AUTH_PROTOCOL_PASSWORD, "Password")
    } else {
        (ocsf::AUTH_PROTOCOL_UNKNOWN, "Unknown")
    };
    ocsf::authentication_event(
        ocsf::ACTIVITY_LOGOFF,
        "Logoff",
        ocsf::STATUS_SUCCESS,
        ocsf::SEVERITY_INFORMATIONAL,
        email.as_deref(),
        proto,
        proto_name,
        "User logged out",
    );

    response
}
