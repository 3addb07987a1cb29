//! Handler-level role guard.
//!
//! Independent of the route guard: re-verifies the cookie with the primary
//! verifier so a handler stays protected however it is reached.

use axum::http::HeaderMap;

use crate::error::AppError;
use crate::ocsf;
use crate::session::cookie::read_session_cookie;
use crate::session::{Role, SessionUser, TokenAuthority};

/// Resolve the session user and check it against `allowed`.
///
/// No valid session -> [`AppError::NotAuthenticated`] (401); valid session
/// with another role -> [`AppError::Forbidden`] (403).
pub fn require_role(
    authority: &TokenAuthority,
    headers: &HeaderMap,
    allowed: &[Role],
) -> Result<SessionUser, AppError> {
    let user = read_session_cookie(headers)
        .and_then(|token| authority.verify(token))
        .ok_or(AppError::NotAuthenticated)?;

    if !allowed.contains(&user.role) {
        ocsf::access_event(
            "role_guard",
            "handler",
            "deny",
            &format!("role {} not in allowed set", user.role),
            Some(&user.email),
        );
        return Err(AppError::Forbidden);
    }

    Ok(user)
}
