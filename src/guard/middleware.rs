//! Axum route guard middleware.
//!
//! Runs before every handler: reads the session cookie, verifies it with
//! the edge verifier, and applies the [`RouteTable`]. Page requests are
//! redirected; API requests get a 401/403 JSON body instead.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use std::sync::Arc;

use super::routes::{GuardDecision, RouteTable};
use crate::error::AppError;
use crate::ocsf;
use crate::session::EdgeVerifier;
use crate::session::cookie::read_session_cookie;

/// Route guard configuration.
pub struct RouteGuard {
    pub verifier: Arc<EdgeVerifier>,
    pub table: Arc<RouteTable>,
}

/// Axum middleware function for route-level access control.
pub async fn route_guard(guard: Arc<RouteGuard>, req: Request, next: Next) -> Response {
    let user = match read_session_cookie(req.headers()) {
        Some(token) => guard.verifier.verify(token).await,
        None => None,
    };

    let path = req.uri().path().to_owned();
    let table = &guard.table;

    match table.decide(&path, user.as_ref()) {
        GuardDecision::Allow => next.run(req).await,
        GuardDecision::SignIn => {
            if table.is_api(&path) {
                return AppError::NotAuthenticated.into_response();
            }
            Redirect::temporary(&sign_in_location(table, &path)).into_response()
        }
        GuardDecision::Denied => {
            let role = user.as_ref().map(|u| u.role.as_str()).unwrap_or_default();
            ocsf::access_event(
                "route_guard",
                &path,
                "deny",
                &format!("role {role} not permitted"),
                user.as_ref().map(|u| u.email.as_str()),
            );
            if table.is_api(&path) {
                return AppError::Forbidden.into_response();
            }
            Redirect::temporary(table.access_denied_path()).into_response()
        }
    }
}

/// Sign-in URL carrying the originally requested path.
fn sign_in_location(table: &RouteTable, path: &str) -> String {
    format!(
        "{}?callbackUrl={}",
        table.sign_in_path(),
        urlencoding::encode(path)
    )
}
