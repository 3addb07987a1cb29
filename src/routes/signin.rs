//! POST /api/auth/signin

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::error::AppError;
use crate::ocsf;
use crate::types::{SignInRequest, SignInResponse};

/// Check credentials against the directory, mint a session token and set
/// the session cookie.
pub async fn sign_in(
    State(state): State<Arc<crate::AppState>>,
    Json(body): Json<SignInRequest>,
) -> Result<Response, AppError> {
    let email = body.email.trim();
    if email.is_empty() || body.password.is_empty() {
        return Err(AppError::BadRequest("Missing email or password".into()));
    }

    let Some(user) = state.directory.authenticate(email, &body.password) else {
        ocsf::authentication_event(
            ocsf::ACTIVITY_LOGON,
            "Logon",
            ocsf::STATUS_FAILURE,
            ocsf::SEVERITY_MEDIUM,
            Some(email),
            ocsf::AUTH_PROTOCOL_PASSWORD,
            "Password",
            "Sign-in rejected",
        );
        return Err(AppError::InvalidCredentials);
    };

    let token = state.authority.create_token(&user);

    ocsf::authentication_event(
        ocsf::ACTIVITY_LOGON,
        "Logon",
        ocsf::STATUS_SUCCESS,
        ocsf::SEVERITY_INFORMATIONAL,
        Some(&user.email),
        ocsf::AUTH_PROTOCOL_PASSWORD,
        "Password",
        &format!("Session issued for role {}", user.role),
    );

    let mut response = Json(SignInResponse {
        success: true,
        user,
    })
    .into_response();
    state.cookies.attach(&mut response, &token);
    Ok(response)
}
