//! Test utilities: fixture users, test app builder, request helpers.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use contest_auth::config::Config;
use contest_auth::directory::UserDirectory;
use contest_auth::session::cookie::SESSION_COOKIE_NAME;
use contest_auth::session::{Role, SessionUser};
use contest_auth::{AppState, create_app_with};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

pub const PASSWORD: &str = "hunter2-but-longer";

/// Body returned by every stub page handler.
pub const PAGE_REACHED: &str = "page reached";

pub fn user(role: Role) -> SessionUser {
    SessionUser {
        id: format!("{role}-id"),
        email: format!("{role}@example.com"),
        name: format!("Test {role}"),
        role,
        avatar: None,
    }
}

/// Directory with one account per role, all sharing [`PASSWORD`].
pub fn directory() -> UserDirectory {
    Role::ALL
        .into_iter()
        .fold(UserDirectory::new(), |dir, role| {
            let u = user(role);
            dir.with_user(u.email.clone(), PASSWORD, u)
        })
}

/// Stand-ins for the page handlers that live outside this crate.
pub fn pages() -> Router<Arc<AppState>> {
    async fn page() -> &'static str {
        PAGE_REACHED
    }

    Router::new()
        .route("/", get(page))
        .route("/auth/signin", get(page))
        .route("/unauthorized", get(page))
        .route("/dashboard", get(page))
        .route("/admin/dashboard", get(page))
        .route("/voter/ballot", get(page))
        .route("/contestant/profile", get(page))
        .route("/api/voter/ballot", get(page))
}

/// Build the full app with the default route table and stub pages.
pub fn build_test_app() -> (Router, Arc<AppState>) {
    build_test_app_with_config(Config::test_default())
}

pub fn build_test_app_with_config(config: Config) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(config, directory()));
    let app = create_app_with(state.clone(), pages());
    (app, state)
}

/// Helper to read response body as JSON.
pub async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

pub async fn body_text(response: axum::response::Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// GET with the session cookie set to `token`.
pub fn get_with_session(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("Cookie", format!("{SESSION_COOKIE_NAME}={token}"))
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

/// Extract the session cookie value from a response's `Set-Cookie` header.
pub fn session_cookie_value(response: &axum::response::Response) -> Option<String> {
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|s| {
            s.split(';')
                .next()
                .and_then(|c| c.strip_prefix(&format!("{SESSION_COOKIE_NAME}=")))
                .map(String::from)
        })
}

/// Sign in through POST /api/auth/signin and return the issued token.
pub async fn sign_in(app: &Router, role: Role) -> String {
    let req = post_json(
        "/api/auth/signin",
        &json!({"email": user(role).email, "password": PASSWORD}),
    );
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    session_cookie_value(&response).expect("sign-in sets the session cookie")
}

pub fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}
