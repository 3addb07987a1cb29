//! Contest platform session core.
//!
//! Stateless signed sessions: the primary runtime mints and verifies
//! tokens, the edge verifier checks them in the route guard, and handlers
//! can re-check roles with the role guard.

pub mod config;
pub mod directory;
pub mod error;
pub mod guard;
pub mod ocsf;
pub mod routes;
pub mod session;
pub mod types;

use axum::Router;
use axum::middleware::from_fn;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::directory::UserDirectory;
use crate::guard::{RouteGuard, RouteTable, route_guard};
use crate::session::cookie::CookiePolicy;
use crate::session::{EdgeVerifier, TokenAuthority};

/// Shared application state available to all route handlers.
pub struct AppState {
    pub config: Config,
    pub authority: TokenAuthority,
    pub edge: Arc<EdgeVerifier>,
    pub cookies: CookiePolicy,
    pub routes: Arc<RouteTable>,
    pub directory: UserDirectory,
}

impl AppState {
    /// Build both verifiers from the one resolved secret in `config`.
    pub fn new(config: Config, directory: UserDirectory) -> Self {
        let authority = TokenAuthority::new(&config.signing_secret);
        let edge = Arc::new(EdgeVerifier::new(&config.signing_secret));
        let cookies = CookiePolicy::new(config.secure_cookies());
        Self {
            config,
            authority,
            edge,
            cookies,
            routes: Arc::new(RouteTable::default()),
            directory,
        }
    }

    pub fn with_route_table(mut self, table: RouteTable) -> Self {
        self.routes = Arc::new(table);
        self
    }
}

/// Build the Axum router with the API routes only.
pub fn create_app(state: Arc<AppState>) -> Router {
    create_app_with(state, Router::new())
}

/// Build the Axum router, merging `pages` so they sit behind the route guard.
pub fn create_app_with(state: Arc<AppState>, pages: Router<Arc<AppState>>) -> Router {
    let guard = Arc::new(RouteGuard {
        verifier: state.edge.clone(),
        table: state.routes.clone(),
    });

    let auth_routes = Router::new()
        .route("/signin", axum::routing::post(routes::signin::sign_in))
        .route("/logout", axum::routing::post(routes::logout::logout))
        .route(
            "/session",
            axum::routing::get(routes::session::current_session),
        );

    Router::new()
        .route("/health", axum::routing::get(routes::health::health))
        .route(
            "/api/admin/overview",
            axum::routing::get(routes::admin::overview),
        )
        .nest("/api/auth", auth_routes)
        .merge(pages)
        .layer(from_fn(move |req, next| {
            let guard = guard.clone();
            route_guard(guard, req, next)
        }))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
