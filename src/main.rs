//! Session core server entrypoint.
//!
//! Configuration errors (notably a missing `SESSION_SECRET` in production)
//! stop the process before it binds a socket.

use std::env;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt};

use contest_auth::config::{Config, Environment};
use contest_auth::directory::UserDirectory;
use contest_auth::{AppState, create_app};

#[tokio::main]
async fn main() -> ExitCode {
    let production = Environment::parse(env::var("APP_ENV").ok().as_deref()).is_production();

    // Load .env for local dev only
    if !production {
        let _ = dotenvy::dotenv();
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if env::var("LOG_FORMAT").is_ok_and(|v| v == "json") {
        fmt().json().with_env_filter(filter).init();
    } else {
        fmt().with_env_filter(filter).init();
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Refusing to start: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let directory = match &config.directory_file {
        Some(path) => match UserDirectory::load(path) {
            Ok(dir) => {
                tracing::info!("Loaded {} directory entries from {}", dir.len(), path.display());
                dir
            }
            Err(e) => {
                tracing::error!("Refusing to start: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => {
            tracing::warn!("DIRECTORY_FILE not set, every sign-in will be rejected");
            UserDirectory::new()
        }
    };

    let port = config.port;
    tracing::info!("Environment: {}", config.environment.as_str());
    let state = Arc::new(AppState::new(config, directory));
    let app = create_app(state);

    let addr = format!("0.0.0.0:{port}");
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("Listening on {}", addr);
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
