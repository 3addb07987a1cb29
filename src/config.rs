//! Application configuration via environment variables.
//!
//! The signing secret is resolved exactly once, here, and handed to both
//! verifier constructors. Production without `SESSION_SECRET` is a fatal
//! configuration error; there is no silent fallback.

use std::env;
use std::fmt;
use std::path::PathBuf;

/// Development-only signing key. The marker makes accidental use obvious.
pub const DEV_SIGNING_SECRET: &str = "INSECURE-DEV-ONLY-session-secret-do-not-deploy";

/// Deployment environment, from `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

/// HMAC key shared by the primary and edge verifiers.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningSecret(String);

impl SigningSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Resolve the secret for `environment` using `lookup` for env vars.
    pub fn resolve<F>(environment: Environment, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup("SESSION_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) => Ok(Self(secret)),
            None if environment.is_production() => Err(ConfigError::MissingSecret),
            None => {
                tracing::warn!(
                    "SESSION_SECRET not set, using the insecure development secret"
                );
                Ok(Self(DEV_SIGNING_SECRET.into()))
            }
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn is_dev_fallback(&self) -> bool {
        self.0 == DEV_SIGNING_SECRET
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(<redacted>)")
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub signing_secret: SigningSecret,
    pub port: u16,
    pub directory_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Required in production: `SESSION_SECRET`. Optional: `APP_ENV`,
    /// `PORT` (default 3001), `DIRECTORY_FILE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Environment::parse(lookup("APP_ENV").as_deref());
        let signing_secret = SigningSecret::resolve(environment, &lookup)?;

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => 3001,
        };

        Ok(Self {
            environment,
            signing_secret,
            port,
            directory_file: lookup("DIRECTORY_FILE")
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
        })
    }

    /// Cookies carry `Secure` only in production.
    pub fn secure_cookies(&self) -> bool {
        self.environment.is_production()
    }
}

/// Fixed configuration for tests.
impl Config {
    pub fn test_default() -> Self {
        Self {
            environment: Environment::Development,
            signing_secret: SigningSecret::new("test-secret-key"),
            port: 3001,
            directory_file: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("SESSION_SECRET must be set in production")]
    MissingSecret,

    #[error("invalid PORT value: {0}")]
    InvalidPort(String),

    #[error("failed to load user directory: {0}")]
    Directory(String),
}
