//! Self-contained signed sessions.
//!
//! The token *is* the session: `base64url(JSON(payload)).base64url(hmac)`.
//! There is no server-side session table, so a token stays valid until its
//! `expiresAt` even after the client drops the cookie.
//!
//! Two independent HMAC implementations sit behind [`SignatureAlgorithm`]:
//! the primary one (`hmac`/`sha2`) mints and verifies tokens in handlers,
//! the edge one (`ring`) only verifies, inside the route guard.

pub mod codec;
pub mod cookie;
pub mod edge;
pub mod primary;
pub mod signature;
mod token;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

pub use edge::EdgeVerifier;
pub use primary::TokenAuthority;
pub use signature::SignatureAlgorithm;

/// Fixed session lifetime: one hour from issuance.
pub const SESSION_TTL_SECS: u64 = 60 * 60;

/// Closed set of roles a session can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Contestant,
    Media,
    Voter,
    Sponsor,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::Contestant,
        Role::Media,
        Role::Voter,
        Role::Sponsor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Contestant => "contestant",
            Role::Media => "media",
            Role::Voter => "voter",
            Role::Sponsor => "sponsor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// The authenticated identity carried by a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    /// Display name.
    pub name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Signed claims: the user plus issuance timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPayload {
    #[serde(flatten)]
    pub user: SessionUser,
    pub issued_at: u64,
    pub expires_at: u64,
}

impl SessionPayload {
    /// Build a payload issued at `now`, expiring `SESSION_TTL_SECS` later.
    pub fn issue(user: SessionUser, now: u64) -> Self {
        Self {
            user,
            issued_at: now,
            expires_at: now + SESSION_TTL_SECS,
        }
    }

    pub fn is_expired_at(&self, now: u64) -> bool {
        self.expires_at <= now
    }

    /// Drop the timing fields; callers only ever see the user.
    pub fn into_user(self) -> SessionUser {
        self.user
    }
}

/// Current Unix time in seconds.
pub fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
