//! In-memory user directory backing the sign-in endpoint.
//!
//! Credential verification proper belongs to an external identity system;
//! this directory stands in for it in development and tests. Entries are
//! loaded from a JSON file:
//!
//! ```json
//! [{"email": "a@example.com", "password": "...", "user": {"id": "...", ...}}]
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;
use subtle::ConstantTimeEq;

use crate::config::ConfigError;
use crate::session::SessionUser;

#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryEntry {
    pub email: String,
    pub password: String,
    pub user: SessionUser,
}

#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    entries: Vec<DirectoryEntry>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(
        mut self,
        email: impl Into<String>,
        password: impl Into<String>,
        user: SessionUser,
    ) -> Self {
        self.entries.push(DirectoryEntry {
            email: email.into(),
            password: password.into(),
            user,
        });
        self
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let entries: Vec<DirectoryEntry> =
            serde_json::from_str(json).map_err(|e| ConfigError::Directory(e.to_string()))?;
        Ok(Self { entries })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)
            .map_err(|e| ConfigError::Directory(format!("{}: {e}", path.display())))?;
        Self::from_json(&raw)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up `email` (case-insensitive) and check `password`.
    ///
    /// Every entry's password is compared so the scan does not stop early.
    pub fn authenticate(&self, email: &str, password: &str) -> Option<SessionUser> {
        let mut found = None;
        for entry in &self.entries {
            let email_match = entry.email.eq_ignore_ascii_case(email.trim());
            let pw = entry.password.as_bytes();
            let pw_match = pw.len() == password.len() && bool::from(pw.ct_eq(password.as_bytes()));
            if email_match && pw_match && found.is_none() {
                found = Some(entry.user.clone());
            }
        }
        found
    }
}
