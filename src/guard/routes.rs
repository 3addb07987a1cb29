//! Path-prefix access table and the per-request decision.
//!
//! The table is product configuration: [`RouteTable::default`] is the
//! contest platform's table, and any other table can be injected.

use crate::session::{Role, SessionUser};

/// Outcome of evaluating one request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// No valid session on a protected path.
    SignIn,
    /// Valid session, wrong role for the path.
    Denied,
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    public_prefixes: Vec<String>,
    role_prefixes: Vec<(String, Role)>,
    sign_in_path: String,
    access_denied_path: String,
    api_prefix: String,
}

impl RouteTable {
    /// An empty table: only `/` is reachable without a session.
    pub fn new(sign_in_path: impl Into<String>, access_denied_path: impl Into<String>) -> Self {
        Self {
            public_prefixes: Vec::new(),
            role_prefixes: Vec::new(),
            sign_in_path: sign_in_path.into(),
            access_denied_path: access_denied_path.into(),
            api_prefix: "/api".into(),
        }
    }

    pub fn public(mut self, prefix: impl Into<String>) -> Self {
        self.public_prefixes.push(prefix.into());
        self
    }

    pub fn restrict(mut self, prefix: impl Into<String>, role: Role) -> Self {
        self.role_prefixes.push((prefix.into(), role));
        self
    }

    pub fn with_api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = prefix.into();
        self
    }

    pub fn sign_in_path(&self) -> &str {
        &self.sign_in_path
    }

    pub fn access_denied_path(&self) -> &str {
        &self.access_denied_path
    }

    /// Whether failures on `path` should be answered with JSON, not redirects.
    pub fn is_api(&self, path: &str) -> bool {
        matches_prefix(path, &self.api_prefix)
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.public_prefixes.iter().any(|p| matches_prefix(path, p))
    }

    /// Role required for `path`; the longest matching prefix wins.
    pub fn required_role(&self, path: &str) -> Option<Role> {
        self.role_prefixes
            .iter()
            .filter(|(prefix, _)| matches_prefix(path, prefix))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, role)| *role)
    }

    pub fn decide(&self, path: &str, user: Option<&SessionUser>) -> GuardDecision {
        if self.is_public(path) || path == "/" {
            return GuardDecision::Allow;
        }

        let Some(user) = user else {
            return GuardDecision::SignIn;
        };

        match self.required_role(path) {
            Some(required) if required != user.role => GuardDecision::Denied,
            _ => GuardDecision::Allow,
        }
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        let mut table = RouteTable::new("/auth/signin", "/unauthorized")
            .public("/auth/signin")
            .public("/auth/signup")
            .public("/auth/error")
            .public("/unauthorized")
            .public("/api/auth")
            .public("/health");

        for role in Role::ALL {
            table = table
                .restrict(format!("/{role}"), role)
                .restrict(format!("/api/{role}"), role);
        }
        table
    }
}

/// Segment-aware prefix match: `/admin` matches `/admin` and `/admin/x`,
/// never `/administrator`.
fn matches_prefix(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
