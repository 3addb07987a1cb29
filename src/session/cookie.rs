//! Session cookie transport.
//!
//! Every reader and writer of the session cookie goes through
//! [`SESSION_COOKIE_NAME`]; the attribute set is fixed apart from `Secure`,
//! which is on only in production.

use axum::http::{HeaderMap, HeaderValue, header};
use axum::response::Response;

use super::SESSION_TTL_SECS;

pub const SESSION_COOKIE_NAME: &str = "contest_session";

/// Fixed cookie attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieOptions {
    pub http_only: bool,
    pub secure: bool,
    pub same_site: &'static str,
    pub path: &'static str,
    pub max_age: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieConfig {
    pub name: &'static str,
    pub options: CookieOptions,
}

impl CookieConfig {
    fn header_value(&self, value: &str, max_age: u64) -> String {
        let o = &self.options;
        let mut parts = vec![
            format!("{}={}", self.name, value),
            format!("Max-Age={max_age}"),
            format!("Path={}", o.path),
        ];
        if o.http_only {
            parts.push("HttpOnly".into());
        }
        parts.push(format!("SameSite={}", o.same_site));
        if o.secure {
            parts.push("Secure".into());
        }
        parts.join("; ")
    }
}

/// Sets and clears the session cookie on responses.
#[derive(Debug, Clone, Copy)]
pub struct CookiePolicy {
    secure: bool,
}

impl CookiePolicy {
    pub fn new(secure: bool) -> Self {
        Self { secure }
    }

    pub fn config(&self) -> CookieConfig {
        CookieConfig {
            name: SESSION_COOKIE_NAME,
            options: CookieOptions {
                http_only: true,
                secure: self.secure,
                same_site: "Lax",
                path: "/",
                max_age: SESSION_TTL_SECS,
            },
        }
    }

    /// `Set-Cookie` value carrying `token` for the full session lifetime.
    pub fn set_cookie(&self, token: &str) -> String {
        let config = self.config();
        config.header_value(token, config.options.max_age)
    }

    /// `Set-Cookie` value that makes the client drop the cookie immediately.
    pub fn clear_cookie(&self) -> String {
        self.config().header_value("", 0)
    }

    pub fn attach(&self, response: &mut Response, token: &str) {
        append_set_cookie(response, &self.set_cookie(token));
    }

    pub fn clear(&self, response: &mut Response) {
        append_set_cookie(response, &self.clear_cookie());
    }
}

fn append_set_cookie(response: &mut Response, cookie: &str) {
    match HeaderValue::from_str(cookie) {
        Ok(value) => {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
        Err(e) => tracing::error!("Refusing to emit malformed Set-Cookie header: {}", e),
    }
}

/// Read the session token from the request's `Cookie` headers.
///
/// An empty value (as left behind by [`CookiePolicy::clear`]) counts as absent.
pub fn read_session_cookie(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|h| parse_cookie(h, SESSION_COOKIE_NAME))
        .filter(|v| !v.is_empty())
}

/// Parse a specific cookie from a Cookie header value.
fn parse_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    for part in header.split(';') {
        let trimmed = part.trim();
        if let Some(value) = trimmed.strip_prefix(name)
            && let Some(value) = value.strip_prefix('=')
        {
            return Some(value);
        }
    }
    None
}
