//! Payload codec: `SessionPayload` <-> `base64url(JSON)` without padding.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde_json::error::Category;

use super::SessionPayload;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("payload is not valid base64url")]
    Base64,

    #[error("payload is not valid JSON")]
    Json,

    #[error("payload does not match the session shape")]
    Shape,
}

/// Serialize a payload to its transport form.
pub fn encode(payload: &SessionPayload) -> String {
    let json = serde_json::to_vec(payload).expect("session payload always serializes");
    URL_SAFE_NO_PAD.encode(json)
}

/// Parse a transport-form payload. Never panics.
pub fn decode(encoded: &str) -> Result<SessionPayload, DecodeError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(encoded)
        .map_err(|_| DecodeError::Base64)?;

    serde_json::from_slice(&bytes).map_err(|e| match e.classify() {
        Category::Data => DecodeError::Shape,
        Category::Io | Category::Syntax | Category::Eof => DecodeError::Json,
    })
}
