//! Primary runtime: mints tokens and verifies them inside handlers.
//!
//! HMAC via the RustCrypto `hmac`/`sha2` crates, comparison via `subtle`.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::signature::SignatureAlgorithm;
use super::{SessionUser, now_secs, token};
use crate::config::SigningSecret;

type HmacSha256 = Hmac<Sha256>;

/// Synchronous HMAC-SHA256 signer.
#[derive(Clone)]
pub struct HmacSha256Signer {
    mac: HmacSha256,
}

impl HmacSha256Signer {
    pub fn new(secret: &SigningSecret) -> Self {
        Self::from_key(secret.as_bytes())
    }

    pub(crate) fn from_key(key: &[u8]) -> Self {
        let mac = HmacSha256::new_from_slice(key).expect("HMAC key length is always valid");
        Self { mac }
    }
}

impl SignatureAlgorithm for HmacSha256Signer {
    fn sign(&self, encoded_payload: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(encoded_payload.as_bytes());
        URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
    }

    fn verify(&self, encoded_payload: &str, provided: &str) -> bool {
        let expected = self.sign(encoded_payload);
        if expected.len() != provided.len() {
            return false;
        }
        expected.as_bytes().ct_eq(provided.as_bytes()).into()
    }
}

/// Issues and verifies session tokens in the primary runtime.
#[derive(Clone)]
pub struct TokenAuthority {
    signer: HmacSha256Signer,
}

impl TokenAuthority {
    pub fn new(secret: &SigningSecret) -> Self {
        Self {
            signer: HmacSha256Signer::new(secret),
        }
    }

    pub fn signer(&self) -> &HmacSha256Signer {
        &self.signer
    }

    /// Create a token for `user`, issued now and valid for one hour.
    pub fn create_token(&self, user: &SessionUser) -> String {
        self.create_token_at(user, now_secs())
    }

    pub fn create_token_at(&self, user: &SessionUser, now: u64) -> String {
        token::mint(&self.signer, user, now)
    }

    /// Resolve a token to its user, or `None` for any kind of invalid token.
    pub fn verify(&self, token: &str) -> Option<SessionUser> {
        self.verify_at(token, now_secs())
    }

    pub fn verify_at(&self, token: &str, now: u64) -> Option<SessionUser> {
        token::verify_with(&self.signer, token, now)
    }
}
