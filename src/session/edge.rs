//! Edge runtime: verification only, used by the route guard.
//!
//! Independent of the primary signer on purpose: HMAC comes from `ring`
//! and the comparison is a plain XOR-fold. Tokens are never minted here.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use ring::hmac;

use super::signature::SignatureAlgorithm;
use super::{SessionUser, now_secs, token};
use crate::config::SigningSecret;

#[derive(Clone)]
pub struct RingSigner {
    key: hmac::Key,
}

impl RingSigner {
    pub fn new(secret: &SigningSecret) -> Self {
        Self::from_key(secret.as_bytes())
    }

    pub(crate) fn from_key(key: &[u8]) -> Self {
        Self {
            key: hmac::Key::new(hmac::HMAC_SHA256, key),
        }
    }
}

impl SignatureAlgorithm for RingSigner {
    fn sign(&self, encoded_payload: &str) -> String {
        let tag = hmac::sign(&self.key, encoded_payload.as_bytes());
        URL_SAFE_NO_PAD.encode(tag.as_ref())
    }

    fn verify(&self, encoded_payload: &str, provided: &str) -> bool {
        let expected = self.sign(encoded_payload);
        let (a, b) = (expected.as_bytes(), provided.as_bytes());
        if a.len() != b.len() {
            return false;
        }
        let mut diff = 0u8;
        for (x, y) in a.iter().zip(b) {
            diff |= x ^ y;
        }
        diff == 0
    }
}

/// Session verifier for the request-interception layer.
#[derive(Clone)]
pub struct EdgeVerifier {
    signer: RingSigner,
}

impl EdgeVerifier {
    pub fn new(secret: &SigningSecret) -> Self {
        Self {
            signer: RingSigner::new(secret),
        }
    }

    pub fn signer(&self) -> &RingSigner {
        &self.signer
    }

    pub async fn verify(&self, token: &str) -> Option<SessionUser> {
        self.verify_at(token, now_secs()).await
    }

    pub async fn verify_at(&self, token: &str, now: u64) -> Option<SessionUser> {
        token::verify_with(&self.signer, token, now)
    }
}
