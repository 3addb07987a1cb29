//! The one seam both runtimes implement: HMAC-SHA256 over the encoded
//! payload, base64url without padding, plus a constant-time check.
//!
//! Exactly two implementations exist ([`HmacSha256Signer`] and
//! [`RingSigner`]). They must produce identical signatures for identical
//! `(encoded_payload, secret)` inputs; `tests/cross_runtime.rs` enforces it.
//!
//! [`HmacSha256Signer`]: super::primary::HmacSha256Signer
//! [`RingSigner`]: super::edge::RingSigner

pub trait SignatureAlgorithm: Send + Sync {
    /// `base64url(HMAC-SHA256(secret, encoded_payload))`.
    fn sign(&self, encoded_payload: &str) -> String;

    /// Whether `provided` is the signature of `encoded_payload`.
    ///
    /// A length mismatch returns `false` immediately; equal-length inputs
    /// are compared without early exit.
    fn verify(&self, encoded_payload: &str, provided: &str) -> bool;
}
