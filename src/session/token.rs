//! Token assembly and the verification pipeline shared by both runtimes.
//!
//! Only the HMAC and the comparison differ between runtimes; everything
//! here runs identically on top of either [`SignatureAlgorithm`].

use super::codec;
use super::signature::SignatureAlgorithm;
use super::{SessionPayload, SessionUser};

/// Mint `encoded.signature` for `user`, issued at `now`.
pub(crate) fn mint<A: SignatureAlgorithm + ?Sized>(alg: &A, user: &SessionUser, now: u64) -> String {
    let payload = SessionPayload::issue(user.clone(), now);
    let encoded = codec::encode(&payload);
    let signature = alg.sign(&encoded);
    format!("{encoded}.{signature}")
}

/// Verify `token` at time `now`.
///
/// Every failure is `None`. The reason is logged at debug level and never
/// handed back to the caller.
pub(crate) fn verify_with<A: SignatureAlgorithm + ?Sized>(
    alg: &A,
    token: &str,
    now: u64,
) -> Option<SessionUser> {
    let Some((encoded, signature)) = token.rsplit_once('.') else {
        tracing::debug!("session token rejected: no separator");
        return None;
    };
    if encoded.is_empty() || signature.is_empty() {
        tracing::debug!("session token rejected: empty segment");
        return None;
    }

    if !alg.verify(encoded, signature) {
        tracing::debug!("session token rejected: signature mismatch");
        return None;
    }

    let payload = match codec::decode(encoded) {
        Ok(p) => p,
        Err(e) => {
            tracing::debug!("session token rejected: {e}");
            return None;
        }
    };

    if payload.is_expired_at(now) {
        tracing::debug!("session token rejected: expired");
        return None;
    }

    Some(payload.into_user())
}
