//! The primary and edge verifiers must accept and reject exactly the same tokens.

mod common;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use common::user;
use contest_auth::AppState;
use contest_auth::config::{Config, SigningSecret};
use contest_auth::directory::UserDirectory;
use contest_auth::session::{Role, SESSION_TTL_SECS, SignatureAlgorithm, TokenAuthority};

const NOW: u64 = 1_750_000_000;

/// Replace the character at `idx` with a different base64url character.
fn mutate_at(s: &str, idx: usize) -> String {
    let mut chars: Vec<char> = s.chars().collect();
    chars[idx] = if chars[idx] == 'A' { 'B' } else { 'A' };
    chars.into_iter().collect()
}

fn corpus(state: &AppState) -> Vec<String> {
    let authority = &state.authority;
    let mut tokens = Vec::new();

    for role in Role::ALL {
        tokens.push(authority.create_token_at(&user(role), NOW));
        tokens.push(authority.create_token_at(&user(role), NOW - SESSION_TTL_SECS));
        tokens.push(authority.create_token_at(&user(role), NOW - SESSION_TTL_SECS + 1));
    }

    for malformed in ["", "nodot", "a.b.c", ".", "a.", ".sig", "..", "a..b"] {
        tokens.push(malformed.to_string());
    }

    let forger = TokenAuthority::new(&SigningSecret::new("some-other-secret"));
    tokens.push(forger.create_token_at(&user(Role::Admin), NOW));

    let valid = authority.create_token_at(&user(Role::Contestant), NOW);
    let (payload, signature) = valid.rsplit_once('.').unwrap();
    tokens.push(format!("{payload}=.{signature}"));
    tokens.push(format!("{payload}.{signature}="));
    tokens.push(format!(" {valid}"));
    tokens.push(format!("{valid}\n"));
    tokens.push(format!("{valid}.{signature}"));

    for i in 0..signature.len() {
        tokens.push(format!("{payload}.{}", mutate_at(signature, i)));
    }
    for i in 0..payload.len() {
        tokens.push(format!("{}.{signature}", mutate_at(payload, i)));
    }

    // Correctly signed payloads that are not sessions.
    let signer = authority.signer();
    for body in [
        "not json at all".as_bytes().to_vec(),
        b"{}".to_vec(),
        br#"{"id":"1","email":"e","name":"n","role":"root","issuedAt":1,"expiresAt":99999999999}"#
            .to_vec(),
        br#"{"id":"1","email":"e","name":"n","role":"admin","issuedAt":1}"#.to_vec(),
        br#"[1,2,3]"#.to_vec(),
    ] {
        let encoded = URL_SAFE_NO_PAD.encode(body);
        let sig = signer.sign(&encoded);
        tokens.push(format!("{encoded}.{sig}"));
    }
    tokens.push(format!("!!!.{}", signer.sign("!!!")));

    tokens
}

#[tokio::test]
async fn test_verifiers_agree_on_corpus() {
    let state = AppState::new(Config::test_default(), UserDirectory::new());

    let mut accepted = 0;
    for token in corpus(&state) {
        let primary = state.authority.verify_at(&token, NOW);
        let edge = state.edge.verify_at(&token, NOW).await;
        assert_eq!(primary, edge, "verifiers disagree on {token:?}");
        if primary.is_some() {
            accepted += 1;
        }
    }

    // Fresh and one-second-from-expiry tokens for every role.
    assert_eq!(accepted, Role::ALL.len() * 2);
}

#[test]
fn test_signers_share_one_secret() {
    let state = AppState::new(Config::test_default(), UserDirectory::new());
    let primary = state.authority.signer();
    let edge = state.edge.signer();

    for input in ["", "payload", "eyJpZCI6IjEifQ", "ü-non-ascii"] {
        assert_eq!(primary.sign(input), edge.sign(input));
        assert!(edge.verify(input, &primary.sign(input)));
        assert!(primary.verify(input, &edge.sign(input)));
    }
}

#[tokio::test]
async fn test_edge_rejects_wrong_secret_app() {
    let issuer = AppState::new(Config::test_default(), UserDirectory::new());
    let other = AppState::new(
        Config {
            signing_secret: SigningSecret::new("different"),
            ..Config::test_default()
        },
        UserDirectory::new(),
    );

    let token = issuer.authority.create_token_at(&user(Role::Media), NOW);
    assert!(other.edge.verify_at(&token, NOW).await.is_none());
    assert!(other.authority.verify_at(&token, NOW).is_none());
}
