#![cfg(any(feature = "jwt-aws-lc-rs", feature = "jwt-rust-crypto"))]

use board_auth::{JwtOptions, JwtVerifier};
use board_core::errors::{BoardError, ErrorKind};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;

// base64 of "job-board-test-secret-0123456789"
const SECRET: &str = "am9iLWJvYXJkLXRlc3Qtc2VjcmV0LTAxMjM0NTY3ODk=";

fn token(claims: serde_json::Value) -> String {
    let key = EncodingKey::from_base64_secret(SECRET).unwrap();
    encode(&Header::default(), &claims, &key).unwrap()
}

fn verifier() -> JwtVerifier {
    JwtVerifier::new(JwtOptions::default().with_secret(SECRET))
}

fn kind(err: &anyhow::Error) -> ErrorKind {
    BoardError::from_anyhow(err).unwrap().kind
}

#[test]
fn missing_header_is_no_principal() {
    assert_eq!(verifier().principal_from_header(None).unwrap(), None);
    assert_eq!(verifier().principal_from_header(Some("  ")).unwrap(), None);
}

#[test]
fn bearer_token_yields_subject() {
    let header = format!("Bearer {}", token(json!({ "sub": "u1" })));

    let principal = verifier().principal_from_header(Some(&header)).unwrap();
    assert_eq!(principal.as_deref(), Some("u1"));
}

#[test]
fn bare_token_is_accepted() {
    let bare = token(json!({ "sub": "u2" }));
    assert_eq!(verifier().verify(&bare).unwrap(), "u2");
}

#[test]
fn tampered_token_is_not_authenticated() {
    let mut tok = token(json!({ "sub": "u1" }));
    tok.push('x');

    let err = verifier()
        .principal_from_header(Some(&format!("Bearer {tok}")))
        .unwrap_err();
    assert_eq!(kind(&err), ErrorKind::NotAuthenticated);
}

#[test]
fn token_without_subject_is_rejected() {
    let err = verifier().verify(&token(json!({ "role": "admin" }))).unwrap_err();
    assert_eq!(kind(&err), ErrorKind::NotAuthenticated);
}

#[test]
fn unknown_scheme_is_rejected() {
    let header = format!("Basic {}", token(json!({ "sub": "u1" })));
    let err = verifier().principal_from_header(Some(&header)).unwrap_err();
    assert_eq!(kind(&err), ErrorKind::NotAuthenticated);
}

#[test]
fn no_secret_rejects_every_token() {
    let v = JwtVerifier::new(JwtOptions::default());
    let err = v.verify(&token(json!({ "sub": "u1" }))).unwrap_err();
    assert_eq!(kind(&err), ErrorKind::NotAuthenticated);
}
