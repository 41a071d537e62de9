use anyhow::{Context, Result};
use board_core::bail_board;
use board_core::errors::{BoardError, ErrorKind};
use serde_json::json;

fn refuse(who: &str) -> Result<()> {
    bail_board!(not_authenticated, "{} may not post here", who);
}

#[test]
fn json_payload_carries_name_code_and_class() {
    let err = BoardError::unprocessable("Invalid jobs record")
        .with_errors(json!({ "_schema": ["missing field `title`"] }));

    assert_eq!(
        err.to_json(),
        json!({
            "name": "Unprocessable",
            "message": "Invalid jobs record",
            "code": 422,
            "className": "unprocessable",
            "errors": { "_schema": ["missing field `title`"] }
        })
    );
}

#[test]
fn board_error_survives_context_layers() {
    let err = refuse("bob").context("posting job").unwrap_err();

    let board = BoardError::from_anyhow(&err).unwrap();
    assert_eq!(board.kind, ErrorKind::NotAuthenticated);
    assert_eq!(board.message, "bob may not post here");
}

#[test]
fn foreign_errors_normalize_to_general_error() {
    let err = BoardError::normalize(anyhow::anyhow!("disk on fire"));

    assert_eq!(err.kind, ErrorKind::GeneralError);
    assert_eq!(err.code(), 500);
    assert!(err.source.is_some());
    assert!(err.sanitize_for_client().source.is_none());
}

#[test]
fn display_includes_status() {
    let err = BoardError::not_found("Job not found: j9");
    assert_eq!(err.to_string(), "NotFound (404): Job not found: j9");
}
