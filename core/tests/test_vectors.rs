//! Verify request rendering and reply slicing against the JSON vectors in
//! `test-vectors/`.
//!
//! Each message vector names the expected text of every view, or the error
//! variant it must fail with. Every view is read twice to check the cached
//! value matches the first computation.

use rawhttp_core::{build_request, MessageError, RawMessage};
use serde_json::Value;

/// Name of the `MessageError` variant, ignoring any payload.
fn variant(err: &MessageError) -> &'static str {
    match err {
        MessageError::MalformedStatusLine => "MalformedStatusLine",
        MessageError::MalformedHeaderBlock => "MalformedHeaderBlock",
        MessageError::MalformedChunkFraming(_) => "MalformedChunkFraming",
    }
}

fn check(name: &str, view: &str, actual: Result<&str, MessageError>, expected: &Value) {
    match (actual, expected.get("ok"), expected.get("err")) {
        (Ok(text), Some(ok), None) => {
            assert_eq!(text, ok.as_str().unwrap(), "{name}: {view}")
        }
        (Err(e), None, Some(err)) => {
            assert_eq!(variant(&e), err.as_str().unwrap(), "{name}: {view}")
        }
        (actual, _, _) => panic!("{name}: {view}: got {actual:?}, expected {expected}"),
    }
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

#[test]
fn message_test_vectors() {
    let raw = include_str!("../../test-vectors/messages.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let msg = RawMessage::new(case["raw"].as_str().unwrap().as_bytes().to_vec());

        for _ in 0..2 {
            check(name, "status", msg.status(), &case["status"]);
            check(name, "header", msg.header(), &case["header"]);
            check(name, "body", msg.body(), &case["body"]);
        }
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let host = case["host"].as_str().unwrap();
        let wire = case["wire"].as_str().unwrap();
        assert_eq!(build_request(host), wire.as_bytes(), "{host}");
    }
}
