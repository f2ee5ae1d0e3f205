//! Verify response parsing against JSON test vectors stored in `test-vectors/`.
//!
//! The 403 bodies and error payloads are copies of what the vendor actually
//! sends, so the substrings the classifier keys on live here as data.

use ean_core::{ApiError, Config, Denial, EanClient, HttpResponse, Session};

fn client() -> EanClient {
    EanClient::new(Config::new("vector-key"))
}

fn parse_denial(s: &str) -> Denial {
    match s {
        "Forbidden" => Denial::Forbidden,
        "NotAuthorized" => Denial::NotAuthorized,
        "DeveloperInactive" => Denial::DeveloperInactive,
        "QueryLimit" => Denial::QueryLimit,
        "RateLimit" => Denial::RateLimit,
        "OverCapacity" => Denial::OverCapacity,
        "AuthenticationFailure" => Denial::AuthenticationFailure,
        "Unknown" => Denial::Unknown,
        other => panic!("unknown denial: {other}"),
    }
}

// ---------------------------------------------------------------------------
// 403 classification
// ---------------------------------------------------------------------------

#[test]
fn denial_test_vectors() {
    let raw = include_str!("../../test-vectors/denials.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let body = case["body"].as_str().unwrap();
        let expected = parse_denial(case["expected"].as_str().unwrap());

        let response = HttpResponse {
            status: 403,
            headers: Vec::new(),
            body: body.to_string(),
        };
        let err = c.parse_response(response, &mut None).unwrap_err();
        assert_eq!(err.denial(), Some(expected), "{name}: denial");

        match expected.message() {
            Some(message) => assert_eq!(err.to_string(), message, "{name}: message"),
            None => assert!(err.to_string().ends_with(body), "{name}: passthrough"),
        }
    }
}

// ---------------------------------------------------------------------------
// Body-level results
// ---------------------------------------------------------------------------

#[test]
fn response_test_vectors() {
    let raw = include_str!("../../test-vectors/responses.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let expected = &case["expected"];
        let response = HttpResponse {
            status: case["status"].as_u64().unwrap() as u16,
            headers: Vec::new(),
            body: case["body"].as_str().unwrap().to_string(),
        };

        let mut session: Option<Session> = None;
        let result = c.parse_response(response, &mut session);

        match expected["kind"].as_str().unwrap() {
            "ok" => {
                assert!(result.is_ok(), "{name}: expected success, got {result:?}");
                let expected_id = expected["session_id"].as_str();
                assert_eq!(
                    session.as_ref().and_then(|s| s.id.as_deref()),
                    expected_id,
                    "{name}: session id"
                );
            }
            "multiple_locations" => {
                let err = result.unwrap_err();
                let ids: Vec<&str> = err
                    .locations()
                    .iter()
                    .map(|l| l.destination_id.as_str())
                    .collect();
                let expected_ids: Vec<&str> = expected["destination_ids"]
                    .as_array()
                    .unwrap()
                    .iter()
                    .map(|v| v.as_str().unwrap())
                    .collect();
                assert!(err.is_multiple_locations(), "{name}");
                assert_eq!(ids, expected_ids, "{name}: destination ids");
            }
            "invalid_data" => {
                let err = result.unwrap_err();
                assert!(err.is_invalid_data(), "{name}: got {err:?}");
            }
            "service" => {
                let err = result.unwrap_err();
                assert!(matches!(err, ApiError::Service(_)), "{name}: got {err:?}");
                assert_eq!(err.to_string(), expected["message"].as_str().unwrap());
            }
            "deserialization" => {
                let err = result.unwrap_err();
                assert!(matches!(err, ApiError::Deserialization(_)), "{name}: got {err:?}");
            }
            other => panic!("{name}: unknown expected kind {other}"),
        }
        if expected["kind"] != "ok" {
            assert!(session.is_none(), "{name}: errors must not touch the session");
        }
    }
}
