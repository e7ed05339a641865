//! Verify operations against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, the expected request, a simulated
//! response and the expected result. A replaying transport captures the
//! request and answers with the simulated response. Comparing parsed JSON
//! (not raw strings) avoids false negatives from field-ordering differences.

use std::cell::RefCell;

use serde_json::Value;
use tana_core::{
    ApiError, ClientConfig, CreatedNode, Field, HttpRequest, HttpResponse, PlainNode, TanaClient,
    Transport,
};

const BASE_URL: &str = "http://localhost:3000/addToNodeV2";

struct ReplayTransport {
    response: HttpResponse,
    captured: RefCell<Option<HttpRequest>>,
}

impl Transport for ReplayTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        *self.captured.borrow_mut() = Some(request);
        Ok(self.response.clone())
    }
}

fn client_for(case: &Value) -> TanaClient<ReplayTransport> {
    let transport = ReplayTransport {
        response: simulated_response(case),
        captured: RefCell::new(None),
    };
    TanaClient::with_transport(
        ClientConfig::new("test-token").with_endpoint(BASE_URL),
        transport,
    )
}

fn load(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

fn simulated_response(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

/// Compare the request the transport saw against `expected_request`.
fn assert_request(name: &str, client: &TanaClient<ReplayTransport>, case: &Value) {
    let captured = client.transport().captured.borrow();
    let req = captured.as_ref().expect("no request was sent");
    let expected_req = &case["expected_request"];

    assert_eq!(req.url, BASE_URL, "{name}: url");

    let expected_headers: Vec<(String, String)> = expected_req["headers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let arr = h.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect();
    assert_eq!(req.headers, expected_headers, "{name}: headers");

    let body: Value = serde_json::from_str(&req.body).unwrap();
    assert_eq!(body, expected_req["body"], "{name}: body");
}

// ---------------------------------------------------------------------------
// Create node
// ---------------------------------------------------------------------------

#[test]
fn create_node_test_vectors() {
    for case in load(include_str!("../../test-vectors/create_node.json")) {
        let name = case["name"].as_str().unwrap();
        let input: PlainNode = serde_json::from_value(case["input"].clone()).unwrap();
        let target = case["target_node_id"].as_str().unwrap();

        let c = client_for(&case);
        let node = c.create_node(&input, target).unwrap();
        assert_request(name, &c, &case);

        let expected: CreatedNode = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(node, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Field definitions
// ---------------------------------------------------------------------------

#[test]
fn field_definitions_test_vectors() {
    for case in load(include_str!("../../test-vectors/field_definitions.json")) {
        let name = case["name"].as_str().unwrap();
        let input: Vec<PlainNode> = serde_json::from_value(case["input"].clone()).unwrap();

        let c = client_for(&case);
        let created = c.create_field_definitions(&input).unwrap();
        assert_request(name, &c, &case);

        let expected: Vec<CreatedNode> =
            serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(created, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Tag definition
// ---------------------------------------------------------------------------

#[test]
fn tag_definition_test_vectors() {
    for case in load(include_str!("../../test-vectors/tag_definition.json")) {
        let name = case["name"].as_str().unwrap();
        let input: PlainNode = serde_json::from_value(case["input"].clone()).unwrap();

        let c = client_for(&case);
        let id = c.create_tag_definition(&input).unwrap();
        assert_request(name, &c, &case);
        assert_eq!(id, case["expected_result"].as_str().unwrap(), "{name}: node id");
    }
}

// ---------------------------------------------------------------------------
// Rename
// ---------------------------------------------------------------------------

#[test]
fn set_name_test_vectors() {
    for case in load(include_str!("../../test-vectors/set_name.json")) {
        let name = case["name"].as_str().unwrap();
        let new_name = case["input"].as_str().unwrap();
        let target = case["target_node_id"].as_str().unwrap();

        let c = client_for(&case);
        let node = c.set_node_name(new_name, target).unwrap();
        assert_request(name, &c, &case);

        let expected: CreatedNode = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(node, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Add field
// ---------------------------------------------------------------------------

#[test]
fn add_field_test_vectors() {
    for case in load(include_str!("../../test-vectors/add_field.json")) {
        let name = case["name"].as_str().unwrap();
        let input: Field = serde_json::from_value(case["input"].clone()).unwrap();
        let target = case["target_node_id"].as_str().unwrap();

        let c = client_for(&case);
        let node = c.add_field(&input, target).unwrap();
        assert_request(name, &c, &case);

        let expected: CreatedNode = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(node, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn error_test_vectors() {
    for case in load(include_str!("../../test-vectors/errors.json")) {
        let name = case["name"].as_str().unwrap();
        let c = client_for(&case);

        let err = c.parse_children(simulated_response(&case)).unwrap_err();
        match case["expected_error"].as_str().unwrap() {
            "Http" => assert!(matches!(err, ApiError::Http { .. }), "{name}: expected Http"),
            "Deserialization" => assert!(
                matches!(err, ApiError::Deserialization(_)),
                "{name}: expected Deserialization"
            ),
            other => panic!("{name}: unknown expected_error: {other}"),
        }

        let needle = case["expected_message_contains"].as_str().unwrap();
        assert!(err.to_string().contains(needle), "{name}: message was {err}");

        // The same response fails a full operation, with no partial result.
        let err = c
            .create_node(&PlainNode::new("any", ""), "ANY")
            .unwrap_err();
        assert!(err.to_string().contains(needle), "{name}: operation message was {err}");
    }
}
