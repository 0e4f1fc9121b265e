//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results or error kinds. Comparing parsed JSON (not raw
//! strings) avoids false negatives from field-ordering differences.

use serde_json::Value;
use todoist_sdk::{
    AddTask, ApiError, Client, Endpoints, ErrorKind, HttpMethod, HttpRequest, HttpResponse, Task,
    TaskFilter, TokenRequest, TokenResponse, Transport, TransportError, UpdateTask,
};

const BASE_URL: &str = "http://localhost:3000";

/// Vectors only exercise the pure build/parse halves.
struct NoTransport;

impl Transport for NoTransport {
    fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
        Err(TransportError::new("test vectors never dispatch"))
    }
}

fn client() -> Client<NoTransport> {
    Client::with_endpoints(NoTransport, "app-id", "app-secret", Endpoints::new(BASE_URL, BASE_URL))
}

fn load(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn assert_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.url, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: url");

    let expected_headers: Vec<(String, String)> = expected["headers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let arr = h.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect();
    assert_eq!(req.headers, expected_headers, "{name}: headers");

    match expected.get("body") {
        Some(body) => {
            let req_body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&req_body, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: body should be None"),
    }
}

fn simulated(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

fn assert_error(name: &str, case: &Value, err: &ApiError) {
    let expected = match case["expected_error"].as_str().unwrap() {
        "RemoteRejection" => ErrorKind::RemoteRejection,
        "Decode" => ErrorKind::Decode,
        other => panic!("{name}: unknown expected_error: {other}"),
    };
    assert_eq!(err.kind(), expected, "{name}: error kind ({err})");
    if expected == ErrorKind::RemoteRejection {
        assert_eq!(
            err.status(),
            Some(case["simulated_response"]["status"].as_u64().unwrap() as u16),
            "{name}: status"
        );
    }
}

/// Check a unit-returning parse result against the case's expectation.
fn assert_unit_result(name: &str, case: &Value, result: Result<(), ApiError>) {
    if case.get("expected_error").is_some() {
        assert_error(name, case, &result.unwrap_err());
    } else {
        assert!(result.is_ok(), "{name}: expected success, got {result:?}");
    }
}

// ---------------------------------------------------------------------------
// Token exchange
// ---------------------------------------------------------------------------

#[test]
fn token_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/token.json")) {
        let name = case["name"].as_str().unwrap();
        let input: TokenRequest = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c
            .auth()
            .build_token_request(&input.client_id, &input.client_secret, &input.code)
            .unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let result = c.auth().parse_token_response(simulated(&case));
        if case.get("expected_error").is_some() {
            assert_error(name, &case, &result.unwrap_err());
        } else {
            let expected: TokenResponse =
                serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/create.json")) {
        let name = case["name"].as_str().unwrap();
        let token = case["token"].as_str().unwrap();
        let input: AddTask = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.tasks().build_create_task(&input, token).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        assert_unit_result(name, &case, c.tasks().parse_create_task(simulated(&case)));
    }
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

#[test]
fn get_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/get.json")) {
        let name = case["name"].as_str().unwrap();
        let token = case["token"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();

        let req = c.tasks().build_get_task(id, token).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let result = c.tasks().parse_get_task(simulated(&case));
        if case.get("expected_error").is_some() {
            assert_error(name, &case, &result.unwrap_err());
        } else {
            let expected: Task = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/list.json")) {
        let name = case["name"].as_str().unwrap();
        let token = case["token"].as_str().unwrap();
        let filter = match case["filter"].as_str() {
            None => TaskFilter::All,
            Some("today") => TaskFilter::Today,
            Some(expr) => TaskFilter::Custom(expr.to_string()),
        };

        let req = c.tasks().build_list_tasks(token, &filter).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let result = c.tasks().parse_list_tasks(simulated(&case));
        if case.get("expected_error").is_some() {
            assert_error(name, &case, &result.unwrap_err());
        } else {
            let expected: Vec<Task> =
                serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/update.json")) {
        let name = case["name"].as_str().unwrap();
        let token = case["token"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();
        let input: UpdateTask = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.tasks().build_update_task(id, token, &input).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        assert_unit_result(name, &case, c.tasks().parse_update_task(simulated(&case)));
    }
}

// ---------------------------------------------------------------------------
// Close
// ---------------------------------------------------------------------------

#[test]
fn close_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/close.json")) {
        let name = case["name"].as_str().unwrap();
        let token = case["token"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();

        let req = c.tasks().build_close_task(id, token).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        assert_unit_result(name, &case, c.tasks().parse_close_task(simulated(&case)));
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/delete.json")) {
        let name = case["name"].as_str().unwrap();
        let token = case["token"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();

        let req = c.tasks().build_delete_task(id, token).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        assert_unit_result(name, &case, c.tasks().parse_delete_task(simulated(&case)));
    }
}
