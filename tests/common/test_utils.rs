use chat_relay::handler::{RequestAdapter, ResponseEnvelope};
use serde_json::{Value, json};

use super::mocks::MockInferenceClient;

/// Builds an adapter around a clone of the mock so the caller keeps a handle
/// on the recorded requests.
pub fn adapter_with(mock: &MockInferenceClient) -> RequestAdapter {
    RequestAdapter::with_client(Box::new(mock.clone()))
}

/// An API Gateway style event whose body is the JSON encoding of `body`
pub fn event(body: Value) -> Value {
    json!({ "body": body.to_string() })
}

pub fn event_with_raw_body(body: &str) -> Value {
    json!({ "body": body })
}

pub fn authenticated_event(body: Value, email: &str) -> Value {
    json!({
        "requestContext": {
            "authorizer": {
                "claims": {
                    "email": email,
                    "cognito:username": "test-user"
                }
            }
        },
        "body": body.to_string()
    })
}

pub fn body_of(envelope: &ResponseEnvelope) -> Value {
    serde_json::from_str(&envelope.body).expect("envelope body is JSON")
}

pub fn assert_general_failure(envelope: &ResponseEnvelope) {
    assert_eq!(envelope.status_code, 500);
    assert!(envelope.headers.is_some(), "general failures carry CORS headers");

    let body = body_of(envelope);
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
    assert!(body.get("conversationHistory").is_none());
}

pub fn assert_transport_failure(envelope: &ResponseEnvelope) {
    assert_eq!(envelope.status_code, 500);
    assert!(envelope.headers.is_none(), "transport failures carry no headers");

    let body = body_of(envelope);
    let fields = body.as_object().expect("body is an object");
    assert_eq!(fields.len(), 1);
    assert!(body["error"].is_string());
}
