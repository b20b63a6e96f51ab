use crate::{Error, Result, history::Turn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

pub const CORS_ALLOW_HEADERS: &str =
    "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token";
pub const CORS_ALLOW_METHODS: &str = "OPTIONS,POST";

/// The subset of an API Gateway proxy event this function reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InboundEvent {
    #[serde(rename = "requestContext", default)]
    pub request_context: Option<RequestContext>,
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestContext {
    #[serde(default)]
    pub authorizer: Option<Authorizer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Authorizer {
    #[serde(default)]
    pub claims: Option<HashMap<String, Value>>,
}

/// The JSON document carried in the event body, after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub message: String,
    pub conversation_history: Vec<Turn>,
}

#[derive(Deserialize)]
struct RawChatRequest {
    #[serde(default)]
    message: Option<String>,
    #[serde(rename = "conversationHistory", default)]
    conversation_history: Vec<Turn>,
}

impl InboundEvent {
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| Error::malformed_input(format!("unreadable event: {}", e)))
    }

    pub fn claims(&self) -> Option<&HashMap<String, Value>> {
        self.request_context
            .as_ref()?
            .authorizer
            .as_ref()?
            .claims
            .as_ref()
    }

    /// Label for the authenticated caller: email, else the Cognito username.
    pub fn identity(&self) -> Option<&str> {
        let claims = self.claims()?;
        ["email", "cognito:username"]
            .iter()
            .find_map(|key| claims.get(*key).and_then(Value::as_str))
    }

    /// Decodes the body into a typed request with a non-null `message`.
    pub fn chat_request(&self) -> Result<ChatRequest> {
        let body = self
            .body
            .as_deref()
            .ok_or_else(|| Error::malformed_input("event has no body"))?;

        let value: Value =
            serde_json::from_str(body).map_err(|e| Error::malformed_input(e.to_string()))?;
        if !value.is_object() {
            return Err(Error::malformed_input("body must be a JSON object"));
        }

        let raw: RawChatRequest =
            serde_json::from_value(value).map_err(|e| Error::malformed_input(e.to_string()))?;
        let message = raw.message.ok_or(Error::MissingMessage)?;

        Ok(ChatRequest {
            message,
            conversation_history: raw.conversation_history,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct SuccessBody {
    pub success: bool,
    pub response: String,
    #[serde(rename = "conversationHistory")]
    pub conversation_history: Vec<Turn>,
}

#[derive(Debug, Serialize)]
pub struct FailureBody {
    pub success: bool,
    pub error: String,
}

/// Body of the transport-failure envelope. Carries no `success` flag.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// What the gateway receives back. `body` is itself a JSON document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseEnvelope {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    pub body: String,
}

impl ResponseEnvelope {
    pub fn success(reply: String, conversation_history: Vec<Turn>) -> Result<Self> {
        let body = SuccessBody {
            success: true,
            response: reply,
            conversation_history,
        };
        let body = serde_json::to_string_pretty(&body)
            .map_err(|e| Error::internal(format!("failed to encode response: {}", e)))?;

        Ok(Self {
            status_code: 200,
            headers: Some(cors_headers()),
            body,
        })
    }

    pub fn failure(error: &Error) -> Self {
        let body = FailureBody {
            success: false,
            error: error.to_string(),
        };
        Self {
            status_code: 500,
            headers: Some(cors_headers()),
            body: serde_json::to_string_pretty(&body).unwrap_or_else(|_| fallback_body(error)),
        }
    }

    pub fn transport_failure(error: &Error) -> Self {
        let body = ErrorResponse {
            error: error.to_string(),
        };
        Self {
            status_code: 500,
            headers: None,
            body: serde_json::to_string(&body).unwrap_or_else(|_| fallback_body(error)),
        }
    }

    pub fn from_error(error: &Error) -> Self {
        if error.is_transport() {
            Self::transport_failure(error)
        } else {
            Self::failure(error)
        }
    }
}

pub fn cors_headers() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
        (
            "Access-Control-Allow-Headers".to_string(),
            CORS_ALLOW_HEADERS.to_string(),
        ),
        (
            "Access-Control-Allow-Methods".to_string(),
            CORS_ALLOW_METHODS.to_string(),
        ),
    ])
}

fn fallback_body(error: &Error) -> String {
    serde_json::json!({ "error": error.to_string() }).to_string()
}
