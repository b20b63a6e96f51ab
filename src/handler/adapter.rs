use super::types::{InboundEvent, ResponseEnvelope};
use crate::{
    Error, Result,
    config::Config,
    history::{self, Turn},
    inference::{HttpInferenceClient, InferenceClient, InferenceRequest},
};
use serde_json::Value;
use std::time::{Duration, SystemTime};
use tracing::{debug, error, info};

/// Turns one chat event into one inference call and one response envelope.
pub struct RequestAdapter {
    client: Box<dyn InferenceClient>,
}

impl RequestAdapter {
    pub fn new(config: &Config) -> Result<Self> {
        let client = HttpInferenceClient::new(&config.inference)?;
        info!("Forwarding prompts to {}", client.endpoint());
        Ok(Self::with_client(Box::new(client)))
    }

    pub fn with_client(client: Box<dyn InferenceClient>) -> Self {
        Self { client }
    }

    /// Never fails: every error is rendered into a 500 envelope. Transport
    /// errors get the bare `{"error": ...}` body without headers, everything
    /// else gets `{"success": false, "error": ...}` with the CORS headers.
    pub async fn handle(&self, event: Value, deadline: Option<SystemTime>) -> ResponseEnvelope {
        debug!("Received event: {}", event);

        self.process(event, deadline).await.unwrap_or_else(|e| {
            if e.is_transport() {
                error!("Inference endpoint call failed: {}", e);
            } else {
                error!("Error: {}", e);
            }
            ResponseEnvelope::from_error(&e)
        })
    }

    async fn process(
        &self,
        event: Value,
        deadline: Option<SystemTime>,
    ) -> Result<ResponseEnvelope> {
        let event = InboundEvent::from_value(event)?;

        if let Some(identity) = event.identity() {
            info!("Authenticated user: {}", identity);
        }

        let request = event.chat_request()?;
        info!("Processing message: {}", request.message);

        let mut turns =
            history::with_user_message(&request.conversation_history, &request.message);
        let payload = InferenceRequest::new(history::flatten(&turns));

        let timeout = remaining_time(deadline, SystemTime::now())?;
        let reply = self.client.generate(payload, timeout).await?;

        turns.push(Turn::assistant(reply.generated_text.as_str()));
        ResponseEnvelope::success(reply.generated_text, turns)
    }
}

/// Time left before the runtime kills the invocation, used as the request
/// timeout. An elapsed deadline counts as a transport failure.
pub fn remaining_time(deadline: Option<SystemTime>, now: SystemTime) -> Result<Option<Duration>> {
    let Some(deadline) = deadline else {
        return Ok(None);
    };

    match deadline.duration_since(now) {
        Ok(remaining) if !remaining.is_zero() => Ok(Some(remaining)),
        _ => Err(Error::transport(
            "invocation deadline elapsed before the inference endpoint was called",
        )),
    }
}
