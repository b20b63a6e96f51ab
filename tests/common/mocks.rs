use async_trait::async_trait;
use chat_relay::{
    Error, Result,
    inference::{InferenceClient, InferenceRequest, InferenceResponse},
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum MockReply {
    Text(String),
    Transport(String),
    Shape(String),
}

/// Mock inference client that records every request it receives
#[derive(Debug, Clone)]
pub struct MockInferenceClient {
    pub reply: MockReply,
    pub requests: Arc<Mutex<Vec<(InferenceRequest, Option<Duration>)>>>,
}

impl MockInferenceClient {
    pub fn replying(text: &str) -> Self {
        Self::with_reply(MockReply::Text(text.to_string()))
    }

    pub fn with_reply(reply: MockReply) -> Self {
        Self {
            reply,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_requests(&self) -> Vec<(InferenceRequest, Option<Duration>)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.get_requests()
            .into_iter()
            .map(|(request, _)| request.prompt)
            .collect()
    }
}

#[async_trait]
impl InferenceClient for MockInferenceClient {
    async fn generate(
        &self,
        request: InferenceRequest,
        timeout: Option<Duration>,
    ) -> Result<InferenceResponse> {
        self.requests.lock().unwrap().push((request, timeout));

        match &self.reply {
            MockReply::Text(text) => Ok(InferenceResponse {
                generated_text: text.clone(),
            }),
            MockReply::Transport(msg) => Err(Error::transport(msg.clone())),
            MockReply::Shape(msg) => Err(Error::upstream_shape(msg.clone())),
        }
    }
}
