use super::types::*;
use crate::{Error, Result, config::InferenceConfig};
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::debug;

#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Sends one request. `timeout` bounds the whole exchange when set.
    async fn generate(
        &self,
        request: InferenceRequest,
        timeout: Option<Duration>,
    ) -> Result<InferenceResponse>;
}

pub struct HttpInferenceClient {
    client: Client,
    endpoint: Url,
}

impl HttpInferenceClient {
    pub fn new(config: &InferenceConfig) -> Result<Self> {
        let endpoint = Url::parse(config.endpoint.trim()).map_err(|e| {
            Error::config(format!(
                "Invalid inference endpoint '{}': {}",
                config.endpoint, e
            ))
        })?;

        let client = Client::builder()
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl InferenceClient for HttpInferenceClient {
    async fn generate(
        &self,
        request: InferenceRequest,
        timeout: Option<Duration>,
    ) -> Result<InferenceResponse> {
        debug!(
            "Sending {} prompt characters to {}",
            request.prompt.len(),
            self.endpoint
        );

        let mut builder = self.client.post(self.endpoint.clone()).json(&request);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        // Connection failures, timeouts and non-2xx statuses are all transport errors.
        let response = builder.send().await?.error_for_status()?;
        let bytes = response.bytes().await?;

        let reply: serde_json::Value = serde_json::from_slice(&bytes)
            .map_err(|e| Error::upstream_shape(format!("reply is not valid JSON: {}", e)))?;
        debug!("Response from inference endpoint: {}", reply);

        serde_json::from_value(reply).map_err(|e| Error::upstream_shape(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_client_creation() {
        let config = InferenceConfig {
            endpoint: "http://localhost:8080/generate".to_string(),
        };
        let client = HttpInferenceClient::new(&config).unwrap();
        assert_eq!(client.endpoint().as_str(), "http://localhost:8080/generate");
    }

    #[test]
    fn test_client_rejects_unparseable_endpoint() {
        let config = InferenceConfig {
            endpoint: "not a url".to_string(),
        };
        let err = HttpInferenceClient::new(&config).err().unwrap();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_request_carries_fixed_generation_parameters() {
        let request = InferenceRequest::new("user: hello");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["prompt"], "user: hello");
        assert_eq!(value["max_new_tokens"], 512);
        assert_eq!(value["do_sample"], true);
        assert!((value["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert!((value["top_p"].as_f64().unwrap() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_response_ignores_extra_fields() {
        let response: InferenceResponse = serde_json::from_str(
            r#"{"generated_text": "hi there", "details": {"tokens": 3}}"#,
        )
        .unwrap();
        assert_eq!(response.generated_text, "hi there");
    }

    #[test]
    fn test_response_requires_generated_text() {
        let result = serde_json::from_str::<InferenceResponse>(r#"{"text": "hi"}"#);
        assert!(result.is_err());
    }
}
