use serde::{Deserialize, Serialize};

pub const MAX_NEW_TOKENS: u32 = 512;
pub const TEMPERATURE: f32 = 0.7;
pub const TOP_P: f32 = 0.9;
pub const DO_SAMPLE: bool = true;

/// Payload POSTed to the inference endpoint. Generation parameters are fixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceRequest {
    pub prompt: String,
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub do_sample: bool,
}

/// The only field read from the endpoint's reply; anything else is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceResponse {
    pub generated_text: String,
}

impl InferenceRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            max_new_tokens: MAX_NEW_TOKENS,
            temperature: TEMPERATURE,
            top_p: TOP_P,
            do_sample: DO_SAMPLE,
        }
    }
}
