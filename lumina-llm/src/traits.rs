use async_trait::async_trait;
use lumina_common::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    pub text: String,
    pub model: Option<String>,
    pub tokens_used: Option<u32>,
}

/// An inline media attachment, decoded from an RFC 2397 data URI.
///
/// The payload stays base64-encoded: that is the form multimodal provider
/// APIs want it in, so there is no reason to round-trip through raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaPart {
    pub mime_type: String,
    pub base64_data: String,
}

impl MediaPart {
    /// Split a `data:<mime>;base64,<payload>` string into its components.
    ///
    /// ```
    /// use lumina_llm::traits::MediaPart;
    ///
    /// let part = MediaPart::from_data_uri("data:image/png;base64,aGk=").unwrap();
    /// assert_eq!(part.mime_type, "image/png");
    /// assert_eq!(part.base64_data, "aGk=");
    /// ```
    pub fn from_data_uri(uri: &str) -> Option<Self> {
        let rest = uri.strip_prefix("data:")?;
        let (mime_type, base64_data) = rest.split_once(";base64,")?;
        if mime_type.is_empty() || base64_data.is_empty() {
            return None;
        }
        Some(Self {
            mime_type: mime_type.to_string(),
            base64_data: base64_data.to_string(),
        })
    }
}

#[derive(thiserror::Error, Debug)]
pub enum LlmError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Rate limit exceeded")]
    RateLimit,

    #[error("Configuration error: {0}")]
    Config(String),
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generate a response to the given prompt with optional system prompt
    /// and optional inline media attachment.
    ///
    /// Providers without multimodal support log a warning and generate from
    /// the text prompt alone.
    async fn generate(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
        media: Option<&MediaPart>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
    ) -> Result<LlmResponse>;

    /// Check if the LLM service is available
    async fn health_check(&self) -> Result<bool>;

    /// Get the model name being used
    fn model_name(&self) -> &str;
}
