use crate::traits::{LlmClient, LlmResponse, MediaPart};
use async_trait::async_trait;
use lumina_common::{LuminaError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// OpenAI Responses API client.
///
/// Text-only fallback provider. Media attachments are dropped with a
/// warning; the verification prompt already tells the model to note
/// unavailable media in its analysis.
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ResponsesApiRequest {
    model: String,
    input: String,
    instructions: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct ResponsesApiResponse {
    model: String,
    #[serde(default)]
    output: Vec<ResponseMessage>,
}

/// One element in the `output` array
#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Vec<ResponseContent>,
}

/// One part of the message `content`
#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

impl OpenAiClient {
    /// Create a new client for the given API key and model. `base_url`
    /// overrides the public endpoint for gateways and tests.
    pub fn new(api_key: String, model: String, base_url: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| LuminaError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = base_url
            .unwrap_or_else(|| OPENAI_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client,
            base_url,
            api_key,
            model,
        })
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn generate(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
        media: Option<&MediaPart>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
    ) -> Result<LlmResponse> {
        if let Some(part) = media {
            tracing::warn!(
                mime_type = %part.mime_type,
                "OpenAI backend is text-only; dropping media attachment"
            );
        }

        let instructions = match system_prompt {
            Some(s) => s.to_string(),
            None => "You are an objective, unbiased researcher.".to_string(),
        };

        let req = ResponsesApiRequest {
            model: self.model.clone(),
            input: prompt.to_string(),
            instructions,
            max_output_tokens: max_tokens,
            temperature,
        };

        let url = format!("{}/responses", self.base_url);
        tracing::debug!("Sending OpenAI request to: {}", url);

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()
            .await
            .map_err(|e| LuminaError::Provider(format!("OpenAI request failed: {}", e)))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp.text().await.unwrap_or_default();

            return Err(match status.as_u16() {
                429 => LuminaError::Provider("Rate limit exceeded".to_string()),
                401 => LuminaError::Provider("Invalid API key".to_string()),
                _ => LuminaError::Provider(format!(
                    "OpenAI API error ({}): {}",
                    status, error_text
                )),
            });
        }

        let parsed: ResponsesApiResponse = resp.json().await.map_err(|e| {
            LuminaError::Provider(format!("Failed to parse OpenAI response: {}", e))
        })?;

        let text = parsed
            .output
            .iter()
            .flat_map(|msg| &msg.content)
            .find(|c| c.kind == "output_text")
            .map(|c| c.text.clone())
            .unwrap_or_default();

        Ok(LlmResponse {
            text,
            model: Some(parsed.model),
            tokens_used: None,
        })
    }

    async fn health_check(&self) -> Result<bool> {
        let test_prompt = "Respond with just 'OK'";

        match self
            .generate(test_prompt, None, None, Some(5), Some(0.1))
            .await
        {
            Ok(_) => Ok(true),
            Err(e) => {
                tracing::warn!("OpenAI health check failed: {}", e);
                Ok(false)
            }
        }
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
