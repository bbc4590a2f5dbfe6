//! Provider-agnostic LLM integration for Lumina Fact.
//!
//! This crate exposes a common [`traits::LlmClient`] interface and concrete
//! provider implementations for Gemini and OpenAI. It also provides a
//! convenience function to initialize a client from a
//! [`lumina_common::LlmConfig`].
//!
//! # Examples
//! ```no_run
//! use lumina_common::{LlmConfig, Result};
//! use lumina_llm::ensure_llm_ready;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! let cfg = LlmConfig::None; // or provider variant under appropriate features
//! let client = ensure_llm_ready(&cfg)?;
//! assert!(!client.model_name().is_empty());
//! # Ok(())
//! # }
//! ```
pub mod gemini;
pub mod openai;
pub mod traits;

use lumina_common::{LlmConfig, LuminaError};
use std::sync::Arc;
use traits::LlmClient;

/// Default model recommendations for fact-checking tasks
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Build an LLM client from configuration.
pub fn ensure_llm_ready(
    config: &LlmConfig,
) -> lumina_common::Result<Arc<dyn LlmClient + Send + Sync + 'static>> {
    match config {
        #[cfg(feature = "gemini")]
        LlmConfig::Gemini { api_key, model } => {
            let client = gemini::GeminiClient::new(api_key.clone(), model.clone())?;
            Ok(Arc::new(client))
        }
        #[cfg(feature = "openai")]
        LlmConfig::OpenAi {
            api_key,
            model,
            base_url,
        } => {
            let client =
                openai::OpenAiClient::new(api_key.clone(), model.clone(), base_url.clone())?;
            Ok(Arc::new(client))
        }
        LlmConfig::None => Err(LuminaError::Config("No LLM configured".to_string())),
        #[allow(unreachable_patterns)]
        _ => Err(LuminaError::Config("LLM provider not enabled".to_string())),
    }
}
