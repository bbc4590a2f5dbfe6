//! Verification backend strategies, chosen once at startup.
//!
//! The original deployment toggled between a mock and a live API through a
//! module-level env check. Here the choice is an injected capability: the
//! action boundary holds one [`VerificationBackend`] for its whole life.

use async_trait::async_trait;
use lumina_llm::traits::LlmClient;
use std::sync::Arc;

use crate::error::VerifyError;
use crate::schema::{ClaimType, ModelVerdict, VerificationStatus, VerifyRequest};
use crate::verifier;

#[async_trait]
pub trait VerificationBackend: Send + Sync {
    /// Produce a schema-valid verdict for the normalized request, or fail.
    /// At-most-once: implementations must not retry.
    async fn verify(&self, request: &VerifyRequest) -> Result<ModelVerdict, VerifyError>;

    /// Human-readable backend identifier for logs.
    fn name(&self) -> String;
}

/// Live backend: one generative-model call per request.
pub struct LlmBackend {
    llm: Arc<dyn LlmClient + Send + Sync>,
}

impl LlmBackend {
    pub fn new(llm: Arc<dyn LlmClient + Send + Sync>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl VerificationBackend for LlmBackend {
    async fn verify(&self, request: &VerifyRequest) -> Result<ModelVerdict, VerifyError> {
        verifier::run_verification(self.llm.as_ref(), request).await
    }

    fn name(&self) -> String {
        format!("llm:{}", self.llm.model_name())
    }
}

/// Offline backend serving a fixed verdict. Replaces the original "mock
/// mode" for demos and tests; no network is touched.
pub struct CannedBackend {
    verdict: ModelVerdict,
}

impl CannedBackend {
    pub fn new(verdict: ModelVerdict) -> Self {
        Self { verdict }
    }
}

impl Default for CannedBackend {
    fn default() -> Self {
        Self::new(ModelVerdict {
            status: VerificationStatus::Inconclusive,
            claim_type: ClaimType::Static,
            summary: "No live verification backend is configured.".to_string(),
            analysis: "This result was produced by the canned offline backend; the claim \
                       was not checked against any model or source."
                .to_string(),
            source_context: vec![],
        })
    }
}

#[async_trait]
impl VerificationBackend for CannedBackend {
    async fn verify(&self, _request: &VerifyRequest) -> Result<ModelVerdict, VerifyError> {
        Ok(self.verdict.clone())
    }

    fn name(&self) -> String {
        "canned".to_string()
    }
}

/// Build the configured backend strategy.
pub fn from_config(
    config: &lumina_config::BackendConfig,
) -> lumina_common::Result<Arc<dyn VerificationBackend>> {
    use lumina_common::LlmConfig;
    use lumina_config::BackendConfig;

    let backend: Arc<dyn VerificationBackend> = match config {
        BackendConfig::Gemini { model, api_key } => {
            let llm = lumina_llm::ensure_llm_ready(&LlmConfig::Gemini {
                api_key: api_key.clone(),
                model: model.clone(),
            })?;
            Arc::new(LlmBackend::new(llm))
        }
        BackendConfig::Openai {
            model,
            api_key,
            endpoint,
        } => {
            let llm = lumina_llm::ensure_llm_ready(&LlmConfig::OpenAi {
                api_key: api_key.clone(),
                model: model.clone(),
                base_url: Some(endpoint.clone()),
            })?;
            Arc::new(LlmBackend::new(llm))
        }
        BackendConfig::Canned => Arc::new(CannedBackend::default()),
    };

    tracing::info!(backend = %backend.name(), "verification backend ready");
    Ok(backend)
}
