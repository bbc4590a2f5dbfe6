//! The action boundary: the one operation the UI layer calls.
//!
//! Every failure is converted into a tagged [`ActionResponse`]; nothing
//! propagates past [`ClaimVerifier::verify_claim`]. Validation messages are
//! surfaced verbatim, model-side failures collapse to a generic message with
//! the detail kept in the logs.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use lumina_http::PageFetcher;

use crate::backend::{self, VerificationBackend};
use crate::error::VerifyError;
use crate::finish::finish;
use crate::normalize::{normalize, ClaimSubmission};
use crate::schema::VerificationResult;

const GENERIC_FAILURE: &str = "Verification failed. Please try again.";

/// Tagged result handed back to the UI layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<VerificationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActionResponse {
    fn ok(data: VerificationResult) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// The verification service: a backend strategy plus a page fetcher, wired
/// once at startup and reused for every call. Stateless between calls, so
/// independent verifications may run concurrently.
pub struct ClaimVerifier {
    backend: Arc<dyn VerificationBackend>,
    fetcher: PageFetcher,
}

impl ClaimVerifier {
    pub fn new(backend: Arc<dyn VerificationBackend>, fetcher: PageFetcher) -> Self {
        Self { backend, fetcher }
    }

    /// Wire the service from loaded configuration.
    pub fn from_config(config: &lumina_config::LuminaConfig) -> lumina_common::Result<Self> {
        let backend = backend::from_config(&config.backend)?;
        let fetcher = PageFetcher::new()
            .map_err(|e| lumina_common::LuminaError::Config(e.to_string()))?
            .with_timeout(Duration::from_secs(config.fetch.timeout_secs));
        Ok(Self::new(backend, fetcher))
    }

    /// Verify one submission: validate, normalize, invoke, finish.
    ///
    /// Short-circuits on the first failure. At most one page fetch and
    /// exactly one backend invocation per call; no retries, no caching.
    pub async fn verify_claim(&self, submission: &ClaimSubmission) -> ActionResponse {
        match self.run(submission).await {
            Ok(result) => {
                tracing::info!(
                    status = %result.status,
                    claim_type = %result.claim_type,
                    sources = result.source_context.len(),
                    "claim verified"
                );
                ActionResponse::ok(result)
            }
            Err(e) => self.presentable_failure(e),
        }
    }

    async fn run(&self, submission: &ClaimSubmission) -> Result<VerificationResult, VerifyError> {
        let request = normalize(submission, &self.fetcher).await?;
        let verdict = self.backend.verify(&request).await?;
        Ok(finish(verdict))
    }

    fn presentable_failure(&self, error: VerifyError) -> ActionResponse {
        match error {
            VerifyError::InvalidSubmission(msg) => ActionResponse::fail(msg),
            VerifyError::SourceUnreachable(msg) => ActionResponse::fail(msg),
            VerifyError::ModelInvocation(detail) => {
                tracing::error!(backend = %self.backend.name(), %detail, "model invocation failed");
                ActionResponse::fail(GENERIC_FAILURE)
            }
            VerifyError::SchemaViolation(detail) => {
                tracing::error!(backend = %self.backend.name(), %detail, "schema violation");
                ActionResponse::fail(GENERIC_FAILURE)
            }
            VerifyError::Unexpected(msg) => ActionResponse::fail(format!(
                "An unexpected error occurred during verification: {msg}"
            )),
        }
    }
}
