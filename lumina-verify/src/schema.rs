//! The two-sided schema contract for the verification call.
//!
//! [`VerifyRequest`] is the only shape the model adapter accepts;
//! [`ModelVerdict`] is the only shape it may return. Enum domains are
//! enforced by serde (an unknown variant is a deserialization error, never a
//! default), and [`validate_verdict`] applies the constraints serde cannot
//! express: the source cap and URL-shaped citations.

use serde::{Deserialize, Serialize};
use url::Url;

/// Maximum number of citations the model may return. More than this is a
/// contract violation, not something to truncate.
pub const MAX_SOURCE_CONTEXT: usize = 3;

/// Normalized input to the verification backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub claim: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_data_uri: Option<String>,
}

/// Verification status of a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerificationStatus {
    Verified,
    Debunked,
    PartiallyVerified,
    Inconclusive,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verified => "verified",
            Self::Debunked => "debunked",
            Self::PartiallyVerified => "partially-verified",
            Self::Inconclusive => "inconclusive",
        }
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a claim is a fixed fact or describes an evolving situation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimType {
    Static,
    Dynamic,
}

impl ClaimType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Dynamic => "dynamic",
        }
    }
}

impl std::fmt::Display for ClaimType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A credibility citation: where the evidence lives and what it says.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceContext {
    pub source: String,
    pub snippet: String,
}

/// The model-produced half of a verification result. The disclaimer is
/// synthesized locally and never comes from the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelVerdict {
    pub status: VerificationStatus,
    pub claim_type: ClaimType,
    pub summary: String,
    pub analysis: String,
    pub source_context: Vec<SourceContext>,
}

/// The complete, user-facing verification result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    pub status: VerificationStatus,
    pub claim_type: ClaimType,
    pub summary: String,
    pub analysis: String,
    pub source_context: Vec<SourceContext>,
    pub disclaimer: String,
}

/// Apply the output constraints serde cannot: at most
/// [`MAX_SOURCE_CONTEXT`] citations, each with a syntactically valid URL.
pub fn validate_verdict(verdict: &ModelVerdict) -> Result<(), String> {
    if verdict.source_context.len() > MAX_SOURCE_CONTEXT {
        return Err(format!(
            "source_context has {} entries, at most {} are allowed",
            verdict.source_context.len(),
            MAX_SOURCE_CONTEXT
        ));
    }

    for (idx, ctx) in verdict.source_context.iter().enumerate() {
        Url::parse(&ctx.source)
            .map_err(|e| format!("source_context[{idx}].source is not a valid URL: {e}"))?;
    }

    Ok(())
}
