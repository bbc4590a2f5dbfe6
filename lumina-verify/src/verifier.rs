//! The verification invoker: one schema-constrained model call per request.
//!
//! Builds the fact-checking prompt from a [`VerifyRequest`], performs a
//! single `generate` call, pulls the JSON block out of the reply (models
//! love ```json fences), deserializes it strictly into a [`ModelVerdict`],
//! and post-validates the contract. Best-effort, at-most-once: nothing here
//! retries.

use lumina_llm::traits::{LlmClient, MediaPart};
use regex::Regex;

use crate::error::VerifyError;
use crate::schema::{validate_verdict, ModelVerdict, VerifyRequest, MAX_SOURCE_CONTEXT};

pub const FACT_CHECK_SYSTEM_PROMPT: &str = r#"
You are an expert fact-checker. Your task is to verify the provided information and produce a detailed, evidence-backed analysis.

Tasks:
1) Analyze all provided information: the text claim, any URL content, and any attached media. Synthesize them to understand the core assertion.
2) Search for evidence: imagine you are searching the web for credible sources (news articles, scientific papers, official reports) to verify or debunk the assertion.
3) Determine status: 'verified', 'debunked', 'partially-verified', or 'inconclusive'.
4) Determine claim type: 'static' (a factual statement that doesn't change, e.g. "The capital of France is Paris") or 'dynamic' (a statement about an evolving situation, e.g. "The stock market is currently crashing").
5) Write a detailed analysis explaining your reasoning and how the evidence supports your conclusion.
6) List up to 3 credible, real-world sources with URLs and a relevant snippet from each. The sources must be real and accessible. If you cannot find good sources, return an empty array. Do NOT invent sources.
7) Write a concise, one-paragraph summary of your findings, suitable for a general audience.

Output rules:
- Output STRICT JSON ONLY that matches the schema provided in the user message.
- Keep strings concise. No markdown, no prose outside fields.

If the provided URL content or media is inaccessible or irrelevant, note that in your analysis but still attempt to verify the text claim.
"#;

pub fn build_user_prompt(request: &VerifyRequest) -> String {
    let mut prompt = format!(
        r#"
Return STRICT JSON ONLY with this schema:

{{
  "status": "verified" | "debunked" | "partially-verified" | "inconclusive",
  "claim_type": "static" | "dynamic",
  "summary": string,
  "analysis": string,
  "source_context": [
    {{ "source": string, "snippet": string }}
  ]
}}

Constraints:
- "source" must be a valid URL.
- "source_context" holds at most {MAX_SOURCE_CONTEXT} entries; use [] when no credible source exists.

Claim: {claim}
"#,
        claim = request.claim
    );

    if let Some(url_content) = &request.url_content {
        prompt.push_str(&format!("\nURL Content:\n---\n{url_content}\n---\n"));
    }
    if request.media_data_uri.is_some() {
        prompt.push_str("\nA media file is attached to this message. Treat it as part of the claim.\n");
    }

    prompt
}

/// Main entry point used by the LLM-backed verification backend.
///
/// 1) Build the prompt and optional media attachment.
/// 2) Call the model exactly once.
/// 3) Extract, parse, and validate the verdict.
pub async fn run_verification(
    llm: &dyn LlmClient,
    request: &VerifyRequest,
) -> Result<ModelVerdict, VerifyError> {
    let media = match &request.media_data_uri {
        Some(uri) => Some(MediaPart::from_data_uri(uri).ok_or_else(|| {
            VerifyError::SchemaViolation("media_data_uri is not a valid data URI".to_string())
        })?),
        None => None,
    };

    let user_prompt = build_user_prompt(request);

    let resp = llm
        .generate(
            &user_prompt,
            Some(FACT_CHECK_SYSTEM_PROMPT),
            media.as_ref(),
            None,
            Some(0.2),
        )
        .await
        .map_err(|e| VerifyError::ModelInvocation(e.to_string()))?;

    let text = resp.text.trim();

    // Try to locate a JSON block; allow for models that wrap with ```json fences.
    let json_str = extract_json_block(text).unwrap_or_else(|| text.to_string());

    let verdict: ModelVerdict = serde_json::from_str(&json_str).map_err(|e| {
        tracing::warn!(error = %e, raw = %text, "model output failed to parse");
        VerifyError::SchemaViolation(format!("failed to parse verdict JSON: {e}"))
    })?;

    validate_verdict(&verdict).map_err(VerifyError::SchemaViolation)?;

    tracing::debug!(
        status = %verdict.status,
        claim_type = %verdict.claim_type,
        sources = verdict.source_context.len(),
        model = resp.model.as_deref().unwrap_or("-"),
        "verdict accepted"
    );

    Ok(verdict)
}

/// Try to extract a ```json ... ``` fenced block; fall back to the first
/// brace-delimited region.
fn extract_json_block(text: &str) -> Option<String> {
    let re_fence = Regex::new("(?s)```json\\s*(\\{.*?\\})\\s*```").ok()?;
    if let Some(caps) = re_fence.captures(text) {
        return Some(caps.get(1)?.as_str().to_string());
    }
    let re_plain = Regex::new("(?s)(\\{.*\\})").ok()?;
    re_plain
        .captures(text)
        .and_then(|c| c.get(1).map(|m| m.as_str().to_string()))
}
