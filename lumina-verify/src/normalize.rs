//! Input normalization: heterogeneous submissions become one
//! [`VerifyRequest`].
//!
//! Validation happens before any I/O; the only side effect here is the
//! single page fetch performed when a URL was supplied.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use lumina_http::PageFetcher;
use url::Url;

use crate::error::VerifyError;
use crate::schema::VerifyRequest;

/// Character budget for scraped URL content embedded into the model prompt.
pub const URL_CONTENT_CHAR_BUDGET: usize = 5000;

/// An uploaded file with its declared media type.
#[derive(Debug, Clone)]
pub struct ClaimFile {
    pub media_type: String,
    pub bytes: Vec<u8>,
}

/// A raw submission as received from the UI layer.
#[derive(Debug, Clone, Default)]
pub struct ClaimSubmission {
    pub claim_text: Option<String>,
    pub claim_url: Option<String>,
    pub claim_file: Option<ClaimFile>,
}

impl ClaimSubmission {
    fn has_text(&self) -> bool {
        self.claim_text.as_deref().is_some_and(|t| !t.is_empty())
    }

    fn has_url(&self) -> bool {
        self.claim_url.as_deref().is_some_and(|u| !u.is_empty())
    }

    fn has_file(&self) -> bool {
        self.claim_file.as_ref().is_some_and(|f| !f.bytes.is_empty())
    }
}

/// Check presence and URL shape without touching the network.
///
/// Returns the parsed URL (when one was supplied) so the fetch step does not
/// parse twice.
pub fn validate_submission(submission: &ClaimSubmission) -> Result<Option<Url>, VerifyError> {
    if !submission.has_text() && !submission.has_url() && !submission.has_file() {
        return Err(VerifyError::InvalidSubmission(
            "Please provide a claim, URL, or a file.".to_string(),
        ));
    }

    if submission.has_url() {
        let raw = submission.claim_url.as_deref().unwrap_or_default();
        let parsed = Url::parse(raw).map_err(|_| {
            VerifyError::InvalidSubmission(format!("Invalid URL: {raw}"))
        })?;
        return Ok(Some(parsed));
    }

    Ok(None)
}

/// Produce the normalized request, fetching URL content when present.
///
/// The fetched body is cut to the first [`URL_CONTENT_CHAR_BUDGET`]
/// characters, marked with a trailing ellipsis, and prefixed with a
/// provenance line naming the source URL.
pub async fn normalize(
    submission: &ClaimSubmission,
    fetcher: &PageFetcher,
) -> Result<VerifyRequest, VerifyError> {
    let claim_url = validate_submission(submission)?;

    let mut request = VerifyRequest {
        claim: submission
            .claim_text
            .clone()
            .unwrap_or_default(),
        url_content: None,
        media_data_uri: None,
    };

    if let Some(url) = claim_url {
        let body = fetcher.fetch_text(&url).await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, "claim URL fetch failed");
            VerifyError::SourceUnreachable(
                "Could not access content from the provided URL. It may be private or inaccessible."
                    .to_string(),
            )
        })?;
        request.url_content = Some(format!(
            "Content from {}:\n\n{}...",
            url,
            truncate_chars(&body, URL_CONTENT_CHAR_BUDGET)
        ));
    }

    if let Some(file) = submission.claim_file.as_ref().filter(|f| !f.bytes.is_empty()) {
        request.media_data_uri = Some(format!(
            "data:{};base64,{}",
            file.media_type,
            BASE64.encode(&file.bytes)
        ));
    }

    Ok(request)
}

fn truncate_chars(s: &str, budget: usize) -> &str {
    match s.char_indices().nth(budget) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
