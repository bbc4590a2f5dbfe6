mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lumina_http::PageFetcher;
use lumina_verify::backend::VerificationBackend;
use lumina_verify::{
    ClaimFile, ClaimSubmission, ClaimType, ClaimVerifier, ModelVerdict, SourceContext,
    VerificationStatus, VerifyError, VerifyRequest,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Backend stub that records every request it sees and serves a fixed
/// verdict.
struct RecordingBackend {
    verdict: ModelVerdict,
    calls: AtomicUsize,
    last_request: Mutex<Option<VerifyRequest>>,
}

impl RecordingBackend {
    fn new(verdict: ModelVerdict) -> Arc<Self> {
        Arc::new(Self {
            verdict,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_request(&self) -> Option<VerifyRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl VerificationBackend for RecordingBackend {
    async fn verify(&self, request: &VerifyRequest) -> Result<ModelVerdict, VerifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        Ok(self.verdict.clone())
    }

    fn name(&self) -> String {
        "recording".to_string()
    }
}

fn verdict(status: VerificationStatus, claim_type: ClaimType) -> ModelVerdict {
    ModelVerdict {
        status,
        claim_type,
        summary: "A short summary.".to_string(),
        analysis: "A longer analysis.".to_string(),
        source_context: vec![],
    }
}

fn make_verifier(backend: Arc<dyn VerificationBackend>) -> ClaimVerifier {
    ClaimVerifier::new(backend, PageFetcher::new().expect("fetcher should build"))
}

#[tokio::test]
async fn empty_submission_fails_without_invoking_backend() {
    common::init_test_tracing();
    let backend = RecordingBackend::new(verdict(VerificationStatus::Verified, ClaimType::Static));
    let verifier = make_verifier(backend.clone());

    let response = verifier.verify_claim(&ClaimSubmission::default()).await;

    assert!(!response.success);
    assert!(response
        .error
        .as_deref()
        .unwrap()
        .contains("claim, URL, or a file"));
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn malformed_url_fails_before_any_fetch() {
    common::init_test_tracing();
    let backend = RecordingBackend::new(verdict(VerificationStatus::Verified, ClaimType::Static));
    let verifier = make_verifier(backend.clone());

    let submission = ClaimSubmission {
        claim_url: Some("this is not a url".into()),
        ..Default::default()
    };
    let response = verifier.verify_claim(&submission).await;

    assert!(!response.success);
    assert!(response.error.as_deref().unwrap().contains("Invalid URL"));
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn great_wall_scenario_yields_static_disclaimer() {
    common::init_test_tracing();
    let backend = RecordingBackend::new(verdict(VerificationStatus::Debunked, ClaimType::Static));
    let verifier = make_verifier(backend.clone());

    let submission = ClaimSubmission {
        claim_text: Some("The Great Wall of China is visible from space.".into()),
        ..Default::default()
    };
    let response = verifier.verify_claim(&submission).await;

    assert!(response.success);
    let result = response.data.expect("success carries data");
    assert_eq!(result.status, VerificationStatus::Debunked);
    assert_eq!(
        result.disclaimer,
        "Our systems show the claim to be 'debunked'."
    );
    assert_eq!(backend.call_count(), 1);
    assert_eq!(
        backend.last_request().unwrap().claim,
        "The Great Wall of China is visible from space."
    );
}

#[tokio::test]
async fn dynamic_claims_get_the_volatility_disclaimer() {
    common::init_test_tracing();
    let backend = RecordingBackend::new(verdict(VerificationStatus::Verified, ClaimType::Dynamic));
    let verifier = make_verifier(backend);

    let submission = ClaimSubmission {
        claim_text: Some("The stock market is currently crashing.".into()),
        ..Default::default()
    };
    let response = verifier.verify_claim(&submission).await;

    assert_eq!(
        response.data.unwrap().disclaimer,
        "Our systems show the claim to be 'verified'. This status may change over time."
    );
}

#[tokio::test]
async fn url_content_is_truncated_with_provenance() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    let long_body = "x".repeat(6000);

    Mock::given(method("GET"))
        .and(path("/article"))
        .respond_with(ResponseTemplate::new(200).set_body_string(long_body))
        .expect(1)
        .mount(&server)
        .await;

    let backend = RecordingBackend::new(verdict(VerificationStatus::Inconclusive, ClaimType::Static));
    let verifier = make_verifier(backend.clone());

    let submission = ClaimSubmission {
        claim_url: Some(format!("{}/article", server.uri())),
        ..Default::default()
    };
    let response = verifier.verify_claim(&submission).await;
    assert!(response.success);

    let request = backend.last_request().unwrap();
    let url_content = request.url_content.expect("url content captured");
    let prefix = format!("Content from {}/article:\n\n", server.uri());
    assert!(url_content.starts_with(&prefix));
    assert!(url_content.ends_with("..."));
    // Prefix + first 5000 chars + ellipsis, never the full 6000-char body.
    assert_eq!(
        url_content.chars().count(),
        prefix.chars().count() + 5000 + 3
    );
}

#[tokio::test]
async fn unreachable_url_surfaces_source_message() {
    common::init_test_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/private"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let backend = RecordingBackend::new(verdict(VerificationStatus::Verified, ClaimType::Static));
    let verifier = make_verifier(backend.clone());

    let submission = ClaimSubmission {
        claim_url: Some(format!("{}/private", server.uri())),
        ..Default::default()
    };
    let response = verifier.verify_claim(&submission).await;

    assert!(!response.success);
    assert_eq!(
        response.error.as_deref(),
        Some("Could not access content from the provided URL. It may be private or inaccessible.")
    );
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn file_submission_reaches_backend_as_data_uri() {
    common::init_test_tracing();
    let backend = RecordingBackend::new(verdict(VerificationStatus::Inconclusive, ClaimType::Static));
    let verifier = make_verifier(backend.clone());

    let submission = ClaimSubmission {
        claim_file: Some(ClaimFile {
            media_type: "image/jpeg".into(),
            bytes: vec![0xFF, 0xD8, 0xFF],
        }),
        ..Default::default()
    };
    let response = verifier.verify_claim(&submission).await;
    assert!(response.success);

    let request = backend.last_request().unwrap();
    assert!(request
        .media_data_uri
        .as_deref()
        .unwrap()
        .starts_with("data:image/jpeg;base64,"));
    assert_eq!(request.claim, "");
}

#[tokio::test]
async fn backend_results_keep_sources_and_gain_disclaimer() {
    common::init_test_tracing();
    let mut v = verdict(VerificationStatus::PartiallyVerified, ClaimType::Dynamic);
    v.source_context = vec![SourceContext {
        source: "https://www.nasa.gov/feature/great-wall".into(),
        snippet: "Astronauts report the wall is not visible to the naked eye.".into(),
    }];
    let backend = RecordingBackend::new(v);
    let verifier = make_verifier(backend);

    let submission = ClaimSubmission {
        claim_text: Some("A claim with evidence.".into()),
        ..Default::default()
    };
    let result = verifier.verify_claim(&submission).await.data.unwrap();

    assert_eq!(result.source_context.len(), 1);
    assert_eq!(
        result.disclaimer,
        "Our systems show the claim to be 'partially-verified'. This status may change over time."
    );
}
