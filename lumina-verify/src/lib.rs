//! Claim-verification pipeline for Lumina Fact.
//!
//! A submission (text, URL, file) is normalized into a single request,
//! handed to a schema-constrained verification backend, and finished with a
//! deterministic disclaimer. The pipeline is stateless and reentrant; each
//! call performs at most one page fetch and exactly one backend invocation.
//!
//! # Examples
//! ```no_run
//! use std::sync::Arc;
//! use lumina_http::PageFetcher;
//! use lumina_verify::{backend::CannedBackend, ClaimSubmission, ClaimVerifier};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let verifier = ClaimVerifier::new(
//!     Arc::new(CannedBackend::default()),
//!     PageFetcher::new().unwrap(),
//! );
//!
//! let submission = ClaimSubmission {
//!     claim_text: Some("The Great Wall of China is visible from space.".into()),
//!     ..Default::default()
//! };
//! let response = verifier.verify_claim(&submission).await;
//! assert!(response.success);
//! # }
//! ```

pub mod action;
pub mod backend;
pub mod error;
pub mod finish;
pub mod normalize;
pub mod schema;
pub mod verifier;

pub use action::{ActionResponse, ClaimVerifier};
pub use error::VerifyError;
pub use normalize::{ClaimFile, ClaimSubmission};
pub use schema::{
    ClaimType, ModelVerdict, SourceContext, VerificationResult, VerificationStatus, VerifyRequest,
};
