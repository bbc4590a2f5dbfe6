use thiserror::Error;

/// Failure taxonomy for one verification call.
///
/// `InvalidSubmission` and `SourceUnreachable` messages are shown to the
/// caller verbatim; `ModelInvocation` and `SchemaViolation` are logged with
/// detail but collapse to a generic message at the action boundary.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("{0}")]
    InvalidSubmission(String),

    #[error("{0}")]
    SourceUnreachable(String),

    #[error("model invocation failed: {0}")]
    ModelInvocation(String),

    #[error("model output violated the schema contract: {0}")]
    SchemaViolation(String),

    #[error("{0}")]
    Unexpected(String),
}
