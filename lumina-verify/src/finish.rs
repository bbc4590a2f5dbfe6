//! Result finishing: attach the deterministic disclaimer.

use crate::schema::{ClaimType, ModelVerdict, VerificationResult, VerificationStatus};

/// Synthesize the disclaimer from status and claim type. Never
/// model-generated; callers rely on this exact wording.
pub fn build_disclaimer(status: VerificationStatus, claim_type: ClaimType) -> String {
    let mut disclaimer = format!("Our systems show the claim to be '{status}'.");
    if claim_type == ClaimType::Dynamic {
        disclaimer.push_str(" This status may change over time.");
    }
    disclaimer
}

/// Promote a schema-valid verdict to the final result.
pub fn finish(verdict: ModelVerdict) -> VerificationResult {
    let disclaimer = build_disclaimer(verdict.status, verdict.claim_type);
    VerificationResult {
        status: verdict.status,
        claim_type: verdict.claim_type,
        summary: verdict.summary,
        analysis: verdict.analysis,
        source_context: verdict.source_context,
        disclaimer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_claims_get_the_base_sentence_only() {
        assert_eq!(
            build_disclaimer(VerificationStatus::Debunked, ClaimType::Static),
            "Our systems show the claim to be 'debunked'."
        );
    }

    #[test]
    fn dynamic_claims_get_the_volatility_sentence() {
        assert_eq!(
            build_disclaimer(VerificationStatus::Verified, ClaimType::Dynamic),
            "Our systems show the claim to be 'verified'. This status may change over time."
        );
    }

    #[test]
    fn every_status_renders_its_literal_value() {
        for (status, expected) in [
            (VerificationStatus::Verified, "'verified'"),
            (VerificationStatus::Debunked, "'debunked'"),
            (VerificationStatus::PartiallyVerified, "'partially-verified'"),
            (VerificationStatus::Inconclusive, "'inconclusive'"),
        ] {
            let disclaimer = build_disclaimer(status, ClaimType::Static);
            assert!(disclaimer.contains(expected), "{disclaimer}");
        }
    }
}
