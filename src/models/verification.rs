//! Verifier verdicts

use serde::{Deserialize, Serialize};

/// Verdict for one (suggestion, resolved track) pair.
///
/// Verification never fails the pipeline: error paths inside a verifier
/// degrade to [`VerificationResult::permissive`] instead of propagating.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Whether the pair should be kept in the final list
    pub is_valid: bool,
    /// Verifier confidence in [0, 1]
    pub confidence_score: f64,
    /// One-line explanation of the verdict
    pub reason: String,
}

impl VerificationResult {
    /// Neutral pass-through verdict used when a verifier cannot judge a pair.
    pub fn permissive(reason: impl Into<String>) -> Self {
        Self {
            is_valid: true,
            confidence_score: 0.5,
            reason: reason.into(),
        }
    }

    /// Default verdict for batch slots the verifier failed to fill.
    pub fn missing() -> Self {
        Self::permissive("Missing result")
    }
}
