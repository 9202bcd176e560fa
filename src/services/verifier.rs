//! Verifier capability
//!
//! Verification never fails the caller: both entry points return verdicts
//! directly, and implementations degrade to a permissive default when they
//! cannot judge a pair. A verifier outage therefore costs confidence
//! information, never recommendations.

use async_trait::async_trait;

use crate::models::{SeedDescriptor, SongSuggestion, Track, VerificationResult};

/// Judges whether a resolved track fits the seed.
#[async_trait]
pub trait Verifier: Send + Sync {
    /// Verify a single (suggestion, resolved track) pair.
    async fn verify(
        &self,
        seed: &SeedDescriptor,
        suggestion: &SongSuggestion,
        track: &Track,
    ) -> VerificationResult;

    /// Verify a batch of pairs, returning one verdict per pair in input
    /// order. Implementations that can batch should override this with a
    /// single upstream call; the default simply verifies pair by pair.
    async fn verify_batch(
        &self,
        seed: &SeedDescriptor,
        pairs: &[(SongSuggestion, Track)],
    ) -> Vec<VerificationResult> {
        let mut results = Vec::with_capacity(pairs.len());
        for (suggestion, track) in pairs {
            results.push(self.verify(seed, suggestion, track).await);
        }
        results
    }
}
