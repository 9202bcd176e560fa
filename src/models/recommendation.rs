//! Assembled recommendation results

use serde::{Deserialize, Serialize};

use crate::models::{SongSuggestion, Track, VerificationResult};

/// Per-request options for the recommender.
#[derive(Debug, Clone)]
pub struct RecommendOptions {
    /// Number of suggestions to request from the suggester
    pub count: usize,
    /// Run the AI verification pass over resolved suggestions
    pub verify: bool,
    /// Add accepted tracks to the listener's playback queue
    pub enqueue: bool,
}

impl Default for RecommendOptions {
    fn default() -> Self {
        Self {
            count: 5,
            verify: true,
            enqueue: false,
        }
    }
}

/// One accepted recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    /// The suggestion as produced by the suggester
    pub suggestion: SongSuggestion,
    /// The catalog track it resolved to
    pub track: Track,
    /// Verifier verdict, `None` when verification was disabled
    pub verification: Option<VerificationResult>,
    /// Whether the track was added to the playback queue
    pub in_queue: bool,
}

/// Outcome of one recommendation request.
///
/// Output order follows the suggester's original ordering, minus suggestions
/// that failed to resolve or were rejected by the verifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationReport {
    /// The resolved seed track
    pub seed_track: Track,
    /// Accepted recommendations in suggester order
    pub recommendations: Vec<Recommendation>,
    /// Suggestions requested from the suggester
    pub total_suggested: usize,
    /// Suggestions that resolved to a catalog track
    pub total_resolved: usize,
    /// Resolved suggestions the verifier rejected
    pub total_rejected: usize,
}

/// Outcome of a queue pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueueReport {
    /// Tracks successfully queued
    pub queued: usize,
    /// Tracks that failed to queue after the retry
    pub failed: usize,
    /// Name of the device queueing targeted, when one was found
    pub device: Option<String>,
}
