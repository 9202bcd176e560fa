//! Suggester capability

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{SeedDescriptor, SongSuggestion};

/// Suggester errors. All of these are retried by the orchestrator up to its
/// retry budget; exhausting the budget fails the whole request.
#[derive(Debug, Error)]
pub enum SuggestError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Suggester returned an empty response")]
    EmptyResponse,

    #[error("Malformed suggestion payload: {0}")]
    MalformedPayload(String),
}

/// Produces song suggestions for a seed.
#[async_trait]
pub trait Suggester: Send + Sync {
    /// Request `count` suggestions tied to `seed`.
    ///
    /// One attempt per call; retrying is the caller's responsibility.
    async fn suggest(
        &self,
        seed: &SeedDescriptor,
        count: usize,
    ) -> Result<Vec<SongSuggestion>, SuggestError>;
}
