//! Catalog client capability
//!
//! The resolver and recommender consume the catalog through this trait so
//! tests can substitute fakes and the production client stays swappable.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Device, Track};

/// Catalog client errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Search, queue, and device operations against a music catalog.
///
/// Calls are stateless; implementations are shared behind `Arc` across a
/// whole recommendation request.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Search for tracks matching `query`, returning at most `limit`
    /// candidates in catalog ranking order.
    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>, CatalogError>;

    /// Append a track to the listener's playback queue.
    async fn add_to_queue(&self, uri: &str) -> Result<(), CatalogError>;

    /// List the playback devices known to the listener's account.
    async fn list_devices(&self) -> Result<Vec<Device>, CatalogError>;
}
