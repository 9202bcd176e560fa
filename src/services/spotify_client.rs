//! Spotify Web API catalog client
//!
//! Implements the [`CatalogClient`] capability over the Spotify Web API
//! using a caller-supplied bearer access token. Token acquisition and
//! refresh are the embedding application's concern; this client only
//! attaches the token it was constructed with.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::models::{Device, Track};
use crate::services::catalog::{CatalogClient, CatalogError};

const SPOTIFY_BASE_URL: &str = "https://api.spotify.com/v1";
const USER_AGENT: &str = "tunequeue/0.1.0";
const REQUEST_TIMEOUT_SECS: u64 = 30;

// Queue insertions in quick succession trip the API's rate limiting, so all
// calls are spaced by a minimum interval.
const RATE_LIMIT_MS: u64 = 100;

/// Minimum-interval rate limiter.
struct RateLimiter {
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval_ms: u64) -> Self {
        Self {
            last_request: Mutex::new(None),
            min_interval: Duration::from_millis(min_interval_ms),
        }
    }

    /// Wait if necessary to comply with the interval.
    async fn wait(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                tracing::debug!("Rate limiting: waiting {:?}", wait_time);
                tokio::time::sleep(wait_time).await;
            }
        }

        *last = Some(Instant::now());
    }
}

/// Spotify Web API client.
pub struct SpotifyClient {
    http_client: reqwest::Client,
    access_token: String,
    base_url: String,
    rate_limiter: RateLimiter,
}

impl SpotifyClient {
    pub fn new(access_token: impl Into<String>) -> Result<Self, CatalogError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            access_token: access_token.into(),
            base_url: SPOTIFY_BASE_URL.to_string(),
            rate_limiter: RateLimiter::new(RATE_LIMIT_MS),
        })
    }

    /// Point the client at a different base URL. Intended for tests against
    /// a local stand-in server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn map_status(status: reqwest::StatusCode, body: String) -> CatalogError {
        if status.as_u16() == 429 {
            CatalogError::RateLimited
        } else {
            CatalogError::Api(status.as_u16(), body)
        }
    }
}

#[async_trait]
impl CatalogClient for SpotifyClient {
    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>, CatalogError> {
        self.rate_limiter.wait().await;

        let url = format!("{}/search", self.base_url);

        tracing::debug!(query = %query, limit, "Searching catalog");

        let limit_param = limit.to_string();
        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[
                ("q", query),
                ("type", "track"),
                ("limit", limit_param.as_str()),
            ])
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::map_status(status, body));
        }

        let payload: SearchResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))?;

        let tracks = payload.tracks.map(|t| t.items).unwrap_or_default();

        tracing::debug!(query = %query, results = tracks.len(), "Catalog search complete");

        Ok(tracks)
    }

    async fn add_to_queue(&self, uri: &str) -> Result<(), CatalogError> {
        self.rate_limiter.wait().await;

        let url = format!("{}/me/player/queue", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.access_token)
            .query(&[("uri", uri)])
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::map_status(status, body));
        }

        tracing::debug!(uri = %uri, "Track added to playback queue");

        Ok(())
    }

    async fn list_devices(&self) -> Result<Vec<Device>, CatalogError> {
        self.rate_limiter.wait().await;

        let url = format!("{}/me/player/devices", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::map_status(status, body));
        }

        let payload: DevicesResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))?;

        Ok(payload.devices)
    }
}

/// Wire shape of the search endpoint.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    tracks: Option<TrackPage>,
}

#[derive(Debug, Deserialize)]
struct TrackPage {
    #[serde(default)]
    items: Vec<Track>,
}

/// Wire shape of the devices endpoint.
#[derive(Debug, Deserialize)]
struct DevicesResponse {
    #[serde(default)]
    devices: Vec<Device>,
}
