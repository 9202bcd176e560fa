//! In-process fakes for the capability traits, with call counters for
//! asserting query budgets and retry behavior.
//!
//! Each test binary uses its own subset of these helpers.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tunequeue::models::{
    ArtistRef, Device, SeedDescriptor, SongSuggestion, Track, VerificationResult,
};
use tunequeue::services::catalog::{CatalogClient, CatalogError};
use tunequeue::services::suggester::{SuggestError, Suggester};
use tunequeue::services::verifier::Verifier;

/// Build a track with the fields the matching engine reads.
pub fn track(id: &str, name: &str, artists: &[&str], popularity: u32) -> Track {
    Track {
        id: id.to_string(),
        name: name.to_string(),
        artists: artists
            .iter()
            .map(|a| ArtistRef { name: (*a).to_string() })
            .collect(),
        popularity,
        uri: format!("catalog:track:{}", id),
        album: None,
    }
}

pub fn suggestion(title: &str, artists: &[&str]) -> SongSuggestion {
    SongSuggestion {
        title: title.to_string(),
        artists: artists.iter().map(|a| (*a).to_string()).collect(),
        genre: None,
        reason: None,
    }
}

/// One scripted response for a catalog search call.
pub enum SearchOutcome {
    Tracks(Vec<Track>),
    Error,
}

/// Fake catalog client that replays scripted search outcomes in call order
/// and counts every call per operation.
pub struct FakeCatalog {
    search_script: Mutex<Vec<SearchOutcome>>,
    pub queries_seen: Mutex<Vec<String>>,
    pub search_calls: AtomicUsize,
    pub queue_calls: AtomicUsize,
    pub device_calls: AtomicUsize,
    pub queued_uris: Mutex<Vec<String>>,
    /// Queue insertions that should fail before insertions start succeeding.
    pub queue_failures: AtomicUsize,
    pub devices: Mutex<Vec<Device>>,
}

impl FakeCatalog {
    /// Replays `script` one entry per search call; once the script runs dry,
    /// further searches return empty result sets.
    pub fn scripted(script: Vec<SearchOutcome>) -> Self {
        Self {
            search_script: Mutex::new(script),
            queries_seen: Mutex::new(Vec::new()),
            search_calls: AtomicUsize::new(0),
            queue_calls: AtomicUsize::new(0),
            device_calls: AtomicUsize::new(0),
            queued_uris: Mutex::new(Vec::new()),
            queue_failures: AtomicUsize::new(0),
            devices: Mutex::new(vec![Device {
                id: "d1".to_string(),
                name: "Desk".to_string(),
                is_active: true,
            }]),
        }
    }

    pub fn search_call_count(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogClient for FakeCatalog {
    async fn search_tracks(&self, query: &str, _limit: u32) -> Result<Vec<Track>, CatalogError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.queries_seen.lock().unwrap().push(query.to_string());

        let mut script = self.search_script.lock().unwrap();
        if script.is_empty() {
            return Ok(Vec::new());
        }
        match script.remove(0) {
            SearchOutcome::Tracks(tracks) => Ok(tracks),
            SearchOutcome::Error => Err(CatalogError::Network("connection reset".to_string())),
        }
    }

    async fn add_to_queue(&self, uri: &str) -> Result<(), CatalogError> {
        self.queue_calls.fetch_add(1, Ordering::SeqCst);

        let remaining = self.queue_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.queue_failures.store(remaining - 1, Ordering::SeqCst);
            return Err(CatalogError::Api(404, "No active device".to_string()));
        }

        self.queued_uris.lock().unwrap().push(uri.to_string());
        Ok(())
    }

    async fn list_devices(&self) -> Result<Vec<Device>, CatalogError> {
        self.device_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.devices.lock().unwrap().clone())
    }
}

/// Fake suggester that fails a configured number of times before returning
/// its canned suggestions.
pub struct FakeSuggester {
    suggestions: Vec<SongSuggestion>,
    pub failures_before_success: AtomicUsize,
    pub calls: AtomicUsize,
}

impl FakeSuggester {
    pub fn returning(suggestions: Vec<SongSuggestion>) -> Self {
        Self {
            suggestions,
            failures_before_success: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_first(failures: usize, suggestions: Vec<SongSuggestion>) -> Self {
        let fake = Self::returning(suggestions);
        fake.failures_before_success.store(failures, Ordering::SeqCst);
        fake
    }
}

#[async_trait]
impl Suggester for FakeSuggester {
    async fn suggest(
        &self,
        _seed: &SeedDescriptor,
        _count: usize,
    ) -> Result<Vec<SongSuggestion>, SuggestError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let remaining = self.failures_before_success.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures_before_success.store(remaining - 1, Ordering::SeqCst);
            return Err(SuggestError::MalformedPayload("scripted failure".to_string()));
        }

        Ok(self.suggestions.clone())
    }
}

/// Fake verifier returning a scripted verdict list regardless of input
/// length, so tests can exercise the orchestrator's padding.
pub struct FakeVerifier {
    verdicts: Mutex<Vec<VerificationResult>>,
    pub batch_calls: AtomicUsize,
    pub single_calls: AtomicUsize,
}

impl FakeVerifier {
    pub fn with_verdicts(verdicts: Vec<VerificationResult>) -> Self {
        Self {
            verdicts: Mutex::new(verdicts),
            batch_calls: AtomicUsize::new(0),
            single_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Verifier for FakeVerifier {
    async fn verify(
        &self,
        _seed: &SeedDescriptor,
        _suggestion: &SongSuggestion,
        _track: &Track,
    ) -> VerificationResult {
        self.single_calls.fetch_add(1, Ordering::SeqCst);
        VerificationResult::permissive("single verify")
    }

    async fn verify_batch(
        &self,
        _seed: &SeedDescriptor,
        _pairs: &[(SongSuggestion, Track)],
    ) -> Vec<VerificationResult> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        self.verdicts.lock().unwrap().clone()
    }
}

pub fn accept(confidence: f64) -> VerificationResult {
    VerificationResult {
        is_valid: true,
        confidence_score: confidence,
        reason: "good match".to_string(),
    }
}

pub fn reject(reason: &str) -> VerificationResult {
    VerificationResult {
        is_valid: false,
        confidence_score: 0.2,
        reason: reason.to_string(),
    }
}
