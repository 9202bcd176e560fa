//! Recommendation orchestration
//!
//! Sequences one recommendation request: resolve the seed, ask the suggester
//! for candidates, resolve each suggestion on the catalog, optionally run
//! the verification pass, and optionally enqueue the accepted tracks. A bad
//! suggestion or a failed verification never fails the request; only seed
//! resolution failure and suggester exhaustion are fatal.

use std::sync::Arc;

use futures::future::join_all;

use crate::config::RecommenderConfig;
use crate::error::{Error, Result};
use crate::models::{
    Device, QueueReport, Recommendation, RecommendationReport, RecommendOptions, SeedDescriptor,
    SongSuggestion, Track, VerificationResult,
};
use crate::services::catalog::CatalogClient;
use crate::services::suggester::Suggester;
use crate::services::track_resolver::TrackResolver;
use crate::services::verifier::Verifier;

/// Orchestrates suggestion, resolution, verification, and queueing.
///
/// All collaborators are injected at construction so tests can substitute
/// fakes; the orchestrator holds no global state.
pub struct Recommender {
    catalog: Arc<dyn CatalogClient>,
    suggester: Arc<dyn Suggester>,
    verifier: Option<Arc<dyn Verifier>>,
    resolver: TrackResolver,
    config: RecommenderConfig,
}

impl Recommender {
    pub fn new(
        catalog: Arc<dyn CatalogClient>,
        suggester: Arc<dyn Suggester>,
        verifier: Option<Arc<dyn Verifier>>,
        config: RecommenderConfig,
    ) -> Self {
        let resolver = TrackResolver::new(Arc::clone(&catalog), config.resolver);
        Self {
            catalog,
            suggester,
            verifier,
            resolver,
            config,
        }
    }

    /// Run one full recommendation request for a freeform seed query.
    pub async fn recommend(
        &self,
        seed_query: &str,
        options: &RecommendOptions,
    ) -> Result<RecommendationReport> {
        // Seed resolution failure is fatal: without seed metadata neither
        // the suggester nor the verifier has anything to anchor on.
        let seed_track = self
            .resolver
            .resolve(seed_query, None)
            .await
            .ok_or_else(|| Error::SeedNotFound(seed_query.to_string()))?;

        let seed = SeedDescriptor::from_track(&seed_track);

        tracing::info!(
            seed = %seed.title,
            artists = %seed.artist_display(),
            genre = ?seed.genre,
            "Seed resolved"
        );

        let suggestions = self.suggest_with_retries(&seed, options.count).await?;
        let total_suggested = suggestions.len();

        let resolved = self.resolve_suggestions(suggestions).await;
        let total_resolved = resolved.len();

        let verifications = match (&self.verifier, options.verify, resolved.is_empty()) {
            (Some(verifier), true, false) => {
                let verdicts = verifier.verify_batch(&seed, &resolved).await;
                Some(pad_verdicts(verdicts, resolved.len()))
            }
            _ => None,
        };

        let (mut recommendations, total_rejected) = assemble(resolved, verifications);

        if options.enqueue && !recommendations.is_empty() {
            let queue_report = self.enqueue(&mut recommendations).await;
            tracing::info!(
                queued = queue_report.queued,
                failed = queue_report.failed,
                device = ?queue_report.device,
                "Queue pass complete"
            );
        }

        tracing::info!(
            suggested = total_suggested,
            resolved = total_resolved,
            accepted = recommendations.len(),
            rejected = total_rejected,
            "Recommendation request complete"
        );

        Ok(RecommendationReport {
            seed_track,
            recommendations,
            total_suggested,
            total_resolved,
            total_rejected,
        })
    }

    /// Call the suggester within the bounded retry budget.
    async fn suggest_with_retries(
        &self,
        seed: &SeedDescriptor,
        count: usize,
    ) -> Result<Vec<SongSuggestion>> {
        let retry = self.config.suggester_retry;
        let max_attempts = retry.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            match self.suggester.suggest(seed, count).await {
                Ok(suggestions) => return Ok(suggestions),
                Err(e) => {
                    tracing::warn!(
                        seed = %seed.title,
                        attempt,
                        max_attempts,
                        error = %e,
                        "Suggestion attempt failed"
                    );
                    if attempt >= max_attempts {
                        return Err(Error::SuggestionsExhausted {
                            attempts: attempt,
                            source: e,
                        });
                    }
                    tokio::time::sleep(retry.backoff()).await;
                }
            }
        }
    }

    /// Resolve all suggestions concurrently, pairing results back to their
    /// suggestion by stable index so output order stays deterministic.
    /// Unresolved suggestions are dropped with a log line, not retried.
    async fn resolve_suggestions(
        &self,
        suggestions: Vec<SongSuggestion>,
    ) -> Vec<(SongSuggestion, Track)> {
        let resolutions = join_all(suggestions.iter().map(|suggestion| {
            let artists = (!suggestion.artists.is_empty()).then_some(suggestion.artists.as_slice());
            self.resolver.resolve(&suggestion.title, artists)
        }))
        .await;

        suggestions
            .into_iter()
            .zip(resolutions)
            .filter_map(|(suggestion, track)| match track {
                Some(track) => Some((suggestion, track)),
                None => {
                    tracing::warn!(title = %suggestion.title, "Could not resolve suggestion on catalog");
                    None
                }
            })
            .collect()
    }

    /// Enqueue accepted tracks on the listener's device, marking each
    /// recommendation's `in_queue`. A failed insertion is retried once;
    /// partial queueing is not rolled back.
    async fn enqueue(&self, recommendations: &mut [Recommendation]) -> QueueReport {
        let device = self.pick_device().await;
        if device.is_none() {
            tracing::warn!("No playback device available; skipping queue pass");
            return QueueReport::default();
        }

        let mut report = QueueReport {
            device: device.map(|d| d.name),
            ..QueueReport::default()
        };

        for recommendation in recommendations.iter_mut() {
            let uri = &recommendation.track.uri;
            let added = match self.catalog.add_to_queue(uri).await {
                Ok(()) => true,
                Err(first_err) => {
                    tracing::warn!(uri = %uri, error = %first_err, "Queue insertion failed, retrying once");
                    self.catalog.add_to_queue(uri).await.is_ok()
                }
            };

            recommendation.in_queue = added;
            if added {
                report.queued += 1;
            } else {
                report.failed += 1;
                tracing::warn!(uri = %uri, "Queue insertion failed after retry");
            }
        }

        report
    }

    /// The active device, else the first available, else none.
    async fn pick_device(&self) -> Option<Device> {
        match self.catalog.list_devices().await {
            Ok(devices) => devices
                .iter()
                .find(|d| d.is_active)
                .or_else(|| devices.first())
                .cloned(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to list playback devices");
                None
            }
        }
    }
}

/// Pad a verdict list to `expected` entries with the permissive default so
/// a short verifier batch never drops the unanswered pairs.
fn pad_verdicts(mut verdicts: Vec<VerificationResult>, expected: usize) -> Vec<VerificationResult> {
    if verdicts.len() < expected {
        tracing::warn!(
            received = verdicts.len(),
            expected,
            "Verifier returned fewer results than pairs; padding with defaults"
        );
        verdicts.resize_with(expected, VerificationResult::missing);
    }
    verdicts.truncate(expected);
    verdicts
}

/// Pair resolved tracks with their verdicts, dropping rejected entries and
/// counting them. Order follows the resolved (i.e. suggester) order.
fn assemble(
    resolved: Vec<(SongSuggestion, Track)>,
    verifications: Option<Vec<VerificationResult>>,
) -> (Vec<Recommendation>, usize) {
    let mut recommendations = Vec::with_capacity(resolved.len());
    let mut rejected = 0;

    match verifications {
        Some(verdicts) => {
            for ((suggestion, track), verdict) in resolved.into_iter().zip(verdicts) {
                if verdict.is_valid {
                    recommendations.push(Recommendation {
                        suggestion,
                        track,
                        verification: Some(verdict),
                        in_queue: false,
                    });
                } else {
                    tracing::info!(
                        track = %track.name,
                        reason = %verdict.reason,
                        "Suggestion rejected by verifier"
                    );
                    rejected += 1;
                }
            }
        }
        None => {
            for (suggestion, track) in resolved {
                recommendations.push(Recommendation {
                    suggestion,
                    track,
                    verification: None,
                    in_queue: false,
                });
            }
        }
    }

    (recommendations, rejected)
}
