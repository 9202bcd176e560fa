//! Fuzzy track resolution
//!
//! Maps a free-form or AI-generated "title [by artist]" string to a concrete
//! catalog track. Queries run from most to least specific so a strong match
//! ends the search early; every candidate of every page is scored and the
//! best seen so far is carried as a fold accumulator across the whole call.

use std::sync::Arc;

use crate::config::ResolverConfig;
use crate::matching::freeform::parse_title_and_artists;
use crate::matching::scorer::MatchScorer;
use crate::models::Track;
use crate::services::catalog::CatalogClient;

/// Best candidate seen so far across all queries of one resolve call.
#[derive(Debug, Default)]
struct BestCandidate {
    track: Option<Track>,
    score: f64,
}

impl BestCandidate {
    fn consider(&mut self, track: &Track, score: f64) {
        if score > self.score {
            self.track = Some(track.clone());
            self.score = score;
        }
    }
}

/// Resolves noisy title/artist strings against the catalog.
pub struct TrackResolver {
    catalog: Arc<dyn CatalogClient>,
    scorer: MatchScorer,
    config: ResolverConfig,
}

impl TrackResolver {
    pub fn new(catalog: Arc<dyn CatalogClient>, config: ResolverConfig) -> Self {
        Self {
            catalog,
            scorer: MatchScorer::new(config.weights),
            config,
        }
    }

    /// Resolve `title_or_freeform` to the best-matching catalog track.
    ///
    /// Caller-supplied `artists` take precedence over artists parsed out of
    /// the freeform string. Returns `None` when no candidate reaches the
    /// accept threshold; catalog search errors are absorbed as empty result
    /// sets after the per-query retry budget.
    pub async fn resolve(&self, title_or_freeform: &str, artists: Option<&[String]>) -> Option<Track> {
        let (title, parsed_artists) = parse_title_and_artists(title_or_freeform);

        let effective_artists: Option<Vec<String>> = match artists {
            Some(list) if !list.is_empty() => Some(list.to_vec()),
            _ => parsed_artists,
        };

        let queries = build_queries(&title, effective_artists.as_deref());

        let mut best = BestCandidate::default();

        for query in &queries {
            let tracks = self.search_with_retries(query).await;

            for track in &tracks {
                let score = self
                    .scorer
                    .score(&title, effective_artists.as_deref(), track);
                best.consider(track, score);
            }

            if best.score >= self.config.early_exit_threshold {
                tracing::debug!(
                    title = %title,
                    query = %query,
                    score = best.score,
                    "Early exit on strong match"
                );
                return best.track;
            }
        }

        if best.score >= self.config.accept_threshold {
            tracing::debug!(
                title = %title,
                score = best.score,
                matched = ?best.track.as_ref().map(|t| t.name.as_str()),
                "Accepted best candidate"
            );
            best.track
        } else {
            tracing::info!(
                title = %title,
                best_score = best.score,
                "No acceptable catalog match"
            );
            None
        }
    }

    /// Run one query with the bounded retry budget.
    ///
    /// Moves on as soon as one attempt succeeds; a failed attempt waits out
    /// the backoff before retrying, and exhausting the budget yields an
    /// empty result set rather than an error.
    async fn search_with_retries(&self, query: &str) -> Vec<Track> {
        let retry = self.config.retry;

        for attempt in 1..=retry.max_attempts {
            match self
                .catalog
                .search_tracks(query, self.config.page_size)
                .await
            {
                Ok(tracks) => return tracks,
                Err(e) => {
                    tracing::warn!(
                        query = %query,
                        attempt,
                        error = %e,
                        "Catalog search failed"
                    );
                    if attempt < retry.max_attempts {
                        tokio::time::sleep(retry.backoff()).await;
                    }
                }
            }
        }

        Vec::new()
    }
}

/// Ordered query list: one exact-phrase title+artist query per artist, then
/// an exact-phrase title query, then the raw title as the broadest fallback.
fn build_queries(title: &str, artists: Option<&[String]>) -> Vec<String> {
    let mut queries = Vec::new();

    if let Some(artists) = artists {
        for artist in artists {
            queries.push(format!("track:\"{}\" artist:\"{}\"", title, artist));
        }
    }
    queries.push(format!("track:\"{}\"", title));
    queries.push(title.to_string());

    queries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_order_is_specific_to_broad() {
        let artists = vec!["Guru Randhawa".to_string(), "Badshah".to_string()];
        let queries = build_queries("Lahore", Some(&artists));

        assert_eq!(
            queries,
            vec![
                "track:\"Lahore\" artist:\"Guru Randhawa\"".to_string(),
                "track:\"Lahore\" artist:\"Badshah\"".to_string(),
                "track:\"Lahore\"".to_string(),
                "Lahore".to_string(),
            ]
        );
    }

    #[test]
    fn no_artists_yields_title_queries_only() {
        let queries = build_queries("Lahore", None);
        assert_eq!(
            queries,
            vec!["track:\"Lahore\"".to_string(), "Lahore".to_string()]
        );
    }

    #[test]
    fn best_candidate_keeps_highest_score() {
        let mut best = BestCandidate::default();
        let track_a = Track {
            id: "a".into(),
            name: "A".into(),
            artists: vec![],
            popularity: 0,
            uri: "catalog:track:a".into(),
            album: None,
        };
        let mut track_b = track_a.clone();
        track_b.id = "b".into();

        best.consider(&track_a, 0.5);
        best.consider(&track_b, 0.4);
        assert_eq!(best.track.as_ref().unwrap().id, "a");
        assert_eq!(best.score, 0.5);

        best.consider(&track_b, 0.6);
        assert_eq!(best.track.as_ref().unwrap().id, "b");
    }
}
