//! Candidate match scoring
//!
//! Combines title similarity, artist similarity, and catalog popularity into
//! one confidence score per candidate. Title text is the strongest signal;
//! artist credit formatting is noisy across sources, so the artist term is
//! weighted lower and relaxed to the best of two comparisons; popularity and
//! the prefix bonus are tie-breaking nudges only.

use crate::config::MatchWeights;
use crate::matching::text::{normalize, token_set_similarity};
use crate::models::Track;

/// Characters of the normalized target title that must prefix the candidate
/// title for the bonus to apply.
pub const PREFIX_BONUS_LEN: usize = 10;

/// Weighted scorer for catalog candidates.
#[derive(Debug, Clone, Default)]
pub struct MatchScorer {
    weights: MatchWeights,
}

impl MatchScorer {
    pub fn new(weights: MatchWeights) -> Self {
        Self { weights }
    }

    /// Score how well `candidate` matches the target title/artists.
    ///
    /// Returns a value in `[0.0, 1.0]`:
    /// `title_w * title_sim + artist_w * artist_sim + popularity_w *
    /// (popularity / 100)`, plus a small bonus when the normalized candidate
    /// title starts with the first [`PREFIX_BONUS_LEN`] characters of the
    /// normalized target title, clamped at `1.0`.
    pub fn score(&self, title: &str, artists: Option<&[String]>, candidate: &Track) -> f64 {
        let candidate_artists = candidate.artist_names();

        let title_score = token_set_similarity(title, &candidate.name);
        let artist_score = self.artist_score(artists, &candidate_artists);
        let popularity_score = f64::from(candidate.popularity.min(100)) / 100.0;

        let mut score = self.weights.title * title_score
            + self.weights.artist * artist_score
            + self.weights.popularity * popularity_score;

        if has_prefix_match(title, &candidate.name) {
            score += self.weights.prefix_bonus;
        }

        score.min(1.0)
    }

    /// Artist similarity, relaxed to tolerate reordered or partial credits.
    ///
    /// Takes the greater of (a) all target artists joined vs all candidate
    /// artists joined, and (b) the best single target artist vs the joined
    /// candidate credit. Without any target artists a fixed prior applies:
    /// the caller gave no artist constraint, so the candidate is neither
    /// confirmed nor contradicted.
    fn artist_score(&self, artists: Option<&[String]>, candidate_artists: &[String]) -> f64 {
        let Some(artists) = artists.filter(|a| !a.is_empty()) else {
            return self.weights.no_artist_prior;
        };

        let candidate_joined = candidate_artists.join(" ");
        let target_joined = artists.join(" ");

        let joined_score = token_set_similarity(&target_joined, &candidate_joined);
        let best_single = artists
            .iter()
            .map(|artist| token_set_similarity(artist, &candidate_joined))
            .fold(0.0_f64, f64::max);

        joined_score.max(best_single)
    }
}

/// True when the candidate title starts with the target title's normalized
/// prefix (or the whole normalized target, if shorter).
fn has_prefix_match(title: &str, candidate_title: &str) -> bool {
    let target = normalize(title);
    let prefix: String = target.chars().take(PREFIX_BONUS_LEN).collect();
    if prefix.is_empty() {
        return false;
    }
    normalize(candidate_title).starts_with(&prefix)
}
