//! Text normalization and token-set similarity
//!
//! Titles and artist credits differ across data sources in casing,
//! punctuation, and word order ("Artist1, Artist2" vs "Artist2 feat.
//! Artist1"), so comparisons run over normalized unique-word sets rather
//! than raw strings.

use std::collections::HashSet;

/// Punctuation stripped before comparison.
const STRIPPED: &[char] = &['(', ')', '[', ']', '{', '}', '.', ',', '!', '\'', '"'];

/// Lowercase, strip punctuation, and collapse whitespace.
///
/// Stripped characters become spaces so that "don't" and "(Remix)" still
/// tokenize cleanly, then runs of whitespace collapse to single spaces with
/// the ends trimmed.
pub fn normalize(s: &str) -> String {
    let lowered = s.to_lowercase();
    let replaced: String = lowered
        .chars()
        .map(|c| if STRIPPED.contains(&c) { ' ' } else { c })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Jaccard overlap of the unique-word sets of two normalized strings.
///
/// Returns `|A ∩ B| / |A ∪ B|`, or `0.0` when either side normalizes to an
/// empty token set. Symmetric and insensitive to word order.
pub fn token_set_similarity(a: &str, b: &str) -> f64 {
    let a_norm = normalize(a);
    let b_norm = normalize(b);
    let set_a: HashSet<&str> = a_norm.split_whitespace().collect();
    let set_b: HashSet<&str> = b_norm.split_whitespace().collect();

    if set_a.is_empty() || set_b.is_empty() {
        return 0.0;
    }

    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();
    intersection as f64 / union as f64
}
