//! Pure matching algorithms: normalization, similarity, freeform parsing,
//! and candidate scoring. No I/O; everything here is deterministic.

pub mod freeform;
pub mod scorer;
pub mod text;

pub use freeform::parse_title_and_artists;
pub use scorer::MatchScorer;
pub use text::{normalize, token_set_similarity};
