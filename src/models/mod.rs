//! Data model for recommendation requests and results

pub mod recommendation;
pub mod suggestion;
pub mod track;
pub mod verification;

pub use recommendation::{QueueReport, Recommendation, RecommendationReport, RecommendOptions};
pub use suggestion::{SeedDescriptor, SongSuggestion};
pub use track::{AlbumRef, ArtistRef, Device, Track};
pub use verification::VerificationResult;
