//! Service layer: capability traits, production clients, and the
//! resolution/recommendation pipeline built on top of them.

pub mod catalog;
pub mod gemini_client;
pub mod recommender;
pub mod spotify_client;
pub mod suggester;
pub mod suggestion_agent;
pub mod track_resolver;
pub mod verifier;
pub mod verifier_agent;

pub use catalog::{CatalogClient, CatalogError};
pub use gemini_client::{GeminiClient, GeminiError, GenerationConfig};
pub use recommender::Recommender;
pub use spotify_client::SpotifyClient;
pub use suggester::{SuggestError, Suggester};
pub use suggestion_agent::SuggestionAgent;
pub use track_resolver::TrackResolver;
pub use verifier::Verifier;
pub use verifier_agent::VerifierAgent;
