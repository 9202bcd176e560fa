//! Crate-level error types
//!
//! Only request-fatal conditions surface here: a seed that cannot be
//! resolved, a suggester that stays malformed past its retry budget, and
//! configuration problems. Transient catalog failures are absorbed inside
//! the resolver and queueing paths, and verifier failures degrade to
//! permissive defaults; see the per-service error enums in
//! `services::catalog`, `services::suggester`, and
//! `services::gemini_client` for the non-fatal taxonomy.

use thiserror::Error;

use crate::services::suggester::SuggestError;

/// Errors that fail a whole recommendation request.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration problem (missing credential, unreadable config file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The seed query resolved to no acceptable catalog track
    #[error("Could not find '{0}' on the catalog")]
    SeedNotFound(String),

    /// The suggester produced no valid output within its retry budget
    #[error("Failed to get valid suggestions after {attempts} attempts: {source}")]
    SuggestionsExhausted {
        attempts: u32,
        #[source]
        source: SuggestError,
    },
}

/// Result alias for request-level operations.
pub type Result<T> = std::result::Result<T, Error>;
