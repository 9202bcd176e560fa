//! tunequeue: AI-assisted song recommendation and queueing
//!
//! Combines a generative-AI suggestion step with fuzzy track resolution
//! against a music catalog, followed by an optional AI verification pass.
//! The heart of the crate is the resolution engine: given a noisy
//! "title [by artist]" string it generates catalog queries from most to
//! least specific, scores every candidate with a deterministic weighted
//! token-set similarity, and accepts the best match under tuned confidence
//! thresholds, stopping early once a strong match appears.
//!
//! The suggester, verifier, and catalog are capability traits
//! ([`Suggester`], [`Verifier`], [`CatalogClient`]) with production
//! implementations over the Gemini and Spotify Web APIs; everything is
//! constructor-injected so tests run against in-process fakes.

pub mod config;
pub mod error;
pub mod matching;
pub mod models;
pub mod services;

pub use crate::error::{Error, Result};
pub use crate::models::{
    Device, QueueReport, Recommendation, RecommendationReport, RecommendOptions, SeedDescriptor,
    SongSuggestion, Track, VerificationResult,
};
pub use crate::services::{
    CatalogClient, CatalogError, GeminiClient, Recommender, SpotifyClient, SuggestError,
    Suggester, SuggestionAgent, TrackResolver, Verifier, VerifierAgent,
};
