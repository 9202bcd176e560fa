//! Configuration for matching, retries, and client credentials
//!
//! Score weights and thresholds are tuned constants carried over from the
//! system this crate replaces; they are tunable knobs, not load-bearing
//! invariants, so they live here as named values with `Default` impls
//! rather than being scattered through the matching code.
//!
//! Credential resolution follows ENV → TOML priority: an environment
//! variable wins over the config file, and finding a key in both logs a
//! warning so misconfiguration is visible.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};

/// Minimum score for a resolution to be accepted at all.
pub const ACCEPT_THRESHOLD: f64 = 0.45;

/// Score at which the resolver stops issuing further queries.
pub const EARLY_EXIT_THRESHOLD: f64 = 0.75;

/// Candidates requested per catalog search.
pub const SEARCH_PAGE_SIZE: u32 = 20;

/// Environment variable holding the catalog bearer token.
pub const ENV_CATALOG_TOKEN: &str = "TUNEQUEUE_CATALOG_TOKEN";

/// Environment variable holding the Gemini API key.
pub const ENV_GEMINI_API_KEY: &str = "TUNEQUEUE_GEMINI_API_KEY";

/// Weights for the candidate match score.
///
/// Title text is the strongest signal (0.65); artist credits are noisy
/// across sources (0.30); popularity (0.05) and the prefix bonus (0.05)
/// only nudge ties. `no_artist_prior` stands in for the artist term when
/// the caller supplied no artist constraint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchWeights {
    pub title: f64,
    pub artist: f64,
    pub popularity: f64,
    pub prefix_bonus: f64,
    pub no_artist_prior: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            title: 0.65,
            artist: 0.30,
            popularity: 0.05,
            prefix_bonus: 0.05,
            no_artist_prior: 0.2,
        }
    }
}

/// Bounded retry policy: attempt count plus a fixed backoff between
/// attempts. How the wait happens is up to the component using the policy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Pause between attempts, in milliseconds
    pub backoff_ms: u64,
}

impl RetryPolicy {
    /// Catalog search: two attempts, half-second pause.
    pub fn catalog_search() -> Self {
        Self {
            max_attempts: 2,
            backoff_ms: 500,
        }
    }

    /// Suggester calls: three attempts, one-second pause.
    pub fn suggester() -> Self {
        Self {
            max_attempts: 3,
            backoff_ms: 1_000,
        }
    }

    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::catalog_search()
    }
}

/// Tuning for one resolve call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub accept_threshold: f64,
    pub early_exit_threshold: f64,
    pub page_size: u32,
    pub retry: RetryPolicy,
    pub weights: MatchWeights,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            accept_threshold: ACCEPT_THRESHOLD,
            early_exit_threshold: EARLY_EXIT_THRESHOLD,
            page_size: SEARCH_PAGE_SIZE,
            retry: RetryPolicy::catalog_search(),
            weights: MatchWeights::default(),
        }
    }
}

/// Tuning for the recommendation orchestrator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    pub resolver: ResolverConfig,
    pub suggester_retry: RetryPolicy,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            resolver: ResolverConfig::default(),
            suggester_retry: RetryPolicy::suggester(),
        }
    }
}

/// On-disk configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// Catalog (Spotify) bearer access token
    pub catalog_token: Option<String>,
    /// Gemini API key
    pub gemini_api_key: Option<String>,
    /// Gemini model name override
    pub gemini_model: Option<String>,
    /// Resolver tuning overrides
    pub resolver: Option<ResolverConfig>,
}

/// Read a [`TomlConfig`] from a file.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read config failed ({}): {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse config failed ({}): {}", path.display(), e)))
}

/// Resolve the catalog bearer token from ENV → TOML.
pub fn resolve_catalog_token(toml_config: &TomlConfig) -> Result<String> {
    resolve_credential(
        "catalog token",
        ENV_CATALOG_TOKEN,
        toml_config.catalog_token.as_deref(),
    )
}

/// Resolve the Gemini API key from ENV → TOML.
pub fn resolve_gemini_api_key(toml_config: &TomlConfig) -> Result<String> {
    resolve_credential(
        "Gemini API key",
        ENV_GEMINI_API_KEY,
        toml_config.gemini_api_key.as_deref(),
    )
}

/// Validate a credential (non-empty, non-whitespace).
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

fn resolve_credential(name: &str, env_var: &str, toml_value: Option<&str>) -> Result<String> {
    let env_value = std::env::var(env_var).ok().filter(|k| is_valid_key(k));
    let toml_value = toml_value.filter(|k| is_valid_key(k));

    if env_value.is_some() && toml_value.is_some() {
        warn!(
            credential = name,
            "{} found in both environment and TOML config. Using environment (highest priority).",
            name
        );
    }

    if let Some(key) = env_value {
        info!(credential = name, "{} loaded from environment variable", name);
        return Ok(key);
    }

    if let Some(key) = toml_value {
        info!(credential = name, "{} loaded from TOML config", name);
        return Ok(key.to_string());
    }

    Err(Error::Config(format!(
        "{} not configured. Set the {} environment variable or add it to the TOML config file.",
        name, env_var
    )))
}
