//! Gemini-backed verifier agent
//!
//! Judges resolved recommendations against the seed. Every internal failure
//! (network, malformed verdict, short batch) degrades to the permissive
//! default verdict instead of erroring, so a verifier outage can never block
//! unrelated suggestions.

use async_trait::async_trait;
use serde_json::Value;

use crate::models::{SeedDescriptor, SongSuggestion, Track, VerificationResult};
use crate::services::gemini_client::{extract_json_object, GeminiClient, GenerationConfig};
use crate::services::verifier::Verifier;

const SYSTEM_PROMPT: &str = "\
You are a music quality verifier. Decide whether a recommended song is truly\n\
a good match for the seed song.\n\
\n\
Evaluation criteria:\n\
1. Artist match (30%): same artist or a closely related artist in the scene.\n\
2. Genre/culture match (30%): same genre and cultural context; never accept\n\
   a different language or regional tradition than the seed.\n\
3. Energy/vibe match (20%): similar energy, tempo, and mood.\n\
4. Popularity/quality (10%): a well-known, high-quality track.\n\
5. Sonic coherence (10%): would flow well after the seed in a playlist.\n\
\n\
Respond with valid JSON ONLY:\n\
{\n\
  \"is_valid\": true or false,\n\
  \"confidence_score\": 0.0 to 1.0,\n\
  \"reason\": \"one sentence explaining the verdict\"\n\
}";

const BATCH_TASK: &str = "\
**Task:** Verify ALL songs above in a single response. Return JSON with one\n\
verification per song, IN ORDER:\n\
{\n\
  \"verifications\": [\n\
    {\"song_number\": 1, \"is_valid\": true, \"confidence_score\": 0.95, \"reason\": \"...\"},\n\
    {\"song_number\": 2, \"is_valid\": false, \"confidence_score\": 0.3, \"reason\": \"...\"}\n\
  ]\n\
}\n\
Return ONLY valid JSON.";

/// [`Verifier`] implementation over the Gemini API.
pub struct VerifierAgent {
    client: GeminiClient,
    config: GenerationConfig,
}

impl VerifierAgent {
    pub fn new(client: GeminiClient) -> Self {
        Self {
            client,
            config: GenerationConfig::verification(),
        }
    }

    fn seed_block(seed: &SeedDescriptor) -> String {
        let mut block = format!(
            "**Seed Song:**\n- Title: {}\n- Artist: {}\n",
            seed.title,
            seed.artist_display()
        );
        if let Some(genre) = &seed.genre {
            block.push_str(&format!("- Genre: {}\n", genre));
        }
        block
    }

    fn pair_block(suggestion: &SongSuggestion, track: &Track) -> String {
        format!(
            "- Title: {}\n- Artist: {}\n- Genre: {}\n- AI Reason: {}\n- Catalog Artist: {}\n- Catalog Popularity: {}/100\n",
            suggestion.title,
            suggestion.artists.join(", "),
            suggestion.genre.as_deref().unwrap_or("N/A"),
            suggestion.reason.as_deref().unwrap_or("N/A"),
            track.artist_display(),
            track.popularity,
        )
    }

    fn build_single_prompt(
        seed: &SeedDescriptor,
        suggestion: &SongSuggestion,
        track: &Track,
    ) -> String {
        format!(
            "{}\n**Recommended Song:**\n{}\n**Question:** Is this recommended song a valid match for the seed song?",
            Self::seed_block(seed),
            Self::pair_block(suggestion, track),
        )
    }

    fn build_batch_prompt(seed: &SeedDescriptor, pairs: &[(SongSuggestion, Track)]) -> String {
        let mut prompt = Self::seed_block(seed);
        prompt.push_str("\n**Recommended Songs to Verify:**\n\n");
        for (idx, (suggestion, track)) in pairs.iter().enumerate() {
            prompt.push_str(&format!(
                "{}. {}\n{}\n",
                idx + 1,
                suggestion.title,
                Self::pair_block(suggestion, track),
            ));
        }
        prompt.push_str(BATCH_TASK);
        prompt
    }

    fn parse_single_verdict(raw_text: &str) -> Option<VerificationResult> {
        let value = extract_json_object(raw_text).ok()?;
        Some(verdict_from_value(&value))
    }

    /// Parse a batch verdict array, defaulting each absent or malformed slot.
    fn parse_batch_verdicts(raw_text: &str, expected: usize) -> Vec<VerificationResult> {
        let verifications = extract_json_object(raw_text)
            .ok()
            .and_then(|value| value.get("verifications").cloned())
            .and_then(|v| v.as_array().cloned())
            .unwrap_or_default();

        (0..expected)
            .map(|i| match verifications.get(i) {
                Some(entry) => verdict_from_value(entry),
                None => VerificationResult::missing(),
            })
            .collect()
    }
}

/// Build a verdict from a JSON object, filling absent fields permissively.
fn verdict_from_value(value: &Value) -> VerificationResult {
    VerificationResult {
        is_valid: value.get("is_valid").and_then(Value::as_bool).unwrap_or(true),
        confidence_score: value
            .get("confidence_score")
            .and_then(Value::as_f64)
            .unwrap_or(0.5),
        reason: value
            .get("reason")
            .and_then(Value::as_str)
            .unwrap_or("Verified")
            .to_string(),
    }
}

#[async_trait]
impl Verifier for VerifierAgent {
    async fn verify(
        &self,
        seed: &SeedDescriptor,
        suggestion: &SongSuggestion,
        track: &Track,
    ) -> VerificationResult {
        let user_prompt = Self::build_single_prompt(seed, suggestion, track);

        match self.client.generate(SYSTEM_PROMPT, &user_prompt, self.config).await {
            Ok(raw_text) => Self::parse_single_verdict(&raw_text).unwrap_or_else(|| {
                tracing::warn!(
                    suggestion = %suggestion.title,
                    "Verifier returned no parseable verdict, using permissive default"
                );
                VerificationResult::permissive("Unparseable verification response")
            }),
            Err(e) => {
                tracing::warn!(
                    suggestion = %suggestion.title,
                    error = %e,
                    "Verification failed, using permissive default"
                );
                VerificationResult::permissive(format!("Verification error: {}", e))
            }
        }
    }

    async fn verify_batch(
        &self,
        seed: &SeedDescriptor,
        pairs: &[(SongSuggestion, Track)],
    ) -> Vec<VerificationResult> {
        if pairs.is_empty() {
            return Vec::new();
        }

        let user_prompt = Self::build_batch_prompt(seed, pairs);

        tracing::info!(pairs = pairs.len(), "Running batch verification");

        match self.client.generate(SYSTEM_PROMPT, &user_prompt, self.config).await {
            Ok(raw_text) => Self::parse_batch_verdicts(&raw_text, pairs.len()),
            Err(e) => {
                tracing::warn!(error = %e, "Batch verification failed, using permissive defaults");
                pairs
                    .iter()
                    .map(|_| VerificationResult::permissive(format!("Verification error: {}", e)))
                    .collect()
            }
        }
    }
}
