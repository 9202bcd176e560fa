//! Gemini-backed suggestion agent

use async_trait::async_trait;
use serde::Deserialize;

use crate::models::{SeedDescriptor, SongSuggestion};
use crate::services::gemini_client::{
    extract_json_object, GeminiClient, GeminiError, GenerationConfig,
};
use crate::services::suggester::{SuggestError, Suggester};

const SYSTEM_PROMPT: &str = "\
You are an expert music recommendation assistant.\n\
\n\
You will receive a seed song with its verified artist(s) and, when available,\n\
its genre. Analyze the seed's core genre and cultural context, energy, and\n\
vocal style, then recommend songs that are a direct sonic match:\n\
- Prioritize 2-3 popular, sonically similar tracks by the exact seed artist.\n\
- Then add tracks by closely associated artists within the same genre and\n\
  cultural context; never mix languages or traditions the seed does not mix.\n\
- Only suggest well-known tracks likely to exist on major streaming catalogs.\n\
- Never suggest the seed song itself, and never duplicate a suggestion.\n\
\n\
Respond with clean, valid JSON ONLY, no markdown and no surrounding text:\n\
{\n\
  \"songs\": [\n\
    {\n\
      \"title\": \"exact song title\",\n\
      \"artists\": [\"exact artist name(s)\"],\n\
      \"genre\": \"specific genre\",\n\
      \"reason\": \"1-2 lines on the direct sonic match\"\n\
    }\n\
  ]\n\
}";

/// [`Suggester`] implementation over the Gemini API.
///
/// One generation per call; the orchestrator owns the retry budget.
pub struct SuggestionAgent {
    client: GeminiClient,
    config: GenerationConfig,
}

impl SuggestionAgent {
    pub fn new(client: GeminiClient) -> Self {
        Self {
            client,
            config: GenerationConfig::suggestion(),
        }
    }

    fn build_user_prompt(seed: &SeedDescriptor, count: usize) -> String {
        let mut prompt = format!("Seed Song: \"{}\"\n", seed.title);
        if !seed.artists.is_empty() {
            prompt.push_str(&format!("Artist: {}\n", seed.artist_display()));
        }
        if let Some(genre) = &seed.genre {
            prompt.push_str(&format!("Genre: {}\n", genre));
        }
        prompt.push_str(&format!("Number of Recommendations: {}", count));
        prompt
    }

    fn parse_payload(raw_text: &str) -> Result<Vec<SongSuggestion>, SuggestError> {
        let value = extract_json_object(raw_text)
            .map_err(|e| SuggestError::MalformedPayload(e.to_string()))?;

        let payload: SuggestionPayload = serde_json::from_value(value)
            .map_err(|e| SuggestError::MalformedPayload(e.to_string()))?;

        if payload.songs.is_empty() {
            return Err(SuggestError::EmptyResponse);
        }

        // A suggestion without a title cannot be resolved; an empty artist
        // list is allowed and handled downstream by the scorer's prior.
        let songs: Vec<SongSuggestion> = payload
            .songs
            .into_iter()
            .filter(|song| !song.title.trim().is_empty())
            .collect();

        if songs.is_empty() {
            return Err(SuggestError::MalformedPayload(
                "all suggestions were missing titles".to_string(),
            ));
        }

        Ok(songs)
    }
}

#[async_trait]
impl Suggester for SuggestionAgent {
    async fn suggest(
        &self,
        seed: &SeedDescriptor,
        count: usize,
    ) -> Result<Vec<SongSuggestion>, SuggestError> {
        let user_prompt = Self::build_user_prompt(seed, count);

        tracing::info!(seed = %seed.title, count, "Requesting suggestions");

        let raw_text = self
            .client
            .generate(SYSTEM_PROMPT, &user_prompt, self.config)
            .await
            .map_err(|e| match e {
                GeminiError::Api(status, body) => SuggestError::Api(status, body),
                GeminiError::EmptyResponse => SuggestError::EmptyResponse,
                other => SuggestError::Network(other.to_string()),
            })?;

        let songs = Self::parse_payload(&raw_text)?;

        tracing::info!(seed = %seed.title, received = songs.len(), "Suggestions received");

        Ok(songs)
    }
}

#[derive(Debug, Deserialize)]
struct SuggestionPayload {
    #[serde(default)]
    songs: Vec<SongSuggestion>,
}
