//! Google Generative Language API client
//!
//! Shared HTTP plumbing for the suggestion and verifier agents: one
//! `generateContent` call per request, plus the lenient JSON extraction
//! both agents need because the model wraps payloads in markdown fences or
//! prose more often than it should.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const USER_AGENT: &str = "tunequeue/0.1.0";
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Gemini client errors.
#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("No valid JSON found in model response")]
    NoJson,

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Sampling parameters for one agent.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
}

impl GenerationConfig {
    /// Creative sampling for suggestion generation.
    pub fn suggestion() -> Self {
        Self {
            temperature: 1.0,
            top_p: 0.95,
            top_k: 40,
        }
    }

    /// Conservative sampling for consistent verification verdicts.
    pub fn verification() -> Self {
        Self {
            temperature: 0.3,
            top_p: 0.8,
            top_k: 20,
        }
    }
}

/// Minimal Gemini `generateContent` client.
pub struct GeminiClient {
    http_client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, GeminiError> {
        Self::with_model(api_key, DEFAULT_MODEL)
    }

    pub fn with_model(
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, GeminiError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| GeminiError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: GEMINI_BASE_URL.to_string(),
        })
    }

    /// Point the client at a different base URL. Intended for tests against
    /// a local stand-in server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Run one generation and return the model's raw text.
    pub async fn generate(
        &self,
        system_instruction: &str,
        user_prompt: &str,
        config: GenerationConfig,
    ) -> Result<String, GeminiError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let request = GenerateRequest {
            system_instruction: Content::text(system_instruction),
            contents: vec![UserContent {
                role: "user",
                parts: vec![Part {
                    text: user_prompt.to_string(),
                }],
            }],
            generation_config: config,
        };

        tracing::debug!(model = %self.model, "Requesting generation");

        let response = self
            .http_client
            .post(&url)
            // Key travels in a header so it never lands in URLs or logs.
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GeminiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::Api(status.as_u16(), body));
        }

        let payload: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::Parse(e.to_string()))?;

        let text = payload
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(GeminiError::EmptyResponse);
        }

        Ok(text)
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct GenerateRequest {
    system_instruction: Content,
    contents: Vec<UserContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

impl Content {
    fn text(text: &str) -> Self {
        Self {
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }
}

#[derive(Debug, Serialize)]
struct UserContent {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

// ---------------------------------------------------------------------------
// Payload extraction
// ---------------------------------------------------------------------------

/// Extract a JSON object from raw model text.
///
/// Tries, in order: the text as-is with markdown code fences stripped, then
/// the slice between the first `{` and the last `}`. The fallback survives
/// prose before or after the payload.
pub fn extract_json_object(raw_text: &str) -> Result<Value, GeminiError> {
    let cleaned = strip_code_fences(raw_text);

    if let Ok(value) = serde_json::from_str::<Value>(&cleaned) {
        return Ok(value);
    }

    let start = cleaned.find('{').ok_or(GeminiError::NoJson)?;
    let end = cleaned.rfind('}').ok_or(GeminiError::NoJson)?;
    if end < start {
        return Err(GeminiError::NoJson);
    }

    serde_json::from_str(&cleaned[start..=end]).map_err(|e| GeminiError::Parse(e.to_string()))
}

/// Drop markdown fence lines (```json ... ```), keeping everything between.
fn strip_code_fences(raw_text: &str) -> String {
    let trimmed = raw_text.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }

    trimmed
        .lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
