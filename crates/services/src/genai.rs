use std::env;

use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::GenAiError;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Connection settings for the hosted generative model.
#[derive(Clone, Debug)]
pub struct GenAiConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl GenAiConfig {
    /// Reads the configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns `GenAiError::MissingApiKey` when `DRILL_GENAI_API_KEY` is
    /// absent or blank. Callers treat this as fatal at startup; the key is
    /// not an optional enablement.
    pub fn from_env() -> Result<Self, GenAiError> {
        let api_key = env::var("DRILL_GENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(GenAiError::MissingApiKey)?;
        let base_url =
            env::var("DRILL_GENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let model = env::var("DRILL_GENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
        Ok(Self {
            base_url,
            api_key,
            model,
        })
    }
}

/// Minimal client for the model's `generateContent` endpoint.
#[derive(Clone)]
pub struct GenAiClient {
    client: Client,
    config: GenAiConfig,
}

impl GenAiClient {
    #[must_use]
    pub fn new(config: GenAiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Sends one prompt and returns the first candidate's text, trimmed.
    ///
    /// # Errors
    ///
    /// Returns `GenAiError` when the request fails, the server answers with a
    /// non-success status, or the response carries no text.
    pub async fn generate(&self, prompt: &str) -> Result<String, GenAiError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model,
        );
        let payload = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        debug!("generateContent request to model {}", self.config.model);
        let response = self
            .client
            .post(url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GenAiError::HttpStatus(response.status()));
        }

        let body: GenerateResponse = response.json().await?;
        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or(GenAiError::EmptyResponse)?;

        Ok(text.trim().to_string())
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: String,
}
