use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::{Summarizer, SUMMARY_UNAVAILABLE};
use crate::config::SummarizerConfig;
use crate::error::{NotesError, Result};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini summarizer implementation
pub struct GeminiClient {
    config: SummarizerConfig,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(config: SummarizerConfig) -> Result<Self> {
        if config.api_key.is_none() {
            return Err(NotesError::InvalidConfiguration(
                "Gemini API key required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| NotesError::InvalidConfiguration(e.to_string()))?;

        Ok(Self { config, client })
    }

    fn api_key(&self) -> &str {
        // Guaranteed present by the constructor
        self.config.api_key.as_deref().unwrap_or_default()
    }
}

#[async_trait]
impl Summarizer for GeminiClient {
    async fn summarize(&self, text: &str) -> Result<String> {
        let prompt = format!("{}{}", self.config.instruction, text);

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt }],
            }],
            generation_config: GeminiGenerationConfig {
                max_output_tokens: self.config.max_output_tokens,
                temperature: self.config.temperature,
            },
        };

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            API_BASE,
            self.config.model,
            self.api_key()
        );

        debug!("Sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| NotesError::SummarizationFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(NotesError::SummarizationFailed(format!(
                "Gemini API error {}: {}",
                status, body
            )));
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| NotesError::SummarizationFailed(e.to_string()))?;

        Ok(extract_summary(&gemini_response))
    }

    async fn is_available(&self) -> bool {
        let url = format!("{}/models?key={}", API_BASE, self.api_key());

        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

/// Pull the first candidate's text out of a response, falling back to the
/// placeholder when no usable candidate is present
fn extract_summary(response: &GeminiResponse) -> String {
    let summary = response
        .candidates
        .first()
        .and_then(|candidate| candidate.content.as_ref())
        .and_then(|content| content.parts.first())
        .map(|part| part.text.trim().to_string());

    match summary {
        Some(text) if !text.is_empty() => text,
        _ => SUMMARY_UNAVAILABLE.to_string(),
    }
}
