//! Gemini `generateContent` client.
//!
//! One prompt in, one text reply out. No streaming, no history, no retry.

use adventure_core::{CoreError, CoreResult, TextGenerator};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::app_config::ModelConfig;

/// Max characters of an error body carried into logs
const ERROR_BODY_CHARS: usize = 300;

#[derive(Debug)]
pub struct GeminiClient {
    http_client: reqwest::Client,
    /// Full `...:generateContent` URL
    endpoint: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &ModelConfig) -> CoreResult<Self> {
        let api_key = match config.api_key.as_deref() {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => return Err(CoreError::Upstream("Gemini API key not configured".into())),
        };

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder
            .build()
            .map_err(|e| CoreError::Upstream(format!("Failed to build HTTP client: {}", e)))?;

        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            config.base_url.trim_end_matches('/'),
            config.name
        );

        debug!(endpoint = %endpoint, timeout = ?config.timeout_seconds, "GeminiClient initialized");

        Ok(Self {
            http_client,
            endpoint,
            api_key,
            model: config.name.clone(),
        })
    }

    fn parse_response(body: &str) -> CoreResult<String> {
        let response: GenerateContentResponse = serde_json::from_str(body)
            .map_err(|e| CoreError::Upstream(format!("Malformed Gemini response: {}", e)))?;

        let text: String = response
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect()
            })
            .unwrap_or_default();

        if !text.is_empty() {
            return Ok(text);
        }

        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .or_else(|| response.candidates.into_iter().next().and_then(|c| c.finish_reason))
            .unwrap_or_else(|| "no candidates".to_string());

        Err(CoreError::Upstream(format!("Gemini returned no text ({})", reason)))
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> CoreResult<String> {
        let body = serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }]
        });

        debug!(model = %self.model, prompt_len = prompt.len(), "Calling Gemini");

        let resp = self
            .http_client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CoreError::Upstream(format!("Gemini request failed: {}", e)))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| CoreError::Upstream(format!("Failed to read Gemini response: {}", e)))?;

        if !status.is_success() {
            warn!(status = %status, "Gemini returned an error status");
            return Err(CoreError::Upstream(format!(
                "Gemini API error ({}): {}",
                status,
                text.chars().take(ERROR_BODY_CHARS).collect::<String>()
            )));
        }

        Self::parse_response(&text)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}
