//! OpenRouter chat-completions client.
//!
//! Asks the model for a JSON object with both concept lists. The
//! temperature rises with each attempt to push later batches towards
//! labels the earlier ones missed.

use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use super::{ConceptGenerator, GenerationRequest};
use crate::error::GenerationError;

/// Configuration for the OpenRouter client
#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    /// Chat-completions endpoint
    pub api_url: String,

    /// Model identifier
    pub model: String,

    /// Temperature of the first attempt; each attempt adds `temperature_step`
    pub base_temperature: f64,
    pub temperature_step: f64,

    /// Sent as `HTTP-Referer` for OpenRouter attribution
    pub referer: String,

    /// Sent as `X-Title`
    pub title: String,

    /// Related concepts requested per batch (oversupply for filtering)
    pub requested_related: usize,

    /// Confusing concepts requested per batch
    pub requested_confusing: usize,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            api_url: "https://openrouter.ai/api/v1/chat/completions".to_string(),
            model: "anthropic/claude-3-sonnet".to_string(),
            base_temperature: 0.8,
            temperature_step: 0.1,
            referer: "https://github.com/YYMinesweeper".to_string(),
            title: "Theme Minesweeper".to_string(),
            requested_related: 120,
            requested_confusing: 30,
        }
    }
}

impl OpenRouterConfig {
    /// Temperature for a 1-based attempt.
    #[must_use]
    pub fn temperature(&self, attempt: u32) -> f64 {
        self.base_temperature + self.temperature_step * f64::from(attempt)
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// `ConceptGenerator` backed by OpenRouter.
#[derive(Debug, Clone, Default)]
pub struct OpenRouterGenerator {
    client: reqwest::Client,
    config: OpenRouterConfig,
}

impl OpenRouterGenerator {
    #[must_use]
    pub fn new(config: OpenRouterConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &OpenRouterConfig {
        &self.config
    }

    /// Build the chat request body.
    #[must_use]
    pub fn request_body(&self, request: &GenerationRequest<'_>) -> serde_json::Value {
        serde_json::json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": build_system_prompt(&self.config, request) },
                { "role": "user", "content": build_user_prompt(&self.config, request) }
            ],
            "response_format": { "type": "json_object" },
            "temperature": self.config.temperature(request.attempt)
        })
    }
}

impl ConceptGenerator for OpenRouterGenerator {
    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, GenerationError> {
        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(request.credential)
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &self.config.title)
            .json(&self.request_body(request))
            .send()
            .await
            .map_err(|e| GenerationError::retryable(format!("request failed: {e}")))?;

        let status = response.status();
        debug!(attempt = request.attempt, %status, "openrouter responded");

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&text)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown status").to_string());
            return Err(classify_status(status, message));
        }

        let body: CompletionResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::retryable(format!("invalid API response: {e}")))?;

        extract_content(body)
    }
}

fn classify_status(status: StatusCode, message: String) -> GenerationError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            GenerationError::fatal(format!("credential rejected ({status}): {message}"))
        }
        _ => GenerationError::retryable(format!("API request failed ({status}): {message}")),
    }
}

fn extract_content(body: CompletionResponse) -> Result<String, GenerationError> {
    body.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| GenerationError::retryable("invalid API response structure: missing content"))
}

fn build_system_prompt(config: &OpenRouterConfig, request: &GenerationRequest<'_>) -> String {
    let mut prompt = format!(
        r#"You generate concept lists for a themed minesweeper game. Produce two lists:
1. Related concepts (at least {related}): concepts that unambiguously belong to the theme.
2. Confusing concepts (at least {confusing}): plausible-looking concepts that do NOT belong to the theme,
   chosen from the same era, region or field so they are easy to mistake for related ones.

Rules:
- Write every concept in language "{language}".
- No duplicates and no near-duplicates, within or across the two lists.
- Related concepts must match the theme exactly.
- Return strict JSON only.

This is attempt {attempt}; produce results different from any earlier attempt."#,
        related = config.requested_related,
        confusing = config.requested_confusing,
        language = request.language,
        attempt = request.attempt,
    );

    if let Some(avoid) = request.avoid.as_ref().filter(|a| !a.is_empty()) {
        prompt.push_str(&format!(
            "\n\nAlready generated (do not repeat any of these):\nRelated: {}\nConfusing: {}",
            avoid.related.join(", "),
            avoid.confusing.join(", "),
        ));
    }

    prompt
}

fn build_user_prompt(config: &OpenRouterConfig, request: &GenerationRequest<'_>) -> String {
    format!(
        r#"Theme: "{theme}"

Return exactly this JSON shape:
{{
  "relatedConcepts": ["concept 1", "concept 2", ...],
  "confusingConcepts": ["confusing 1", ...]
}}
with at least {related} related and {confusing} confusing concepts."#,
        theme = request.theme,
        related = config.requested_related,
        confusing = config.requested_confusing,
    )
}
