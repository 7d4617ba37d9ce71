//! Gemini Provider - Implementation of EnrichmentProvider for Google's
//! Gemini API.
//!
//! Talks to the `generateContent` REST endpoint. Each port operation
//! renders its own prompt; the search operation additionally constrains
//! the response to a JSON string array via the generation config.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_model("gemini-3-flash-preview")
//!     .with_base_url("https://generativelanguage.googleapis.com");
//!
//! let provider = GeminiProvider::new(config);
//! ```
//!
//! No call is retried here: the session core applies a documented
//! fallback value when a call fails, so a failed request surfaces as
//! an error exactly once.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

use crate::domain::foundation::{NoticeId, Role};
use crate::domain::notice::UrgencyScore;
use crate::ports::{
    EnrichmentError, EnrichmentProvider, ProviderInfo, SearchEntry, UrgencyRequest,
};

/// Configuration for the Gemini provider.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g., "gemini-3-flash-preview").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gemini-3-flash-preview".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Gemini API provider implementation.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    /// Creates a new Gemini provider with the given configuration.
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Builds the generateContent endpoint URL.
    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    /// Sends one prompt and returns the model's text output.
    async fn generate(
        &self,
        prompt: String,
        generation_config: Option<GenerationConfig>,
    ) -> Result<String, EnrichmentError> {
        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config,
        };

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", self.config.api_key())
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EnrichmentError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    EnrichmentError::network(format!("Connection failed: {}", e))
                } else {
                    EnrichmentError::network(e.to_string())
                }
            })?;

        let response = self.handle_response_status(response).await?;

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| EnrichmentError::parse(format!("Failed to parse response: {}", e)))?;

        Ok(extract_text(gemini_response))
    }

    /// Parses the API response status and handles errors.
    async fn handle_response_status(&self, response: Response) -> Result<Response, EnrichmentError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(EnrichmentError::AuthenticationFailed),
            429 => Err(EnrichmentError::RateLimited),
            400 => Err(EnrichmentError::invalid_request(error_body)),
            500..=599 => Err(EnrichmentError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(EnrichmentError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }
}

#[async_trait]
impl EnrichmentProvider for GeminiProvider {
    async fn summarize(&self, content: &str) -> Result<String, EnrichmentError> {
        let text = self.generate(summarize_prompt(content), None).await?;

        if text.trim().is_empty() {
            Ok("Summary unavailable.".to_string())
        } else {
            Ok(text)
        }
    }

    async fn urgency_score(
        &self,
        request: UrgencyRequest,
    ) -> Result<UrgencyScore, EnrichmentError> {
        let text = self.generate(rank_prompt(&request), None).await?;

        match parse_leading_int(&text) {
            Some(score) => Ok(UrgencyScore::clamped(score)),
            None => Err(EnrichmentError::parse(format!(
                "Expected an integer score, got: {:?}",
                text.trim()
            ))),
        }
    }

    async fn daily_insight(&self, role: Role) -> Result<String, EnrichmentError> {
        let text = self.generate(insight_prompt(role), None).await?;

        if text.trim().is_empty() {
            Ok("Focus on your goals! 🚀".to_string())
        } else {
            Ok(text)
        }
    }

    async fn search_matches(
        &self,
        query: &str,
        entries: &[SearchEntry],
    ) -> Result<HashSet<NoticeId>, EnrichmentError> {
        let config = GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: Some(Schema {
                schema_type: "ARRAY",
                items: Some(Box::new(Schema {
                    schema_type: "STRING",
                    items: None,
                })),
            }),
        };

        let text = self
            .generate(search_prompt(query, entries), Some(config))
            .await?;

        parse_id_array(&text)
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("gemini", &self.config.model)
    }
}

// ----- Prompt rendering -----

fn summarize_prompt(content: &str) -> String {
    format!(
        "Summarize the following academic notice in one short, impactful sentence for a notification: \"{}\"",
        content
    )
}

fn rank_prompt(request: &UrgencyRequest) -> String {
    let deadline = request
        .deadline
        .map(|t| t.as_datetime().to_rfc3339())
        .unwrap_or_else(|| "None".to_string());

    format!(
        "Analyze urgency (1-100):\nTitle: {}\nPriority: {}\nTarget: {}\nDeadline: {}\nReturn ONLY the integer.",
        request.title, request.priority, request.target_audience, deadline
    )
}

fn insight_prompt(role: Role) -> String {
    format!(
        "AI Advisor: Brief motivational insight for role: {}. Max 15 words. Emoji included.",
        role
    )
}

fn search_prompt(query: &str, entries: &[SearchEntry]) -> String {
    let context = entries
        .iter()
        .map(|e| format!("ID: {} | Title: {}", e.id, e.title))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "User Query: \"{}\". Return matching IDs from this list as JSON array: \n{}",
        query, context
    )
}

// ----- Response parsing -----

/// Extracts the concatenated text of the first candidate.
fn extract_text(response: GeminiResponse) -> String {
    response
        .candidates
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default()
}

/// Parses the leading integer of a string, ignoring trailing text.
fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse::<i64>().ok().map(|n| sign * n)
}

/// Parses a JSON string array into notice ids, skipping entries that
/// are not valid identifiers.
fn parse_id_array(text: &str) -> Result<HashSet<NoticeId>, EnrichmentError> {
    let raw: Vec<String> = serde_json::from_str(text)
        .map_err(|e| EnrichmentError::parse(format!("Expected a JSON string array: {}", e)))?;

    Ok(raw.iter().filter_map(|s| s.parse().ok()).collect())
}

// ----- Gemini API Types -----

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
    #[serde(rename = "responseSchema", skip_serializing_if = "Option::is_none")]
    response_schema: Option<Schema>,
}

#[derive(Debug, Serialize)]
struct Schema {
    #[serde(rename = "type")]
    schema_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    items: Option<Box<Schema>>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
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
