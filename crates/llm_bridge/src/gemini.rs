//! Gemini HTTP API client
//!
//! Typed request/response structs for the `generateContent` endpoint
//! plus transport policy: per-request timeout and bounded retry of
//! transient failures. Both pipelines share one client.

use chat_core::config::API_KEY_VAR;
use chat_core::ChatError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Public endpoint of the Gemini REST API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Configuration for the Gemini client
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Base URL for the Gemini API
    pub base_url: String,
    /// Timeout in seconds for a single attempt (default: 30)
    pub timeout_secs: u64,
    /// Additional attempts after a retryable failure (default: 2,
    /// i.e. at most 3 attempts in total)
    pub max_retries: u32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            max_retries: 2,
        }
    }
}

/// Gemini API client shared by the text and vision pipelines
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl GeminiClient {
    /// Create a new client. A missing API key is accepted here and only
    /// reported when the first request is attempted.
    pub fn new(config: GeminiConfig, api_key: Option<String>) -> Result<Self, ChatError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| {
                ChatError::transport(format!("failed to build HTTP client: {}", err), false)
            })?;

        Ok(Self {
            config,
            api_key,
            client,
        })
    }

    /// Submit a generation request and return the first candidate's
    /// text. Retryable failures are reattempted up to
    /// `config.max_retries` additional times.
    pub async fn generate(
        &self,
        model: &str,
        request: &GenerateRequest,
    ) -> Result<String, ChatError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ChatError::Configuration(format!("{} is not set", API_KEY_VAR)))?;

        let url = format!(
            "{}/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        );

        let mut attempt = 0;
        loop {
            match self.send_once(&url, api_key, request).await {
                Ok(text) => return Ok(text),
                Err(err) if err.is_retryable() && attempt < self.config.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        attempt,
                        max_retries = self.config.max_retries,
                        "Gemini request failed, retrying: {}",
                        err
                    );
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn send_once(
        &self,
        url: &str,
        api_key: &str,
        request: &GenerateRequest,
    ) -> Result<String, ChatError> {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(ChatError::Configuration(format!(
                "Gemini rejected the API key: HTTP {}",
                status
            )));
        }
        if !status.is_success() {
            let retryable =
                status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS;
            return Err(ChatError::transport(
                format!("Gemini API error: HTTP {}", status),
                retryable,
            ));
        }

        let body: GenerateResponse = response.json().await.map_err(|err| {
            ChatError::transport(format!("failed to decode Gemini response: {}", err), false)
        })?;

        body.first_text()
            .ok_or_else(|| ChatError::transport("Gemini response contained no text", false))
    }
}

fn classify_send_error(err: reqwest::Error) -> ChatError {
    if err.is_timeout() {
        ChatError::transport(format!("Gemini request timed out: {}", err), true)
    } else {
        ChatError::transport(format!("Gemini request failed: {}", err), err.is_connect())
    }
}

/// Generation request for the `generateContent` endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<SystemInstruction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// A single conversation turn
#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

/// Instruction carried outside the conversation turns
#[derive(Debug, Clone, Serialize)]
pub struct SystemInstruction {
    pub parts: Vec<Part>,
}

/// One part of a turn: text or inline image data
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    pub fn inline_image(mime_type: impl Into<String>, data_b64: impl Into<String>) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.into(),
                data: data_b64.into(),
            }),
        }
    }
}

/// Base64 image bytes with their MIME type
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// Sampling parameters. Unset fields fall back to service defaults.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

/// Response from the `generateContent` endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: CandidateContent,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate, if any.
    pub fn first_text(&self) -> Option<String> {
        let text: String = self
            .candidates
            .first()?
            .content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}
