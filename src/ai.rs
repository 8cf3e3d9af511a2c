//! Short answers from the Gemini `generateContent` API.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::time::{timeout, Duration};

pub const MAX_ANSWER_WORDS: usize = 3;

/// Message returned to callers for every upstream failure.
pub const RETRY_MESSAGE: &str = "Failed to get AI response. Please try again later.";

#[derive(Debug, Error)]
pub enum AiError {
    #[error("AI service not configured. Please set GEMINI_API_KEY in .env file")]
    NotConfigured,

    #[error("Gemini request timed out")]
    Timeout,

    #[error("failed to reach Gemini: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Gemini returned {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("Gemini response did not contain an answer")]
    EmptyResponse,
}

#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Sends one prompt and returns the raw completion text.
    async fn complete(&self, prompt: &str) -> Result<String, AiError>;
}

pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
    pub timeout_ms: u64,
}

pub struct GeminiClient {
    config: GeminiConfig,
    client: Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base, self.config.model
        )
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, AiError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        tracing::debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Sending request to Gemini"
        );

        // Bounds the body read as well as the headers.
        timeout(
            Duration::from_millis(self.config.timeout_ms),
            self.send(&request),
        )
        .await
        .map_err(|_| AiError::Timeout)?
    }
}

impl GeminiClient {
    async fn send(&self, request: &GenerateContentRequest) -> Result<String, AiError> {
        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.config.api_key.as_str())])
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Api { status, body });
        }

        let body: GenerateContentResponse = response.json().await?;
        body.answer_text().ok_or(AiError::EmptyResponse)
    }
}

pub fn build_prompt(question: &str) -> String {
    format!(
        "Answer the following question in ONLY 1-3 words. Be concise and direct. Question: {question}"
    )
}

/// Trims `text` down to its first [`MAX_ANSWER_WORDS`] words.
pub fn first_words(text: &str) -> String {
    text.split_whitespace()
        .take(MAX_ANSWER_WORDS)
        .collect::<Vec<_>>()
        .join(" ")
}

pub async fn ask(client: &dyn CompletionClient, question: &str) -> Result<String, AiError> {
    let raw = client.complete(&build_prompt(question)).await?;
    Ok(first_words(&raw))
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

impl GenerateContentResponse {
    fn answer_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let texts: Vec<&str> = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }
}
