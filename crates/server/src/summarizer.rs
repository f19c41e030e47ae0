//! Text summarization backends.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Settings;

const SYSTEM_PROMPT: &str = "You are a helpful assistant that writes concise summaries.";
const MAX_SUMMARY_TOKENS: u32 = 150;
const TEMPERATURE: f32 = 0.7;
const OPENAI_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum SummarizerError {
    #[error("OpenAI API key not configured")]
    NotConfigured,
    #[error("Error during summarization: {0}")]
    Api(String),
}

#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String, SummarizerError>;
}

/// Used when no API key is configured; every request fails the same way.
pub struct UnconfiguredSummarizer;

#[async_trait]
impl Summarizer for UnconfiguredSummarizer {
    async fn summarize(&self, _text: &str) -> Result<String, SummarizerError> {
        Err(SummarizerError::NotConfigured)
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

pub fn summary_prompt(text: &str) -> String {
    format!("Summarize the following text:\n\n{text}")
}

pub struct OpenAiSummarizer {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiSummarizer {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(OPENAI_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    async fn summarize(&self, text: &str) -> Result<String, SummarizerError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: summary_prompt(text),
                },
            ],
            max_tokens: MAX_SUMMARY_TOKENS,
            temperature: TEMPERATURE,
        };

        debug!(model = %self.model, text_len = text.len(), "requesting summary");
        let response: ChatCompletionResponse = self
            .http
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| SummarizerError::Api(e.to_string()))?
            .json()
            .await
            .map_err(|e| SummarizerError::Api(e.to_string()))?;

        let summary = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| SummarizerError::Api("OpenAI returned no summary".to_string()))?;

        Ok(summary.trim().to_string())
    }
}

pub fn from_settings(settings: &Settings) -> anyhow::Result<Arc<dyn Summarizer>> {
    match settings
        .openai_api_key
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty())
    {
        Some(api_key) => Ok(Arc::new(OpenAiSummarizer::new(
            settings.openai_base_url.clone(),
            api_key,
            settings.openai_model.clone(),
        )?)),
        None => {
            warn!("OpenAI API key is not set; summarize requests will be refused");
            Ok(Arc::new(UnconfiguredSummarizer))
        }
    }
}

#[cfg(test)]
#[path = "tests/summarizer_tests.rs"]
mod tests;
