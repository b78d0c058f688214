//! Chat-completion transport.

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

use super::config::LlmSettings;
use super::prompt::{ChatMessage, ChatRequest};
use crate::error::{LlmError, LlmResult};

/// User agent string for model requests.
const USER_AGENT_VALUE: &str = concat!("samara-merge/", env!("CARGO_PKG_VERSION"));

/// Anything that can answer a chat request with the assistant's text.
pub trait CompletionClient {
    fn complete(&self, request: &ChatRequest) -> LlmResult<String>;
}

impl<C: CompletionClient + ?Sized> CompletionClient for Box<C> {
    fn complete(&self, request: &ChatRequest) -> LlmResult<String> {
        (**self).complete(request)
    }
}

#[derive(Debug, Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: ChatMessage,
}

/// Blocking HTTP client for an OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct HttpCompletionClient {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    api_key: String,
    temperature: f64,
}

impl HttpCompletionClient {
    /// Builds a client from settings.
    ///
    /// Fails when no API key is configured or the HTTP client cannot be built.
    pub fn new(settings: &LlmSettings) -> LlmResult<Self> {
        let api_key = settings.api_key().ok_or(LlmError::MissingApiKey)?.to_string();

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::blocking::Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT_VALUE)
            .timeout(Duration::from_secs(settings.timeout_secs.max(1)))
            .build()
            .map_err(|e| LlmError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            model: settings.model.clone(),
            api_key,
            temperature: settings.temperature,
        })
    }
}

impl CompletionClient for HttpCompletionClient {
    fn complete(&self, request: &ChatRequest) -> LlmResult<String> {
        let body = CompletionBody {
            model: &self.model,
            messages: &request.messages,
            temperature: self.temperature,
        };

        tracing::debug!(endpoint = %self.endpoint, model = %self.model, "requesting completion");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: CompletionResponse = response.json()?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(LlmError::EmptyResponse)
    }
}
