//! Oracle client — unified chat-completion interface for Ollama and
//! OpenAI-compatible backends.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, warn};

use crate::error::OracleError;
use crate::types::{ChatRequest, ChatResponse};

/// The oracle call contract: given an ordered sequence of role-tagged
/// messages, return a text completion or an explicit failure.
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Generate a completion for the given request.
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, OracleError>;
}

/// Provider backend for chat completion.
#[derive(Debug, Clone)]
pub enum Provider {
    /// Ollama running locally (recommended).
    Ollama { base_url: String },
    /// OpenAI-compatible API (also works with Anthropic, Together, etc.).
    OpenAiCompatible { base_url: String, api_key: String },
    /// No backend configured — all calls return `Unavailable`.
    None,
}

/// HTTP-backed oracle that routes requests to the configured provider.
pub struct HttpOracle {
    provider: Provider,
    http: Client,
    model: String,
    max_retries: u32,
}

impl HttpOracle {
    /// Create a new oracle client.
    #[must_use]
    pub fn new(provider: Provider, model: impl Into<String>, max_retries: u32) -> Self {
        Self {
            provider,
            http: Client::new(),
            model: model.into(),
            max_retries,
        }
    }

    /// Create a client with no backend (all calls fail).
    #[must_use]
    pub fn none() -> Self {
        Self {
            provider: Provider::None,
            http: Client::new(),
            model: String::new(),
            max_retries: 0,
        }
    }

    /// Whether a backend is configured.
    #[must_use]
    pub fn is_available(&self) -> bool {
        !matches!(self.provider, Provider::None)
    }

    /// POST a JSON body with the retry loop shared by both providers.
    async fn post_json(
        &self,
        url: &str,
        api_key: Option<&str>,
        body: &serde_json::Value,
        timeout_ms: u64,
    ) -> Result<serde_json::Value, OracleError> {
        let mut last_error = String::new();
        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                debug!(
                    "Retrying oracle call (attempt {}/{})",
                    attempt + 1,
                    self.max_retries + 1
                );
            }

            let mut request = self
                .http
                .post(url)
                .json(body)
                .timeout(Duration::from_millis(timeout_ms));
            if let Some(key) = api_key {
                request = request.header("Authorization", format!("Bearer {key}"));
            }

            match request.send().await {
                Ok(resp) if resp.status().is_success() => {
                    return resp
                        .json()
                        .await
                        .map_err(|e| OracleError::ParseError(e.to_string()));
                }
                Ok(resp) => {
                    last_error = format!("HTTP {}", resp.status());
                    warn!("Oracle returned error: {last_error}");
                }
                Err(e) => {
                    last_error = e.to_string();
                    if e.is_timeout() {
                        warn!("Oracle request timed out after {timeout_ms}ms");
                    } else {
                        warn!("Oracle request failed: {last_error}");
                    }
                }
            }
        }

        Err(OracleError::RetriesExhausted {
            attempts: self.max_retries + 1,
            last_error,
        })
    }

    /// Generate using Ollama's chat API.
    async fn chat_ollama(
        &self,
        base_url: &str,
        request: &ChatRequest,
    ) -> Result<ChatResponse, OracleError> {
        let url = format!("{base_url}/api/chat");
        let body = json!({
            "model": self.model,
            "messages": request.messages,
            "stream": false,
            "options": {
                "temperature": request.temperature,
                "num_predict": request.max_tokens,
            }
        });

        let start = Instant::now();
        let reply = self.post_json(&url, None, &body, request.timeout_ms).await?;

        Ok(ChatResponse {
            text: reply["message"]["content"].as_str().unwrap_or("").to_string(),
            tokens_generated: reply["eval_count"].as_u64().unwrap_or(0) as u32,
            latency_ms: start.elapsed().as_millis() as u64,
            model: self.model.clone(),
        })
    }

    /// Generate using an OpenAI-compatible chat-completions API.
    async fn chat_openai(
        &self,
        base_url: &str,
        api_key: &str,
        request: &ChatRequest,
    ) -> Result<ChatResponse, OracleError> {
        let url = format!("{base_url}/v1/chat/completions");
        let body = json!({
            "model": self.model,
            "messages": request.messages,
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
        });

        let start = Instant::now();
        let reply = self
            .post_json(&url, Some(api_key), &body, request.timeout_ms)
            .await?;

        Ok(ChatResponse {
            text: reply["choices"][0]["message"]["content"]
                .as_str()
                .unwrap_or("")
                .to_string(),
            tokens_generated: reply["usage"]["completion_tokens"].as_u64().unwrap_or(0) as u32,
            latency_ms: start.elapsed().as_millis() as u64,
            model: self.model.clone(),
        })
    }
}

#[async_trait]
impl Oracle for HttpOracle {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, OracleError> {
        match &self.provider {
            Provider::None => Err(OracleError::Unavailable(
                "No oracle provider configured".into(),
            )),
            Provider::Ollama { base_url } => self.chat_ollama(base_url, request).await,
            Provider::OpenAiCompatible { base_url, api_key } => {
                self.chat_openai(base_url, api_key, request).await
            }
        }
    }
}

/// Parse a raw oracle reply as structured JSON.
///
/// Returns `Err` if the text is not valid JSON or doesn't match the expected
/// type. Parsing is strict — a reply that merely resembles JSON is rejected.
pub fn parse_structured<T: serde::de::DeserializeOwned>(
    response: &ChatResponse,
) -> Result<T, OracleError> {
    serde_json::from_str(response.text.trim()).map_err(|e| {
        OracleError::ParseError(format!(
            "JSON parse error: {e} — raw text: '{}'",
            response.text
        ))
    })
}
