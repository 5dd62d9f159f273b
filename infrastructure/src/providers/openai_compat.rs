//! OpenAI-compatible chat completion gateway
//!
//! Speaks the `/v1/chat/completions` dialect shared by OpenAI, vLLM, Ollama,
//! and most hosted inference providers. One gateway instance covers one base
//! URL and a configured list of models.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use verdict_application::ports::backend_gateway::{BackendGateway, GatewayError};
use verdict_domain::ModelId;

const DEFAULT_TIMEOUT_SECS: u64 = 120;
const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Gateway to an OpenAI-compatible completion endpoint
pub struct OpenAiCompatGateway {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    models: Vec<ModelId>,
    max_tokens: u32,
    timeout_secs: u64,
}

impl OpenAiCompatGateway {
    /// Gateway for `base_url` serving the given models
    ///
    /// `api_key` is attached as a bearer token when present; local endpoints
    /// such as Ollama run without one.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        models: Vec<ModelId>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            models,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// Pull the first choice's content out of a parsed response
fn extract_content(response: ChatResponse) -> Result<String, GatewayError> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| GatewayError::RequestFailed("response contained no choices".to_string()))
}

#[async_trait]
impl BackendGateway for OpenAiCompatGateway {
    async fn complete(
        &self,
        model: &ModelId,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f64,
    ) -> Result<String, GatewayError> {
        if !self.models.contains(model) {
            return Err(GatewayError::ModelNotAvailable(model.to_string()));
        }

        let request = ChatRequest {
            model: model.as_str(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature,
            max_tokens: self.max_tokens,
        };

        let url = format!("{}/v1/chat/completions", self.base_url);
        debug!(%url, model = %model, "Sending completion request");

        let mut builder = self
            .client
            .post(&url)
            .timeout(Duration::from_secs(self.timeout_secs))
            .json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::Timeout(self.timeout_secs)
            } else if e.is_connect() {
                GatewayError::ConnectionError(e.to_string())
            } else {
                GatewayError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::RequestFailed(format!(
                "HTTP {status}: {body}"
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::RequestFailed(e.to_string()))?;
        extract_content(parsed)
    }

    async fn available_models(&self) -> Result<Vec<ModelId>, GatewayError> {
        Ok(self.models.clone())
    }
}
