use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::GenerationConfig;
use crate::core::backend::GenerationBackend;
use crate::error::{AgentError, Result};

/// OpenAI-compatible chat-completions client (OpenRouter by default).
#[derive(Clone)]
pub struct OpenAIClient {
    api_key: Option<String>,
    base_url: String,
    model: String,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
    timeout: Duration,
    http: reqwest::Client,
}

impl OpenAIClient {
    pub fn from_config(config: &GenerationConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| AgentError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            api_key: config
                .api_key
                .clone()
                .filter(|key| !key.trim().is_empty()),
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            timeout: config.timeout,
            http,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn chat_completion(&self, api_key: &str, body: &Value) -> Result<Value> {
        let request_url = build_chat_url(&self.base_url);
        debug!(
            target: "tripagent::client",
            url = %request_url,
            model = %self.model,
            "sending completion request"
        );

        let response = self
            .http
            .post(&request_url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .header("X-Title", "trip-agent-rs")
            .json(body)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    AgentError::Timeout(format!(
                        "no response within {}s: {err}",
                        self.timeout.as_secs()
                    ))
                } else {
                    AgentError::Backend(format!("HTTP request failed: {err}"))
                }
            })?;

        let status = response.status();
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<u64>().ok());
        let response_text = response
            .text()
            .await
            .map_err(|err| AgentError::Backend(format!("Failed to read response: {err}")))?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(AgentError::RateLimit {
                retry_after: retry_after.unwrap_or(1).max(1),
            });
        }

        let response_json: Value = match serde_json::from_str(&response_text) {
            Ok(value) => value,
            Err(_) if !status.is_success() => {
                return Err(AgentError::Backend(format!(
                    "HTTP {} error: {}",
                    status, response_text
                )));
            }
            Err(err) => {
                return Err(AgentError::Backend(format!("Failed to parse JSON: {err}")));
            }
        };

        if !status.is_success() {
            let api_message = response_json
                .get("error")
                .and_then(|error| error.get("message"))
                .and_then(|value| value.as_str())
                .map(|s| s.to_string())
                .unwrap_or(response_text);

            return Err(AgentError::Backend(format!(
                "HTTP {} error: {}",
                status, api_message
            )));
        }

        if let Some(error) = response_json.get("error") {
            let error_message = error
                .get("message")
                .and_then(|value| value.as_str())
                .map(|s| s.to_string())
                .unwrap_or_else(|| error.to_string());
            return Err(AgentError::Backend(format!("API error: {}", error_message)));
        }

        Ok(response_json)
    }
}

#[async_trait]
impl GenerationBackend for OpenAIClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(AgentError::BackendUnavailable);
        };

        let body = ChatCompletionRequest::new(
            self.model.as_str(),
            vec![json!({ "role": "user", "content": prompt })],
        )
        .with_max_tokens(self.max_tokens)
        .with_temperature(self.temperature)
        .into_value();

        let response = self.chat_completion(api_key, &body).await?;
        extract_message_content(&response)
    }
}

impl fmt::Debug for OpenAIClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAIClient")
            .field("configured", &self.api_key.is_some())
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn build_chat_url(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with("/chat/completions") {
        trimmed.to_string()
    } else {
        format!("{}/chat/completions", trimmed)
    }
}

fn extract_message_content(response: &Value) -> Result<String> {
    response
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .filter(|content| !content.trim().is_empty())
        .map(|content| content.to_string())
        .ok_or_else(|| AgentError::Backend("Response contained no message content".to_string()))
}

#[derive(Clone, Debug)]
pub struct ChatCompletionRequest {
    model: String,
    messages: Vec<Value>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

impl ChatCompletionRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Value>) -> Self {
        Self {
            model: model.into(),
            messages,
            max_tokens: None,
            temperature: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn into_value(self) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": self.messages,
        });

        if let Some(max_tokens) = self.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }

        if let Some(temperature) = self.temperature {
            body["temperature"] = json!(temperature);
        }

        body
    }
}
