use async_trait::async_trait;
use serde_json::{Value, json};
use std::time::Duration;

use crate::error::ProviderError;

pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(30);

const HF_MAX_LENGTH: u32 = 1000;
const HF_TEMPERATURE: f64 = 0.7;

// Request/response shape spoken by a provider endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    // {inputs, parameters} in, [{generated_text}] or {generated_text} out
    HuggingFace,
    // {model, prompt, stream} in, {response} out
    Ollama,
    // same request as Ollama, {text} or {response} out
    TextGen,
}

// One remote text-generation endpoint
#[derive(Debug, Clone)]
pub struct Provider {
    pub name: String,
    pub endpoint: String,
    pub headers: Vec<(String, String)>,
    pub kind: ProviderKind,
    pub model: String,
    pub enabled: bool,
}

impl Provider {
    pub fn new(
        name: impl Into<String>,
        kind: ProviderKind,
        endpoint: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
            headers: Vec::new(),
            kind,
            model: model.into(),
            enabled: true,
        }
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn request_body(&self, prompt: &str) -> Value {
        match self.kind {
            ProviderKind::HuggingFace => json!({
                "inputs": prompt,
                "parameters": {
                    "max_length": HF_MAX_LENGTH,
                    "temperature": HF_TEMPERATURE,
                    "do_sample": true,
                }
            }),
            ProviderKind::Ollama | ProviderKind::TextGen => json!({
                "model": self.model,
                "prompt": prompt,
                "stream": false,
            }),
        }
    }

    /// Pulls the generated text out of a raw response body.
    pub fn parse_response(&self, body: &str) -> Result<String, ProviderError> {
        if body.trim().is_empty() {
            return Err(ProviderError::new(&self.name, "empty response body"));
        }

        let value: Value = serde_json::from_str(body)
            .map_err(|e| ProviderError::new(&self.name, format!("Parse Error: {}", e)))?;

        if is_empty_value(&value) {
            return Err(ProviderError::new(&self.name, "response body has no content"));
        }

        let extracted = match self.kind {
            ProviderKind::HuggingFace => huggingface_text(&value),
            ProviderKind::Ollama | ProviderKind::TextGen => {
                string_field(&value, "response").or_else(|| string_field(&value, "text"))
            }
        };

        let text = extracted
            .or_else(|| generic_text(&value))
            .unwrap_or_else(|| value.to_string());

        if text.trim().is_empty() {
            return Err(ProviderError::new(&self.name, "provider returned empty text"));
        }
        Ok(text)
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

fn huggingface_text(value: &Value) -> Option<String> {
    match value {
        Value::Array(items) => items
            .first()
            .and_then(|first| string_field(first, "generated_text")),
        other => string_field(other, "generated_text"),
    }
}

fn generic_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        other => string_field(other, "content").or_else(|| string_field(other, "text")),
    }
}

// Seam between the orchestrator and the network
#[async_trait]
pub trait ProviderClient: Send + Sync {
    async fn call(&self, provider: &Provider, prompt: &str) -> Result<String, ProviderError>;
}

// reqwest-backed client, one POST per call and no retries
#[derive(Debug, Clone)]
pub struct HttpProviderClient {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpProviderClient {
    pub fn new(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

impl Default for HttpProviderClient {
    fn default() -> Self {
        Self::new(reqwest::Client::new(), DEFAULT_PROVIDER_TIMEOUT)
    }
}

#[async_trait]
impl ProviderClient for HttpProviderClient {
    async fn call(&self, provider: &Provider, prompt: &str) -> Result<String, ProviderError> {
        let mut request = self
            .client
            .post(&provider.endpoint)
            .timeout(self.timeout)
            .json(&provider.request_body(prompt));

        for (key, value) in &provider.headers {
            request = request.header(key.as_str(), value.as_str());
        }

        let res = request.send().await.map_err(|e| {
            let message = if e.is_timeout() {
                format!("Request timed out after {:?}", self.timeout)
            } else {
                format!("Request failed: {}", e)
            };
            ProviderError::new(&provider.name, message)
        })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| ProviderError::new(&provider.name, format!("Failed to read body: {}", e)))?;

        if !status.is_success() {
            return Err(ProviderError::new(
                &provider.name,
                format!("HTTP {}: {}", status, body),
            ));
        }

        provider.parse_response(&body)
    }
}
