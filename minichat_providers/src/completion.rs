use async_trait::async_trait;
use minichat_core::{GeneratorInfo, ResponseGenerator, clean_response};
use reqwest::Client;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::retry::{RetryPolicy, retry_with_backoff};

/// Sampling settings sent with every completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSettings {
    pub model: String,
    pub max_tokens: usize,
    pub temperature: f32,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            model: "google/flan-t5-base".to_string(),
            max_tokens: 128,
            temperature: 0.7,
        }
    }
}

/// Client for an OpenAI-compatible `/completions` endpoint.
///
/// The rendered prompt is sent verbatim; the returned text is cut at the
/// first end-of-text marker.
pub struct CompletionProvider {
    client: Client,
    api_key: String,
    base_url: String,
    settings: CompletionSettings,
    retry: RetryPolicy,
}

impl CompletionProvider {
    pub fn new(base_url: String, api_key: String, settings: CompletionSettings) -> Self {
        info!("Creating CompletionProvider for {base_url}");
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            settings,
            retry: RetryPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn build_request(&self, prompt: &str) -> Value {
        json!({
            "model": self.settings.model,
            "prompt": prompt,
            "max_tokens": self.settings.max_tokens,
            "temperature": self.settings.temperature,
            "stop": ["\nHuman:"],
        })
    }

    async fn try_send(&self, request: &Value) -> anyhow::Result<String> {
        let mut builder = self
            .client
            .post(format!("{}/completions", self.base_url))
            .json(request);
        if !self.api_key.is_empty() {
            builder = builder.bearer_auth(&self.api_key);
        }

        let response = builder
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        parse_completion(&response)
    }
}

/// Extract the generated text from a completions response body.
fn parse_completion(response: &Value) -> anyhow::Result<String> {
    response["choices"][0]["text"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("Invalid response format: missing choices[0].text"))
}

#[async_trait]
impl ResponseGenerator for CompletionProvider {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        let request = self.build_request(prompt);

        debug!(
            "Sending completion request: model={}, prompt_chars={}",
            self.settings.model,
            prompt.len()
        );

        let raw = retry_with_backoff(|| self.try_send(&request), &self.retry).await?;

        debug!("Received completion ({} chars)", raw.len());
        Ok(clean_response(&raw))
    }

    fn model_name(&self) -> &str {
        &self.settings.model
    }

    fn describe(&self) -> GeneratorInfo {
        GeneratorInfo {
            model_name: self.settings.model.clone(),
            backend: self.base_url.clone(),
        }
    }
}
