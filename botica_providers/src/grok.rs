use async_trait::async_trait;
use botica_core::{AiResponder, Error};
use botica_core::responder::PROBE_PROMPT;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::retry::retry_with_backoff;

/// AI responder backed by an OpenAI-compatible chat-completions API.
/// Defaults target x.ai's Grok.
#[derive(Clone)]
pub struct GrokResponder {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    timeout: Option<Duration>,
    retry_delays: Vec<Duration>,
}

impl GrokResponder {
    #[must_use]
    pub fn new(api_key: String) -> Self {
        info!("Creating GrokResponder");
        Self {
            client: Client::new(),
            api_key,
            base_url: "https://api.x.ai/v1".to_string(),
            model: "grok-beta".to_string(),
            max_tokens: 1000,
            temperature: 0.7,
            timeout: None,
            retry_delays: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_retry_delays(mut self, retry_delays: Vec<Duration>) -> Self {
        self.retry_delays = retry_delays;
        self
    }

    /// Helper method to send a single request
    async fn try_send(&self, prompt: &str) -> anyhow::Result<String> {
        let request = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
        });

        let mut builder = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await?;

        let content = response["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid response format: missing content"))?
            .trim()
            .to_string();

        Ok(content)
    }
}

#[async_trait]
impl AiResponder for GrokResponder {
    async fn generate(&self, prompt: &str) -> botica_core::Result<String> {
        debug!("Sending request to AI API: model={}", self.model);

        let content = retry_with_backoff(|| self.try_send(prompt), &self.retry_delays)
            .await
            .map_err(|e| {
                warn!("AI request failed: {e:#}");
                Error::ai_unavailable(format!("{e:#}"))
            })?;

        debug!("Received {} chars from AI API", content.chars().count());
        Ok(content)
    }

    fn name(&self) -> &'static str {
        "grok"
    }

    /// Single un-retried generation; a probe should fail fast.
    async fn is_available(&self) -> bool {
        match self.try_send(PROBE_PROMPT).await {
            Ok(text) => !text.is_empty(),
            Err(e) => {
                warn!("AI service unavailable: {e:#}");
                false
            }
        }
    }
}
