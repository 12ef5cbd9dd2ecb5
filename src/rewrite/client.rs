//! Chat-completions client used to rewrite resume sections

use crate::config::RewriteConfig;
use crate::error::{Result, ResumeGapError};
use crate::rewrite::prompts::{parse_rewritten_sections, PromptTemplates, RewriteRequest, RewrittenSections};
use crate::rewrite::RewriteService;
use log::{debug, info, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Rewrites sections through an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Clone)]
pub struct OpenAiRewriter {
    client: Client,
    api_key: String,
    config: RewriteConfig,
    templates: PromptTemplates,
}

impl OpenAiRewriter {
    pub fn new(config: RewriteConfig, api_key: String) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(ResumeGapError::Configuration("Rewrite API key is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key,
            config,
            templates: PromptTemplates::default(),
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.api_base.trim_end_matches('/'))
    }

    /// Send one prompt, retrying rate limits and server errors with
    /// exponential backoff (1s, 2s, 4s, ...).
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.config.temperature,
        };

        let attempts = self.config.max_retries.saturating_add(1);
        let mut last_error: Option<ResumeGapError> = None;

        for attempt in 0..attempts {
            if attempt > 0 {
                let delay = backoff_delay(attempt);
                warn!(
                    "Rewrite call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self
                .client
                .post(self.endpoint())
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    last_error = Some(e.into());
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let text = response.text().await.unwrap_or_default();
                warn!("Rewrite API returned {}: {}", status, text);
                last_error = Some(ResumeGapError::Network(format!("status {}: {}", status.as_u16(), text)));
                continue;
            }

            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiError>(&text)
                    .map(|e| e.error.message)
                    .unwrap_or(text);
                return Err(ResumeGapError::Rewrite(format!(
                    "API error (status {}): {}",
                    status.as_u16(),
                    message
                )));
            }

            let reply: ChatResponse = response.json().await?;

            if let Some(usage) = &reply.usage {
                debug!(
                    "Rewrite call succeeded: prompt_tokens={}, completion_tokens={}",
                    usage.prompt_tokens, usage.completion_tokens
                );
            }

            return reply
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message.content)
                .filter(|content| !content.trim().is_empty())
                .ok_or_else(|| ResumeGapError::Rewrite("Model returned empty content".to_string()));
        }

        Err(last_error.unwrap_or_else(|| {
            ResumeGapError::Network(format!("Rate limited after {} attempts", attempts))
        }))
    }
}

/// Delay before the given retry (1-based): 1s, 2s, 4s, ... capped at 2^16 seconds.
fn backoff_delay(retry: u32) -> Duration {
    let exponent = retry.saturating_sub(1).min(16);
    Duration::from_secs(1u64 << exponent)
}

impl RewriteService for OpenAiRewriter {
    async fn rewrite(&self, request: &RewriteRequest) -> Result<RewrittenSections> {
        let start = Instant::now();
        let prompt = self.templates.render_rewrite(request);
        let output = self.complete(&prompt).await?;
        let sections = parse_rewritten_sections(&output)?;

        info!(
            "Rewrote summary and skills with {} in {}ms",
            self.config.model,
            start.elapsed().as_millis()
        );

        Ok(sections)
    }
}
