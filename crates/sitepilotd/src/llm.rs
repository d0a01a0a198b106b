//! Completion client - forwards a context window to a text-completion API.
//!
//! Speaks the OpenAI-style `/v1/completions` protocol (Together.ai by
//! default). A fake client implementing [`Completer`] is used in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::config::LlmConfig;

/// Completion errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid JSON response: {0}")]
    InvalidJson(String),

    #[error("Request timeout after {0} seconds")]
    Timeout(u64),

    #[error("Completion API returned no choices")]
    EmptyResponse,
}

/// Anything that can complete a prompt
#[async_trait]
pub trait Completer: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    top_k: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    #[serde(default)]
    text: String,
}

/// HTTP client for an OpenAI-style completions endpoint
pub struct HttpCompleter {
    config: LlmConfig,
    client: reqwest::Client,
}

impl HttpCompleter {
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn url(&self) -> String {
        format!("{}/v1/completions", self.config.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl Completer for HttpCompleter {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let body = CompletionRequest {
            model: &self.config.model,
            prompt,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            top_p: self.config.top_p,
            top_k: self.config.top_k,
        };

        let mut request = self.client.post(self.url()).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        debug!("Sending completion request to {}", self.url());
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                LlmError::Timeout(self.config.timeout_secs)
            } else {
                LlmError::Http(e.to_string())
            }
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(LlmError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        parse_completion(&text)
    }
}

/// First choice's text from a completions response body
pub fn parse_completion(body: &str) -> Result<String, LlmError> {
    let parsed: CompletionResponse =
        serde_json::from_str(body).map_err(|e| LlmError::InvalidJson(e.to_string()))?;

    parsed
        .choices
        .into_iter()
        .next()
        .map(|c| c.text)
        .ok_or(LlmError::EmptyResponse)
}

/// Instruction prompt asking for an answer grounded in `context`
pub fn build_prompt(context: &str, question: &str) -> String {
    format!(
        "<s>[INST] I'm going to provide you with some context information, and then ask you a question. \
         Please answer the question based on the context provided.\n\n\
         Context:\n{}\n\n\
         Question: {}\n\n\
         Please provide a detailed and accurate answer based on the context. [/INST]",
        context, question
    )
}

/// Drop an echoed instruction block, keeping the text after the last `[/INST]`
pub fn strip_instruction_echo(answer: &str) -> String {
    if answer.contains("[INST]") {
        answer
            .rsplit("[/INST]")
            .next()
            .unwrap_or(answer)
            .trim()
            .to_string()
    } else {
        answer.trim().to_string()
    }
}
