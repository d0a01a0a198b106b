//! HTTP request/response types.

use serde::{Deserialize, Serialize};

use crate::content::ContentRecord;
use crate::language::Language;

/// Body of `/api/prompt`, `/api/ask` and `/api/search`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

impl PromptRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: Some(prompt.into()),
        }
    }

    /// Trimmed prompt, `None` when missing or blank
    pub fn prompt(&self) -> Option<&str> {
        self.prompt
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    Success,
    Failed,
    NotFound,
    Error,
}

/// Response envelope shared by the prompt endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptResponse {
    pub status: ResponseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    /// Site-relative path of a navigation target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Absolute URL of a navigation target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<Vec<ContentRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PromptResponse {
    pub fn new(status: ResponseStatus) -> Self {
        Self {
            status,
            message: None,
            prompt: None,
            language: None,
            url: None,
            target: None,
            suggestions: None,
            thinking: None,
            answer: None,
            pages: None,
            error: None,
        }
    }

    pub fn success() -> Self {
        Self::new(ResponseStatus::Success)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    pub fn with_thinking(mut self, thinking: impl Into<String>) -> Self {
        self.thinking = Some(thinking.into());
        self
    }
}

/// Body of `/api/health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub intents: usize,
    /// Sessions with a stored language preference
    pub sessions: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_prompt_is_missing() {
        assert_eq!(PromptRequest::default().prompt(), None);
        assert_eq!(PromptRequest::new("   \n").prompt(), None);
        assert_eq!(PromptRequest::new(" team ").prompt(), Some("team"));
    }

    #[test]
    fn test_unset_fields_omitted() {
        let json = serde_json::to_value(PromptResponse::success().with_message("ok")).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "success", "message": "ok" }));
    }
}
