//! Answer pipeline - content retrieval, ranking and completion.

use sitepilot_common::{analyze_prompt, dedup_by_id, rank_with_prefix, ContentRecord};
use tracing::{info, warn};

use crate::error::ApiError;
use crate::llm::{build_prompt, strip_instruction_echo, Completer, LlmError};
use crate::store::{ContentStore, SearchLimits};

/// Answer used when the completion API returns nothing usable
pub const FALLBACK_ANSWER: &str = "I apologize, but I couldn't generate a response based on the available information. Please try asking your question in a different way.";

/// Message returned when no content matches
pub const NOT_FOUND_MESSAGE: &str = "I searched our database but couldn't find information related to your question. Could you please rephrase or ask about something else?";

#[derive(Debug, Clone, PartialEq)]
pub enum AnswerOutcome {
    Answered { thinking: String, answer: String },
    NotFound { thinking: String },
}

/// Retrieval settings for one request
#[derive(Debug, Clone, Copy)]
pub struct AnswerSettings {
    pub limits: SearchLimits,
    pub prefix_chars: usize,
}

/// Search, clean and rank content for `prompt`, most relevant first
pub async fn retrieve_context(
    prompt: &str,
    store: &ContentStore,
    settings: AnswerSettings,
) -> Result<Vec<ContentRecord>, ApiError> {
    let query = prompt.to_string();
    let limits = settings.limits;
    let records = store
        .run(move |s| s.search_with_fallback(&query, limits))
        .await?;

    let records: Vec<ContentRecord> = dedup_by_id(records)
        .into_iter()
        .map(ContentRecord::cleaned)
        .collect();

    Ok(rank_with_prefix(records, prompt, settings.prefix_chars))
}

/// Answer `prompt` from stored content via the completion API
pub async fn answer(
    prompt: &str,
    store: &ContentStore,
    completer: &dyn Completer,
    settings: AnswerSettings,
) -> Result<AnswerOutcome, ApiError> {
    let thinking = analyze_prompt(prompt);

    let ranked = retrieve_context(prompt, store, settings).await?;
    if ranked.is_empty() {
        info!("  No content found for prompt");
        return Ok(AnswerOutcome::NotFound { thinking });
    }

    info!("  Building context from {} records", ranked.len());
    let context = ranked
        .iter()
        .map(|r| r.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    let answer = match completer.complete(&build_prompt(&context, prompt)).await {
        Ok(text) => strip_instruction_echo(&text),
        Err(LlmError::EmptyResponse) => {
            warn!("  Completion API returned no choices");
            FALLBACK_ANSWER.to_string()
        }
        Err(e) => return Err(e.into()),
    };

    let answer = if answer.is_empty() {
        FALLBACK_ANSWER.to_string()
    } else {
        answer
    };

    Ok(AnswerOutcome::Answered { thinking, answer })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FakeCompleter {
        reply: Result<String, LlmError>,
        seen: Mutex<Vec<String>>,
    }

    impl FakeCompleter {
        fn new(reply: Result<String, LlmError>) -> Self {
            Self {
                reply,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Completer for FakeCompleter {
        async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
            self.seen.lock().unwrap().push(prompt.to_string());
            self.reply.clone()
        }
    }

    fn settings() -> AnswerSettings {
        AnswerSettings {
            limits: SearchLimits::default(),
            prefix_chars: 1000,
        }
    }

    fn store() -> ContentStore {
        let store = ContentStore::open_in_memory().unwrap();
        store.insert(Some("a"), "<p>Board&nbsp;members meet yearly</p>").unwrap();
        store.insert(Some("b"), "<p>GS1 barcodes identify products</p>").unwrap();
        store
    }

    #[tokio::test]
    async fn test_context_is_cleaned_and_ranked() {
        let ranked = retrieve_context("barcodes and board members", &store(), settings())
            .await
            .unwrap();
        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|r| !r.content.contains('<')));
        assert_eq!(ranked[0].content, "Board members meet yearly");
    }

    #[tokio::test]
    async fn test_answer_uses_context() {
        let completer = FakeCompleter::new(Ok("[INST] echo [/INST] Products get barcodes.".into()));
        let outcome = answer("What are GS1 barcodes?", &store(), &completer, settings())
            .await
            .unwrap();

        match outcome {
            AnswerOutcome::Answered { thinking, answer } => {
                assert_eq!(answer, "Products get barcodes.");
                assert!(thinking.contains("definition or explanation"));
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        let seen = completer.seen.lock().unwrap();
        assert!(seen[0].contains("GS1 barcodes identify products"));
    }

    #[tokio::test]
    async fn test_not_found_skips_completion() {
        let completer = FakeCompleter::new(Ok("unused".into()));
        let outcome = answer("weather forecast", &store(), &completer, settings())
            .await
            .unwrap();
        assert!(matches!(outcome, AnswerOutcome::NotFound { .. }));
        assert!(completer.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_completion_falls_back() {
        let completer = FakeCompleter::new(Err(LlmError::EmptyResponse));
        let outcome = answer("barcodes", &store(), &completer, settings()).await.unwrap();
        assert_eq!(
            outcome,
            AnswerOutcome::Answered {
                thinking: analyze_prompt("barcodes"),
                answer: FALLBACK_ANSWER.to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let completer = FakeCompleter::new(Err(LlmError::Timeout(60)));
        let err = answer("barcodes", &store(), &completer, settings()).await.unwrap_err();
        assert!(matches!(err, ApiError::Llm(LlmError::Timeout(60))));
    }
}
