//! Error types for sitepilotd.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use sitepilot_common::api::{PromptResponse, ResponseStatus};
use sitepilot_common::CatalogError;
use thiserror::Error;
use tracing::error;

use crate::llm::LlmError;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store task failed: {0}")]
    Task(String),
}

/// Errors surfaced by the HTTP handlers
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Prompt is required.")]
    MissingPrompt,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Completion error: {0}")]
    Llm(#[from] LlmError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MissingPrompt => (
                StatusCode::BAD_REQUEST,
                Json(PromptResponse::new(ResponseStatus::Error).with_message(self.to_string())),
            )
                .into_response(),
            ApiError::Store(_) | ApiError::Llm(_) => {
                error!("  Request failed: {}", self);
                let mut body = PromptResponse::new(ResponseStatus::Error)
                    .with_message("Failed to perform action.");
                body.error = Some(self.to_string());
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}
