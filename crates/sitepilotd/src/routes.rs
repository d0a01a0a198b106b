//! API routes for sitepilotd
//!
//! - POST /api/prompt: resolve a navigation or language-switch prompt
//! - POST /api/ask: answer a question from stored page content
//! - POST /api/search: raw substring search of the page store
//! - GET /api/health: liveness, catalog size and tracked sessions

use axum::{
    extract::{ConnectInfo, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use sitepilot_common::api::{HealthResponse, PromptRequest, PromptResponse, ResponseStatus};
use sitepilot_common::{suggest, Resolution};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::answer::{self, AnswerOutcome, NOT_FOUND_MESSAGE};
use crate::error::ApiError;
use crate::server::AppState;
use crate::session::session_id;

type AppStateArc = Arc<AppState>;

/// Cap on pages returned by the raw search
const SEARCH_LIMIT: usize = 50;

/// Trimmed, non-empty prompt from an optional JSON body
fn require_prompt(body: &Option<Json<PromptRequest>>) -> Result<String, ApiError> {
    body.as_ref()
        .and_then(|Json(req)| req.prompt())
        .map(str::to_string)
        .ok_or(ApiError::MissingPrompt)
}

// ============================================================================
// Prompt Routes
// ============================================================================

pub fn prompt_routes() -> Router<AppStateArc> {
    Router::new().route("/api/prompt", post(handle_prompt))
}

async fn handle_prompt(
    State(state): State<AppStateArc>,
    headers: HeaderMap,
    peer: Option<ConnectInfo<SocketAddr>>,
    body: Option<Json<PromptRequest>>,
) -> Result<Response, ApiError> {
    let prompt = require_prompt(&body)?;
    let session = session_id(&headers, peer.map(|ConnectInfo(addr)| addr));

    let resolution = state.resolver.resolve(&prompt, &state.catalog);
    info!("  Prompt resolved: {:?}", resolution.as_ref().map(|r| r.key()));

    match resolution {
        Some(Resolution::Language(language)) => {
            state.sessions.set(&session, language).await;
            info!("  Session {} language set to {}", session, language);
            let body = PromptResponse::success()
                .with_message(format!("Language set to {}.", language.display_name()))
                .with_language(language);
            Ok(Json(body).into_response())
        }
        Some(Resolution::Navigate(key)) => match state.catalog.get(&key) {
            Some(intent) => {
                let language = state.sessions.get_or_default(&session).await;
                let mut body = PromptResponse::success()
                    .with_prompt(prompt.as_str())
                    .with_message(intent.suggestion.replacen("navigate to", "Navigated to", 1))
                    .with_language(language);
                body.url = Some(format!("/{}", intent.path));
                body.target = Some(state.target_url(&intent.path));
                Ok(Json(body).into_response())
            }
            None => Ok(unrecognized(&state, &prompt)),
        },
        None => Ok(unrecognized(&state, &prompt)),
    }
}

fn unrecognized(state: &AppState, prompt: &str) -> Response {
    let mut body = PromptResponse::new(ResponseStatus::Failed).with_message("Unrecognized prompt.");
    body.suggestions = Some(suggest(prompt, &state.catalog, state.max_suggestions));
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

// ============================================================================
// Answer Routes
// ============================================================================

pub fn answer_routes() -> Router<AppStateArc> {
    Router::new().route("/api/ask", post(handle_ask))
}

async fn handle_ask(
    State(state): State<AppStateArc>,
    body: Option<Json<PromptRequest>>,
) -> Result<Response, ApiError> {
    let prompt = require_prompt(&body)?;
    info!("  Answering prompt ({} chars)", prompt.chars().count());

    let outcome = answer::answer(
        &prompt,
        &state.store,
        state.completer.as_ref(),
        state.answer_settings,
    )
    .await?;

    let response = match outcome {
        AnswerOutcome::Answered { thinking, answer } => {
            let mut body = PromptResponse::success().with_thinking(thinking);
            body.answer = Some(answer);
            Json(body).into_response()
        }
        AnswerOutcome::NotFound { thinking } => {
            let body = PromptResponse::new(ResponseStatus::NotFound)
                .with_thinking(thinking)
                .with_message(NOT_FOUND_MESSAGE);
            (StatusCode::NOT_FOUND, Json(body)).into_response()
        }
    };
    Ok(response)
}

// ============================================================================
// Search Routes
// ============================================================================

pub fn search_routes() -> Router<AppStateArc> {
    Router::new().route("/api/search", post(handle_search))
}

async fn handle_search(
    State(state): State<AppStateArc>,
    body: Option<Json<PromptRequest>>,
) -> Result<Response, ApiError> {
    let prompt = require_prompt(&body)?;

    let needle = prompt.clone();
    let pages = state
        .store
        .run(move |s| s.search(&needle, SEARCH_LIMIT))
        .await?;

    if pages.is_empty() {
        let body = PromptResponse::new(ResponseStatus::NotFound)
            .with_message("No matching data found.");
        return Ok((StatusCode::NOT_FOUND, Json(body)).into_response());
    }

    info!("  Search matched {} pages", pages.len());
    let mut body = PromptResponse::success();
    body.pages = Some(pages);
    Ok(Json(body).into_response())
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/api/health", get(health_check))
}

async fn health_check(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        intents: state.catalog.len(),
        sessions: state.sessions.len().await,
    })
}
