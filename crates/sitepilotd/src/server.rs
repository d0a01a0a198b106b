//! HTTP server for sitepilotd

use anyhow::Result;
use axum::Router;
use sitepilot_common::resolver::{matcher_for, IntentResolver, SynonymMatcher};
use sitepilot_common::Catalog;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::answer::AnswerSettings;
use crate::config::Config;
use crate::llm::Completer;
use crate::routes;
use crate::session::SessionLanguages;
use crate::store::{ContentStore, SearchLimits};

/// Application state shared across handlers
pub struct AppState {
    pub catalog: Catalog,
    pub resolver: IntentResolver<Box<dyn SynonymMatcher>>,
    pub sessions: SessionLanguages,
    pub store: ContentStore,
    pub completer: Arc<dyn Completer>,
    /// Site base URL navigation targets are joined onto
    pub base_url: String,
    pub max_suggestions: usize,
    pub answer_settings: AnswerSettings,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        config: &Config,
        catalog: Catalog,
        store: ContentStore,
        completer: Arc<dyn Completer>,
    ) -> Self {
        Self {
            catalog,
            resolver: IntentResolver::with_matcher(matcher_for(config.catalog.matching)),
            sessions: SessionLanguages::new(),
            store,
            completer,
            base_url: config.server.base_url.clone(),
            max_suggestions: config.catalog.max_suggestions,
            answer_settings: AnswerSettings {
                limits: SearchLimits::from(&config.ranking),
                prefix_chars: config.ranking.prefix_chars,
            },
            start_time: Instant::now(),
        }
    }

    /// Absolute URL for a site path
    pub fn target_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Build the application router
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::prompt_routes())
        .merge(routes::answer_routes())
        .merge(routes::search_routes())
        .merge(routes::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server until ctrl-c
pub async fn run(state: AppState, bind: &str) -> Result<()> {
    let app = app(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("  Listening on http://{}", listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async {
        let _ = tokio::signal::ctrl_c().await;
        info!("Shutting down gracefully");
    })
    .await?;
    Ok(())
}
