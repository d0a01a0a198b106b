//! SitePilot Daemon - prompt-driven site navigation and content answers.

use anyhow::{Context, Result};
use clap::Parser;
use sitepilotd::config::Config;
use sitepilotd::llm::HttpCompleter;
use sitepilotd::server::{self, AppState};
use sitepilotd::store::ContentStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "sitepilotd", version, about = "Prompt-driven site navigation daemon")]
struct Args {
    /// Config file (default: /etc/sitepilot/config.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overrides the config file
    #[arg(short, long)]
    bind: Option<String>,

    /// Insert demo pages into an empty content store
    #[arg(long)]
    seed_demo: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    info!("SitePilot Daemon v{} starting", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load(args.config.as_deref()).context("Failed to load config")?;
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }

    let catalog = config.load_catalog().context("Failed to load intent catalog")?;
    info!("Loaded {} intents ({:?} matching)", catalog.len(), config.catalog.matching);

    let store = ContentStore::open(&config.store.path).context("Failed to open content store")?;
    if args.seed_demo {
        store.seed_demo().context("Failed to seed demo pages")?;
    }

    if config.llm.api_key.is_none() {
        warn!("No completion API key configured; /api/ask requests will likely be rejected");
    }
    let completer = HttpCompleter::new(config.llm.clone()).context("Failed to build completion client")?;

    let bind = config.server.bind.clone();
    let state = AppState::new(&config, catalog, store, Arc::new(completer));

    info!("SitePilot Daemon ready");
    server::run(state, &bind).await
}
