mod config;
mod editing;
mod enhance;
mod errors;
mod llm_client;
mod models;
mod persistence;
mod preview;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, SnapshotBackend};
use crate::editing::DocumentStore;
use crate::enhance::{DisabledGenerator, EnhancementGateway, EnhancementTracker, TextGenerator};
use crate::llm_client::LlmClient;
use crate::persistence::snapshot::{FileSnapshotStore, RedisSnapshotStore};
use crate::persistence::{restore_or_default, SnapshotStore};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume API v{}", env!("CARGO_PKG_VERSION"));

    let snapshots = build_snapshot_store(&config)?;
    info!("Snapshot mirror: {}", snapshots.describe());

    let initial = restore_or_default(snapshots.as_ref()).await;
    let store = Arc::new(DocumentStore::new(initial, snapshots));

    let generator: Arc<dyn TextGenerator> = match &config.anthropic_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone()).context("Failed to build LLM client")?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Arc::new(llm)
        }
        None => {
            info!("ANTHROPIC_API_KEY not set, text enhancement disabled");
            Arc::new(DisabledGenerator)
        }
    };

    let state = AppState {
        store,
        gateway: EnhancementGateway::new(generator),
        tracker: EnhancementTracker::new(),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_snapshot_store(config: &Config) -> Result<Arc<dyn SnapshotStore>> {
    Ok(match config.snapshot_backend {
        SnapshotBackend::File => Arc::new(FileSnapshotStore::new(config.snapshot_path.clone())),
        SnapshotBackend::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .context("REDIS_URL is required for the redis snapshot backend")?;
            let client = redis::Client::open(url).context("Invalid REDIS_URL")?;
            Arc::new(RedisSnapshotStore::new(client, config.snapshot_key.clone()))
        }
    })
}
