mod config;
mod db;
mod errors;
mod matching;
mod models;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::matching::orchestrator::MatchOrchestrator;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::postgres::PgMatchStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillMatch API v{}", env!("CARGO_PKG_VERSION"));

    let matching_config = config.matching_config();
    info!(
        "Matching policy: preferred_in_denominator={} underleveled<{} at importance>={} fetch_timeout={:?}",
        matching_config.scoring.preferred_in_denominator,
        matching_config.gap.max_skill_value,
        matching_config.gap.min_importance,
        matching_config.fetch_timeout
    );

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url, matching_config.fetch_timeout).await?;

    // Profile and job stores share one pool
    let store = Arc::new(PgMatchStore::new(db));
    let orchestrator = Arc::new(MatchOrchestrator::new(
        store.clone(),
        store,
        matching_config,
    ));

    let state = AppState { orchestrator };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client domain is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
