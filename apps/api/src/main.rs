mod config;
mod errors;
mod extraction;
mod models;
mod ranking;
mod routes;
mod scoring;
mod screening;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::extraction::DocumentTextExtractor;
use crate::routes::build_router;
use crate::scoring::{CandidateScorer, WeightedMatchScorer};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on unparseable env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting screener v{}", env!("CARGO_PKG_VERSION"));

    let scorer = Arc::new(WeightedMatchScorer::default());
    info!(
        "Scorer initialized (backend: {}, weights: {:?})",
        scorer.backend(),
        scoring::ScoringWeights::default()
    );
    info!(
        "Limits: {} MB per resume, {} resumes per screening",
        config.max_resume_size_mb, config.max_candidates
    );
    if config.email.enabled {
        info!(
            "Results notifications enabled for {} (simulation: {})",
            config.email.recipient, config.email.simulation_mode
        );
    }

    // Build app state
    let state = AppState {
        config: config.clone(),
        text_extractor: Arc::new(DocumentTextExtractor),
        scorer,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
