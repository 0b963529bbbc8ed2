mod catalog;
mod config;
mod errors;
mod interview;
mod models;
mod reporting;
mod routes;
mod scoring;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::{InMemoryQuestionBank, QuestionBank, SelectionPolicy};
use crate::config::Config;
use crate::interview::store::SessionStore;
use crate::routes::build_router;
use crate::scoring::evaluator::HttpEvaluator;
use crate::scoring::ScoringEngine;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; invalid values abort startup
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Interview API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize question catalog
    let policy = SelectionPolicy::from_seed(config.question_selection_seed);
    let question_bank: Arc<dyn QuestionBank> = match &config.question_bank_path {
        Some(path) => Arc::new(InMemoryQuestionBank::from_json_file(path, policy)?),
        None => {
            info!("No QUESTION_BANK_PATH set, using built-in questions");
            Arc::new(InMemoryQuestionBank::seeded(policy))
        }
    };
    info!("Question selection policy: {:?}", policy);

    // Initialize scoring engine (heuristic only unless EVALUATOR_URL is set)
    let scoring = build_scoring_engine(&config)?;
    info!(
        "Scoring backend: {} (timeout {:?}, sub-score scale {})",
        scoring.backend(),
        config.evaluator_timeout,
        config.evaluator_score_scale
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        question_bank,
        sessions: Arc::new(SessionStore::with_retention(config.abandoned_retention)),
        scoring,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_scoring_engine(config: &Config) -> Result<ScoringEngine> {
    let Some(url) = &config.evaluator_url else {
        return Ok(ScoringEngine::local());
    };

    let evaluator = HttpEvaluator::new(url, config.evaluator_timeout)
        .context("Failed to build evaluator HTTP client")?;
    info!("Remote evaluator configured at {url}");

    Ok(ScoringEngine::with_evaluator(
        Arc::new(evaluator),
        config.evaluator_timeout,
        config.evaluator_score_scale,
    ))
}
