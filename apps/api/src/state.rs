use std::sync::Arc;

use crate::catalog::QuestionBank;
use crate::config::Config;
use crate::interview::store::SessionStore;
use crate::scoring::ScoringEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable catalog. Default: in-memory bank seeded at startup.
    pub question_bank: Arc<dyn QuestionBank>,
    pub sessions: Arc<SessionStore>,
    /// Remote evaluator with heuristic fallback, or heuristic only.
    pub scoring: ScoringEngine,
}
