// Answer scoring: optional remote evaluator with a bounded timeout, falling
// back to the local heuristic. Scoring never fails from the caller's view.

pub mod evaluator;
pub mod heuristic;

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::models::interview::AnswerScores;
use crate::models::question::Difficulty;
use crate::scoring::evaluator::{sanitize, EvaluationRequest, Evaluator, EvaluatorError};

/// Scores answers on the 0–100 scale. Holds at most one remote evaluator.
#[derive(Clone)]
pub struct ScoringEngine {
    evaluator: Option<Arc<dyn Evaluator>>,
    timeout: Duration,
    sub_score_scale: u32,
}

impl ScoringEngine {
    /// Heuristic-only engine.
    pub fn local() -> Self {
        Self {
            evaluator: None,
            timeout: Duration::ZERO,
            sub_score_scale: 100,
        }
    }

    pub fn with_evaluator(
        evaluator: Arc<dyn Evaluator>,
        timeout: Duration,
        sub_score_scale: u32,
    ) -> Self {
        Self {
            evaluator: Some(evaluator),
            timeout,
            sub_score_scale,
        }
    }

    pub fn backend(&self) -> &str {
        self.evaluator
            .as_ref()
            .map(|e| e.name())
            .unwrap_or("heuristic")
    }

    pub async fn score(
        &self,
        user_answer: &str,
        model_answer: &str,
        difficulty: Difficulty,
    ) -> AnswerScores {
        let Some(evaluator) = &self.evaluator else {
            return heuristic::score_answer(user_answer, model_answer);
        };

        let request = EvaluationRequest {
            user_answer,
            model_answer,
            difficulty,
        };

        let result = match tokio::time::timeout(self.timeout, evaluator.evaluate(&request)).await {
            Ok(result) => result,
            Err(_) => Err(EvaluatorError::Timeout(self.timeout)),
        };

        match result {
            Ok(raw) => {
                debug!("Scored answer via {} evaluator", evaluator.name());
                sanitize(raw, self.sub_score_scale)
            }
            Err(e) => {
                warn!(
                    "{} evaluator unavailable, using heuristic scores: {e}",
                    evaluator.name()
                );
                heuristic::score_answer(user_answer, model_answer)
            }
        }
    }
}
