//! Interview state machine: `ongoing → completed` or `ongoing → abandoned`.
//!
//! Every transition checks its precondition before touching any field, so a
//! rejected call leaves the session exactly as it was.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::interview::{
    AnswerRecord, AnswerScores, Insights, InterviewSession, ScoreSummary, SessionStatus,
};
use crate::models::question::{Difficulty, Question};
use crate::reporting::summary::{derive_insights, summarize};

/// What a successful answer submission leads to.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NextStep {
    NextQuestion { index: usize, question: Question },
    ReadyToFinish,
}

/// Result of finishing an interview.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FinalReport {
    pub final_score: ScoreSummary,
    #[serde(flatten)]
    pub insights: Insights,
    pub duration_minutes: i64,
}

impl InterviewSession {
    /// Creates an ongoing session over `questions`, which must not be empty.
    pub fn start(
        user_id: &str,
        domain: &str,
        difficulty: Difficulty,
        questions: Vec<Question>,
        now: DateTime<Utc>,
    ) -> Result<Self, AppError> {
        if questions.is_empty() {
            return Err(AppError::NotFound(format!(
                "No questions found for domain '{domain}' and difficulty '{difficulty}'"
            )));
        }

        Ok(InterviewSession {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            domain: domain.to_string(),
            difficulty,
            questions,
            current_index: 0,
            status: SessionStatus::Ongoing,
            answers: Vec::new(),
            final_score: None,
            insights: None,
            started_at: now,
            completed_at: None,
            duration_minutes: None,
        })
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// The question awaiting an answer, if the session is still ongoing.
    pub fn current_question(&self) -> Option<&Question> {
        if self.status != SessionStatus::Ongoing {
            return None;
        }
        self.questions.get(self.current_index)
    }

    /// The question the next answer must be scored against, or `InvalidState`.
    pub fn ensure_can_answer(&self) -> Result<&Question, AppError> {
        if self.status != SessionStatus::Ongoing {
            return Err(AppError::InvalidState(format!(
                "Interview {} is {}; answers are no longer accepted",
                self.id,
                self.status.as_str()
            )));
        }
        self.questions.get(self.current_index).ok_or_else(|| {
            AppError::InvalidState(format!(
                "All {} questions of interview {} are answered; finish it instead",
                self.questions.len(),
                self.id
            ))
        })
    }

    /// Appends the scored answer for the current question and advances.
    pub fn record_answer(
        &mut self,
        user_answer: &str,
        scores: AnswerScores,
        now: DateTime<Utc>,
    ) -> Result<NextStep, AppError> {
        let question_id = self.ensure_can_answer()?.id;

        self.answers.push(AnswerRecord {
            question_id,
            user_answer: user_answer.to_string(),
            scores,
            answered_at: now,
        });
        self.current_index += 1;

        Ok(match self.questions.get(self.current_index) {
            Some(next) => NextStep::NextQuestion {
                index: self.current_index,
                question: next.clone(),
            },
            None => NextStep::ReadyToFinish,
        })
    }

    /// Completes the session, computing the final summary exactly once.
    ///
    /// Without `allow_early`, every question must be answered first. A second
    /// call fails with `InvalidState` and leaves the stored summary untouched.
    pub fn finish(
        &mut self,
        allow_early: bool,
        now: DateTime<Utc>,
    ) -> Result<FinalReport, AppError> {
        match self.status {
            SessionStatus::Ongoing => {}
            SessionStatus::Completed => {
                return Err(AppError::InvalidState(format!(
                    "Interview {} is already completed",
                    self.id
                )))
            }
            SessionStatus::Abandoned => {
                return Err(AppError::InvalidState(format!(
                    "Interview {} was abandoned and cannot be finished",
                    self.id
                )))
            }
        }

        if !allow_early && self.current_index < self.questions.len() {
            return Err(AppError::InvalidState(format!(
                "Interview {} has {} of {} questions answered",
                self.id,
                self.current_index,
                self.questions.len()
            )));
        }

        let final_score = summarize(&self.answers);
        let insights = derive_insights(&final_score);
        let duration_minutes = ((now - self.started_at).num_seconds() as f64 / 60.0).round() as i64;

        self.final_score = Some(final_score);
        self.insights = Some(insights.clone());
        self.status = SessionStatus::Completed;
        self.completed_at = Some(now);
        self.duration_minutes = Some(duration_minutes);

        Ok(FinalReport {
            final_score,
            insights,
            duration_minutes,
        })
    }

    /// Marks an ongoing session abandoned. No summary is computed.
    pub fn abandon(&mut self, now: DateTime<Utc>) -> Result<(), AppError> {
        if self.status != SessionStatus::Ongoing {
            return Err(AppError::InvalidState(format!(
                "Interview {} is {} and cannot be abandoned",
                self.id,
                self.status.as_str()
            )));
        }
        self.status = SessionStatus::Abandoned;
        self.completed_at = Some(now);
        Ok(())
    }
}
