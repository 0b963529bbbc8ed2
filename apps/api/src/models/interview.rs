use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::question::{Difficulty, Question};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}

/// Which backend produced a set of answer scores.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSource {
    Evaluator,
    Heuristic,
}

/// Per-answer scores. Every numeric field is on the 0–100 scale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnswerScores {
    pub technical: u32,
    pub communication: u32,
    pub confidence: u32,
    pub overall: u32,
    pub sentiment: Sentiment,
    pub feedback: Option<String>,
    pub source: ScoreSource,
}

/// One scored answer. Appended once per question, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnswerRecord {
    pub question_id: Uuid,
    pub user_answer: String,
    pub scores: AnswerScores,
    pub answered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Ongoing,
    Completed,
    Abandoned,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Ongoing => "ongoing",
            SessionStatus::Completed => "completed",
            SessionStatus::Abandoned => "abandoned",
        }
    }
}

/// Skill summary for a completed interview, 0–100.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ScoreSummary {
    pub technical: u32,
    pub communication: u32,
    pub confidence: u32,
    pub problem_solving: u32,
    pub overall: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Insights {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
}

/// A single interview. State transitions live in `interview::session`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewSession {
    pub id: Uuid,
    pub user_id: String,
    pub domain: String,
    pub difficulty: Difficulty,
    pub questions: Vec<Question>,
    pub current_index: usize,
    pub status: SessionStatus,
    pub answers: Vec<AnswerRecord>,
    pub final_score: Option<ScoreSummary>,
    pub insights: Option<Insights>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i64>,
}
