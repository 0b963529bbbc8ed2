//! Interview operations. Handlers stay thin and call into these; every
//! mutation runs under the session's lock from `SessionStore`. History reads
//! the completed archive and takes no session lock.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog::QuestionBank;
use crate::errors::AppError;
use crate::interview::session::{FinalReport, NextStep};
use crate::interview::store::SessionStore;
use crate::models::interview::{AnswerScores, InterviewSession};
use crate::models::question::{normalize_domain, Difficulty, Question};
use crate::scoring::ScoringEngine;

#[derive(Debug, Deserialize)]
pub struct StartRequest {
    pub user_id: String,
    pub domain: String,
    pub difficulty: String,
}

#[derive(Debug, Serialize)]
pub struct StartResponse {
    pub interview_id: Uuid,
    pub first_question: Question,
    pub total_questions: usize,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub scores: AnswerScores,
    pub question_number: usize,
    pub total_questions: usize,
    pub next: NextStep,
}

/// Selects questions and creates an ongoing interview. Nothing is stored
/// when no questions match.
pub async fn start_interview(
    bank: &dyn QuestionBank,
    store: &SessionStore,
    questions_per_interview: usize,
    req: &StartRequest,
) -> Result<StartResponse, AppError> {
    let user_id = req.user_id.trim();
    if user_id.is_empty() {
        return Err(AppError::Validation("user_id cannot be empty".to_string()));
    }
    let domain = normalize_domain(&req.domain);
    if domain.is_empty() {
        return Err(AppError::Validation("domain cannot be empty".to_string()));
    }
    let difficulty: Difficulty = req.difficulty.parse()?;

    let questions = bank
        .find(&domain, difficulty, questions_per_interview)
        .await?;
    let session = InterviewSession::start(user_id, &domain, difficulty, questions, Utc::now())?;

    let response = StartResponse {
        interview_id: session.id,
        first_question: session.questions[0].clone(),
        total_questions: session.total_questions(),
    };

    info!(
        "Started interview {} for {user_id}: {domain}/{difficulty}, {} questions",
        session.id,
        session.total_questions()
    );
    store.insert(session).await;

    Ok(response)
}

/// Scores an answer to the session's current question and advances it.
///
/// The session lock is held across scoring, so a concurrent submit for the
/// same session waits and is then checked against the advanced index.
pub async fn submit_answer(
    store: &SessionStore,
    engine: &ScoringEngine,
    interview_id: Uuid,
    user_answer: &str,
) -> Result<SubmitResponse, AppError> {
    let user_answer = user_answer.trim();
    if user_answer.is_empty() {
        return Err(AppError::Validation("answer cannot be empty".to_string()));
    }

    let mut session = store.lock(interview_id).await?;
    let model_answer = session.ensure_can_answer()?.model_answer.clone();

    let scores = engine
        .score(user_answer, &model_answer, session.difficulty)
        .await;
    let next = session.record_answer(user_answer, scores.clone(), Utc::now())?;

    info!(
        "Interview {interview_id}: answer {}/{} scored {} via {:?}",
        session.current_index,
        session.total_questions(),
        scores.overall,
        scores.source
    );

    Ok(SubmitResponse {
        scores,
        question_number: session.current_index,
        total_questions: session.total_questions(),
        next,
    })
}

pub async fn finish_interview(
    store: &SessionStore,
    interview_id: Uuid,
    allow_early_finish: bool,
) -> Result<FinalReport, AppError> {
    let mut session = store.lock(interview_id).await?;
    let answered = session.current_index;
    let report = session.finish(allow_early_finish, Utc::now())?;
    store.archive(session.clone()).await;

    if answered < session.total_questions() {
        warn!(
            "Interview {interview_id} finished early with {answered}/{} answers",
            session.total_questions()
        );
    }
    info!(
        "Completed interview {interview_id}: overall {}",
        report.final_score.overall
    );
    Ok(report)
}

pub async fn abandon_interview(store: &SessionStore, interview_id: Uuid) -> Result<(), AppError> {
    let mut session = store.lock(interview_id).await?;
    session.abandon(Utc::now())?;
    store.mark_abandoned(interview_id).await;
    info!("Interview {interview_id} abandoned at question {}", session.current_index);
    Ok(())
}

/// The user's completed interviews, newest first.
pub async fn completed_history(store: &SessionStore, user_id: &str) -> Vec<InterviewSession> {
    let mut sessions = store.completed_for_user(user_id.trim()).await;
    sessions.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
    sessions
}
