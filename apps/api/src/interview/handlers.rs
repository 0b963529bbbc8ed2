//! Axum route handlers for the Interview API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::service::{
    abandon_interview, completed_history, finish_interview, start_interview, submit_answer,
    StartRequest, StartResponse, SubmitResponse,
};
use crate::interview::session::FinalReport;
use crate::models::interview::{InterviewSession, ScoreSummary, SessionStatus};
use crate::models::question::{Difficulty, Question};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SubmitAnswerRequest {
    pub user_answer: String,
}

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct InterviewDetailResponse {
    pub interview: InterviewSession,
    pub current_question: Option<Question>,
}

/// History entry without questions or answer bodies.
#[derive(Debug, Serialize)]
pub struct InterviewListItem {
    pub interview_id: Uuid,
    pub domain: String,
    pub difficulty: Difficulty,
    pub status: SessionStatus,
    pub total_questions: usize,
    pub answered: usize,
    pub final_score: Option<ScoreSummary>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i64>,
}

impl From<&InterviewSession> for InterviewListItem {
    fn from(s: &InterviewSession) -> Self {
        Self {
            interview_id: s.id,
            domain: s.domain.clone(),
            difficulty: s.difficulty,
            status: s.status,
            total_questions: s.total_questions(),
            answered: s.answers.len(),
            final_score: s.final_score,
            started_at: s.started_at,
            completed_at: s.completed_at,
            duration_minutes: s.duration_minutes,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub interviews: Vec<InterviewListItem>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/interviews
pub async fn handle_start(
    State(state): State<AppState>,
    Json(req): Json<StartRequest>,
) -> Result<(StatusCode, Json<StartResponse>), AppError> {
    let response = start_interview(
        state.question_bank.as_ref(),
        &state.sessions,
        state.config.questions_per_interview,
        &req,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/v1/interviews/:id
pub async fn handle_get_interview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InterviewDetailResponse>, AppError> {
    let interview = state.sessions.get(id).await?;
    let current_question = interview.current_question().cloned();
    Ok(Json(InterviewDetailResponse {
        interview,
        current_question,
    }))
}

/// POST /api/v1/interviews/:id/answers
pub async fn handle_submit_answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SubmitAnswerRequest>,
) -> Result<Json<SubmitResponse>, AppError> {
    let response = submit_answer(&state.sessions, &state.scoring, id, &req.user_answer).await?;
    Ok(Json(response))
}

/// POST /api/v1/interviews/:id/finish
pub async fn handle_finish(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FinalReport>, AppError> {
    let report = finish_interview(&state.sessions, id, state.config.allow_early_finish).await?;
    Ok(Json(report))
}

/// POST /api/v1/interviews/:id/abandon
pub async fn handle_abandon(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    abandon_interview(&state.sessions, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/interviews/history
pub async fn handle_history(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<HistoryResponse>, AppError> {
    let interviews = completed_history(&state.sessions, &params.user_id)
        .await
        .iter()
        .map(InterviewListItem::from)
        .collect();
    Ok(Json(HistoryResponse { interviews }))
}
