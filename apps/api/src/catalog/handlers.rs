use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::question::{Difficulty, NewQuestion, Question, QuestionUpdate};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct QuestionFilter {
    pub domain: Option<String>,
    pub difficulty: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuestionListResponse {
    pub questions: Vec<Question>,
}

/// GET /api/v1/questions
pub async fn handle_list_questions(
    State(state): State<AppState>,
    Query(filter): Query<QuestionFilter>,
) -> Result<Json<QuestionListResponse>, AppError> {
    let difficulty = filter
        .difficulty
        .as_deref()
        .map(str::parse::<Difficulty>)
        .transpose()?;
    let questions = state
        .question_bank
        .list(filter.domain.as_deref(), difficulty)
        .await?;
    Ok(Json(QuestionListResponse { questions }))
}

/// POST /api/v1/questions
pub async fn handle_create_question(
    State(state): State<AppState>,
    Json(req): Json<NewQuestion>,
) -> Result<(StatusCode, Json<Question>), AppError> {
    let question = req.into_question()?;
    let created = state.question_bank.insert(question).await?;
    tracing::info!(
        "Added {} {} question {}",
        created.domain,
        created.difficulty,
        created.id
    );
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/v1/questions/:id
pub async fn handle_update_question(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<QuestionUpdate>,
) -> Result<Json<Question>, AppError> {
    let updated = state.question_bank.update(id, req).await?;
    tracing::info!("Updated question {} (active: {})", updated.id, updated.is_active);
    Ok(Json(updated))
}

/// DELETE /api/v1/questions/:id
pub async fn handle_delete_question(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let removed = state.question_bank.remove(id).await?;
    tracing::info!("Deleted {} {} question {}", removed.domain, removed.difficulty, removed.id);
    Ok(StatusCode::NO_CONTENT)
}
