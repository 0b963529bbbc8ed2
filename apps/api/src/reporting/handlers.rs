//! Axum route handlers for the Analytics API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::interview::handlers::UserIdQuery;
use crate::models::interview::InterviewSession;
use crate::reporting::analytics::{
    self, DifficultyPerformance, DomainPerformance, InsightReport, Overview, PlatformStats,
    ProgressionPoint, RecentInterview,
};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProgressionResponse {
    pub progression: Vec<ProgressionPoint>,
}

#[derive(Debug, Serialize)]
pub struct DomainPerformanceResponse {
    pub domain_performance: Vec<DomainPerformance>,
}

#[derive(Debug, Serialize)]
pub struct DifficultyPerformanceResponse {
    pub difficulty_performance: Vec<DifficultyPerformance>,
}

#[derive(Debug, Serialize)]
pub struct RecentResponse {
    pub recent_interviews: Vec<RecentInterview>,
}

/// The user's archived completed interviews. Live sessions are not read.
async fn user_sessions(
    state: &AppState,
    user_id: &str,
) -> Result<Vec<InterviewSession>, AppError> {
    if user_id.trim().is_empty() {
        return Err(AppError::Validation("user_id cannot be empty".to_string()));
    }
    Ok(state.sessions.completed_for_user(user_id.trim()).await)
}

/// GET /api/v1/analytics/overview
pub async fn handle_overview(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Overview>, AppError> {
    let sessions = user_sessions(&state, &params.user_id).await?;
    Ok(Json(analytics::overview(&sessions)))
}

/// GET /api/v1/analytics/progression
pub async fn handle_progression(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ProgressionResponse>, AppError> {
    let sessions = user_sessions(&state, &params.user_id).await?;
    Ok(Json(ProgressionResponse {
        progression: analytics::progression(&sessions),
    }))
}

/// GET /api/v1/analytics/insights
pub async fn handle_insights(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<InsightReport>, AppError> {
    let sessions = user_sessions(&state, &params.user_id).await?;
    Ok(Json(analytics::insights(&sessions)))
}

/// GET /api/v1/analytics/domains
pub async fn handle_domain_performance(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<DomainPerformanceResponse>, AppError> {
    let sessions = user_sessions(&state, &params.user_id).await?;
    Ok(Json(DomainPerformanceResponse {
        domain_performance: analytics::domain_performance(&sessions),
    }))
}

/// GET /api/v1/analytics/difficulties
pub async fn handle_difficulty_performance(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<DifficultyPerformanceResponse>, AppError> {
    let sessions = user_sessions(&state, &params.user_id).await?;
    Ok(Json(DifficultyPerformanceResponse {
        difficulty_performance: analytics::difficulty_performance(&sessions),
    }))
}

/// GET /api/v1/analytics/recent
pub async fn handle_recent(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<RecentResponse>, AppError> {
    let sessions = user_sessions(&state, &params.user_id).await?;
    Ok(Json(RecentResponse {
        recent_interviews: analytics::recent(&sessions),
    }))
}

/// GET /api/v1/admin/stats
pub async fn handle_platform_stats(
    State(state): State<AppState>,
) -> Result<Json<PlatformStats>, AppError> {
    let sessions = state.sessions.all_completed().await;
    let active_questions = state
        .question_bank
        .list(None, None)
        .await?
        .iter()
        .filter(|q| q.is_active)
        .count();
    Ok(Json(analytics::platform_stats(&sessions, active_questions)))
}
