pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::catalog::handlers as catalog;
use crate::interview::handlers as interview;
use crate::reporting::handlers as analytics;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Catalog API
        .route(
            "/api/v1/questions",
            get(catalog::handle_list_questions).post(catalog::handle_create_question),
        )
        .route(
            "/api/v1/questions/:id",
            put(catalog::handle_update_question).delete(catalog::handle_delete_question),
        )
        // Interview API
        .route("/api/v1/interviews", post(interview::handle_start))
        .route("/api/v1/interviews/history", get(interview::handle_history))
        .route("/api/v1/interviews/:id", get(interview::handle_get_interview))
        .route(
            "/api/v1/interviews/:id/answers",
            post(interview::handle_submit_answer),
        )
        .route("/api/v1/interviews/:id/finish", post(interview::handle_finish))
        .route(
            "/api/v1/interviews/:id/abandon",
            post(interview::handle_abandon),
        )
        // Analytics API
        .route("/api/v1/analytics/overview", get(analytics::handle_overview))
        .route(
            "/api/v1/analytics/progression",
            get(analytics::handle_progression),
        )
        .route("/api/v1/analytics/insights", get(analytics::handle_insights))
        .route(
            "/api/v1/analytics/domains",
            get(analytics::handle_domain_performance),
        )
        .route(
            "/api/v1/analytics/difficulties",
            get(analytics::handle_difficulty_performance),
        )
        .route("/api/v1/analytics/recent", get(analytics::handle_recent))
        // Admin API
        .route("/api/v1/admin/stats", get(analytics::handle_platform_stats))
        .with_state(state)
}
