pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::scoring::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Scoring API
        .route("/api/v1/resumes/score", post(handlers::handle_score))
        .route(
            "/api/v1/resumes/score/batch",
            post(handlers::handle_score_batch),
        )
        .route(
            "/api/v1/resumes/recommendations",
            post(handlers::handle_recommendations),
        )
        .route(
            "/api/v1/resumes/bullets/analyze",
            post(handlers::handle_analyze_bullets),
        )
        .with_state(state)
}
