pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Matching API
        .route(
            "/api/matching/candidates/:job_id",
            get(handlers::handle_matching_candidates),
        )
        .route(
            "/api/matching/jobs/:candidate_id",
            get(handlers::handle_matching_jobs),
        )
        .route(
            "/api/matching/skill-gap/:job_id",
            get(handlers::handle_skill_gap),
        )
        .route("/api/matching/calculate", post(handlers::handle_calculate))
        .with_state(state)
}
