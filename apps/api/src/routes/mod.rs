pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::extraction::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Extraction API
        .route("/api/ai-agent", post(handlers::handle_ai_agent))
        .route(
            "/api/v1/resume/extract",
            post(handlers::handle_extract_normalized),
        )
        .with_state(state)
}
