pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::handlers as features;
use crate::history::handlers as history;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/features", get(features::handle_list_features))
        .route("/api/v1/analyze", post(features::handle_analyze))
        .route(
            "/api/v1/analyze/:feature",
            post(features::handle_analyze_feature),
        )
        // History API
        .route(
            "/api/v1/history",
            get(history::handle_list_history).delete(history::handle_clear_history),
        )
        .route("/api/v1/history/:id", get(history::handle_get_history))
        .route(
            "/api/v1/history/:id/download",
            get(history::handle_download_history),
        )
        .with_state(state)
}
