//! Axum route handlers for the History API.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::features::orchestrator::AnalysisOutcome;
use crate::history::HistorySummary;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HistoryListResponse {
    pub entries: Vec<HistorySummary>,
}

#[derive(Debug, Serialize)]
pub struct HistoryClearResponse {
    pub cleared: usize,
}

/// GET /api/v1/history
pub async fn handle_list_history(State(state): State<AppState>) -> Json<HistoryListResponse> {
    Json(HistoryListResponse {
        entries: state.history.list().await,
    })
}

/// GET /api/v1/history/:id
pub async fn handle_get_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AnalysisOutcome>, AppError> {
    state
        .history
        .get(id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Analysis {id} not found")))
}

/// GET /api/v1/history/:id/download
///
/// Returns the generated text as a plain-text attachment, e.g. `cover_letter.txt`.
pub async fn handle_download_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let outcome = state
        .history
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Analysis {id} not found")))?;

    let text = outcome.text.ok_or_else(|| {
        AppError::NotFound(format!("Analysis {id} has no generated text to download"))
    })?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        outcome.feature.download_file_name()
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        text,
    ))
}

/// DELETE /api/v1/history
pub async fn handle_clear_history(State(state): State<AppState>) -> Json<HistoryClearResponse> {
    let cleared = state.history.clear().await;
    tracing::info!("Cleared {cleared} history entries");
    Json(HistoryClearResponse { cleared })
}
