use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Status, machine code and the user-facing message. Never exposes raw internals.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Llm(e) => llm_parts(e),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal server error occurred".to_string(),
            ),
        }
    }
}

fn llm_parts(e: &LlmError) -> (StatusCode, &'static str, String) {
    match e {
        LlmError::MissingApiKey => (
            StatusCode::SERVICE_UNAVAILABLE,
            "LLM_NOT_CONFIGURED",
            "The AI service is not configured. Set GEMINI_API_KEY and restart.".to_string(),
        ),
        LlmError::InvalidApiKey { .. } => (
            StatusCode::BAD_GATEWAY,
            "LLM_AUTH_ERROR",
            "The AI service rejected the configured API key.".to_string(),
        ),
        LlmError::RateLimited { .. } => (
            StatusCode::TOO_MANY_REQUESTS,
            "LLM_RATE_LIMITED",
            "The AI service is rate limiting requests. Please try again in a minute.".to_string(),
        ),
        LlmError::Timeout => (
            StatusCode::GATEWAY_TIMEOUT,
            "LLM_TIMEOUT",
            "The AI service took too long to respond. Please try again.".to_string(),
        ),
        LlmError::Http(_) => (
            StatusCode::BAD_GATEWAY,
            "LLM_UNAVAILABLE",
            "The AI service could not be reached. Please try again.".to_string(),
        ),
        LlmError::Blocked(reason) => (
            StatusCode::BAD_GATEWAY,
            "LLM_ERROR",
            format!("The AI service declined to answer this request ({reason})."),
        ),
        LlmError::EmptyContent | LlmError::Parse(_) | LlmError::Api { .. } => (
            StatusCode::BAD_GATEWAY,
            "LLM_ERROR",
            "An AI processing error occurred. Please try again.".to_string(),
        ),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        if status.is_server_error() {
            tracing::error!("{code}: {:?}", self);
        } else if status == StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!("{code}: {}", self);
        }

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
