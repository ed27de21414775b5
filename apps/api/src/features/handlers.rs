//! Axum route handlers for the Analysis API.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Path, Request, State},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::errors::AppError;
use crate::features::orchestrator::{run_analysis, AnalysisOutcome, AnalysisRequest};
use crate::features::Feature;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Body for `POST /api/v1/analyze`. The feature stays a string so an unknown
/// name gets a 400 listing the valid ones instead of a bare JSON rejection.
#[derive(Debug, Deserialize)]
pub struct AnalyzeBody {
    pub feature: String,
    pub resume_text: String,
    #[serde(default)]
    pub job_description: Option<String>,
}

/// Body for `POST /api/v1/analyze/:feature`, where the path names the feature.
#[derive(Debug, Deserialize)]
pub struct FeatureInputs {
    pub resume_text: String,
    #[serde(default)]
    pub job_description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FeatureInfo {
    pub name: Feature,
    pub label: &'static str,
    pub requires_job_description: bool,
    pub uses_model: bool,
}

#[derive(Debug, Serialize)]
pub struct FeatureListResponse {
    pub features: Vec<FeatureInfo>,
}

/// `Json` that turns a malformed or incomplete body into a 400 `VALIDATION_ERROR`.
pub struct AppJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| AppError::Validation(rejection.body_text()))?;
        Ok(AppJson(value))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/features
pub async fn handle_list_features() -> Json<FeatureListResponse> {
    let features = Feature::ALL
        .into_iter()
        .map(|f| FeatureInfo {
            name: f,
            label: f.label(),
            requires_job_description: f.requires_job_description(),
            uses_model: f.uses_model(),
        })
        .collect();
    Json(FeatureListResponse { features })
}

/// POST /api/v1/analyze
///
/// Runs one feature and records the outcome in history.
pub async fn handle_analyze(
    State(state): State<AppState>,
    AppJson(body): AppJson<AnalyzeBody>,
) -> Result<Json<AnalysisOutcome>, AppError> {
    let request = AnalysisRequest {
        feature: parse_feature(&body.feature)?,
        resume_text: body.resume_text,
        job_description: body.job_description,
    };
    analyze(&state, request).await
}

/// POST /api/v1/analyze/:feature
pub async fn handle_analyze_feature(
    State(state): State<AppState>,
    Path(feature): Path<String>,
    AppJson(inputs): AppJson<FeatureInputs>,
) -> Result<Json<AnalysisOutcome>, AppError> {
    let request = AnalysisRequest {
        feature: parse_feature(&feature)?,
        resume_text: inputs.resume_text,
        job_description: inputs.job_description,
    };
    analyze(&state, request).await
}

fn parse_feature(name: &str) -> Result<Feature, AppError> {
    name.parse::<Feature>().map_err(|e| {
        let valid: Vec<&str> = Feature::ALL.iter().map(|f| f.as_str()).collect();
        AppError::Validation(format!("{e}. Valid features: {}", valid.join(", ")))
    })
}

async fn analyze(state: &AppState, request: AnalysisRequest) -> Result<Json<AnalysisOutcome>, AppError> {
    let outcome = run_analysis(
        state.generator.as_ref(),
        &request,
        state.config.max_input_chars,
    )
    .await?;

    state.history.record(outcome.clone()).await;
    Ok(Json(outcome))
}
