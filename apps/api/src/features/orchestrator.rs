//! Request orchestration: validate, build the prompt, call the model, shape the outcome.
//!
//! The generated text is passed through exactly as the model returned it.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::features::keywords::{compute_keyword_report, KeywordReport};
use crate::features::layout::{analyze_layout, LayoutReport};
use crate::features::{build_prompt, Feature};
use crate::llm_client::{TextGenerator, Usage};

#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub feature: Feature,
    pub resume_text: String,
    pub job_description: Option<String>,
}

/// Result of one feature run. Which optional fields are set depends on the feature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    pub id: Uuid,
    pub feature: Feature,
    pub label: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword_report: Option<KeywordReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_report: Option<LayoutReport>,
    pub latency_ms: u64,
}

impl AnalysisOutcome {
    fn new(feature: Feature) -> Self {
        Self {
            id: Uuid::new_v4(),
            feature,
            label: feature.label().to_string(),
            created_at: Utc::now(),
            text: None,
            model: None,
            usage: None,
            keyword_report: None,
            layout_report: None,
            latency_ms: 0,
        }
    }
}

/// Rejects requests the pipeline cannot serve, with a message fit for display.
pub fn validate_request(request: &AnalysisRequest, max_input_chars: usize) -> Result<(), AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "Please provide resume text to analyze.".to_string(),
        ));
    }

    let job_description = request.job_description.as_deref().unwrap_or("");
    if request.feature.requires_job_description() && job_description.trim().is_empty() {
        return Err(AppError::Validation(format!(
            "Please enter a job description for {}.",
            request.feature.label()
        )));
    }

    for (field, value) in [
        ("resume_text", request.resume_text.as_str()),
        ("job_description", job_description),
    ] {
        let chars = value.chars().count();
        if chars > max_input_chars {
            return Err(AppError::Validation(format!(
                "{field} is {chars} characters; the limit is {max_input_chars}."
            )));
        }
    }

    Ok(())
}

/// Runs one feature end-to-end. Makes at most one `generate` call.
pub async fn run_analysis(
    generator: &dyn TextGenerator,
    request: &AnalysisRequest,
    max_input_chars: usize,
) -> Result<AnalysisOutcome, AppError> {
    validate_request(request, max_input_chars)?;

    let started = Instant::now();
    let feature = request.feature;
    let job_description = request.job_description.as_deref().unwrap_or("");
    let mut outcome = AnalysisOutcome::new(feature);

    info!(
        "Running {feature}: resume_chars={}, jd_chars={}",
        request.resume_text.chars().count(),
        job_description.chars().count()
    );

    if feature == Feature::LayoutAnalysis {
        // CPU-bound heuristics stay off the async workers
        let resume_text = request.resume_text.clone();
        let report = tokio::task::spawn_blocking(move || analyze_layout(&resume_text))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("layout analysis task failed: {e}")))?;
        outcome.layout_report = Some(report);
    } else if let Some(prompt) = build_prompt(feature, &request.resume_text, job_description) {
        let generation = generator.generate(&prompt.user, &prompt.system).await?;

        info!(
            "{feature} generated {} chars (input_tokens={}, output_tokens={})",
            generation.text.len(),
            generation.usage.input_tokens,
            generation.usage.output_tokens
        );

        outcome.text = Some(generation.text);
        outcome.model = Some(generation.model);
        outcome.usage = Some(generation.usage);

        if feature.includes_keyword_report() {
            outcome.keyword_report = Some(compute_keyword_report(
                &request.resume_text,
                job_description,
            ));
        }
    }

    outcome.latency_ms = started.elapsed().as_millis() as u64;
    info!("{feature} completed in {}ms", outcome.latency_ms);
    Ok(outcome)
}
