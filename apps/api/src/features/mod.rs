// Resume analysis features.
// Implements: feature catalogue, prompt assembly, local keyword/layout checks, orchestration.
// All model calls go through llm_client::TextGenerator, never direct HTTP.

pub mod handlers;
pub mod keywords;
pub mod layout;
pub mod orchestrator;
pub mod prompts;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::llm_client::prompts::render_template;

/// The eight analysis features offered by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    ResumeAnalysis,
    AtsCheck,
    JobMatch,
    EnhancementSuggestions,
    LayoutAnalysis,
    CoverLetter,
    LinkedinOptimization,
    InterviewPrep,
}

impl Feature {
    pub const ALL: [Feature; 8] = [
        Feature::ResumeAnalysis,
        Feature::AtsCheck,
        Feature::JobMatch,
        Feature::EnhancementSuggestions,
        Feature::LayoutAnalysis,
        Feature::CoverLetter,
        Feature::LinkedinOptimization,
        Feature::InterviewPrep,
    ];

    /// Wire name, identical to the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Feature::ResumeAnalysis => "resume_analysis",
            Feature::AtsCheck => "ats_check",
            Feature::JobMatch => "job_match",
            Feature::EnhancementSuggestions => "enhancement_suggestions",
            Feature::LayoutAnalysis => "layout_analysis",
            Feature::CoverLetter => "cover_letter",
            Feature::LinkedinOptimization => "linkedin_optimization",
            Feature::InterviewPrep => "interview_prep",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Feature::ResumeAnalysis => "Resume Analysis",
            Feature::AtsCheck => "ATS Compatibility Check",
            Feature::JobMatch => "Job Matching",
            Feature::EnhancementSuggestions => "Resume Enhancement",
            Feature::LayoutAnalysis => "Layout Analysis",
            Feature::CoverLetter => "Cover Letter Generator",
            Feature::LinkedinOptimization => "LinkedIn Optimization",
            Feature::InterviewPrep => "Interview Preparation",
        }
    }

    pub fn requires_job_description(self) -> bool {
        matches!(
            self,
            Feature::ResumeAnalysis
                | Feature::AtsCheck
                | Feature::JobMatch
                | Feature::CoverLetter
                | Feature::InterviewPrep
        )
    }

    /// Layout analysis runs locally; everything else needs the model.
    pub fn uses_model(self) -> bool {
        !matches!(self, Feature::LayoutAnalysis)
    }

    /// Features that also get a local keyword coverage report.
    pub fn includes_keyword_report(self) -> bool {
        matches!(self, Feature::AtsCheck | Feature::JobMatch)
    }

    /// File name offered when the generated text is downloaded.
    pub fn download_file_name(self) -> String {
        format!("{}.txt", self.as_str())
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown feature '{0}'")]
pub struct UnknownFeature(pub String);

impl FromStr for Feature {
    type Err = UnknownFeature;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| UnknownFeature(s.to_string()))
    }
}

/// A fully rendered prompt ready for the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

/// Builds the system and user prompt for a model-backed feature.
///
/// Returns `None` for features that never call the model. Deterministic:
/// identical inputs always yield identical prompts.
pub fn build_prompt(feature: Feature, resume_text: &str, job_description: &str) -> Option<PromptPair> {
    let spec = prompts::template_for(feature)?;
    let user = render_template(
        spec.user_template,
        &[
            ("resume_text", resume_text),
            ("job_description", job_description),
        ],
    );
    Some(PromptPair {
        system: prompts::system_prompt(spec.system_role),
        user,
    })
}
