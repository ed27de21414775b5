// All LLM prompt constants for the feature pipeline.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::features::Feature;
use crate::llm_client::prompts::{GROUNDING_INSTRUCTION, MARKDOWN_OUTPUT_INSTRUCTION};

/// The per-feature pieces a prompt is assembled from.
#[derive(Debug, Clone, Copy)]
pub struct FeatureTemplate {
    pub system_role: &'static str,
    /// Placeholders: `{resume_text}`, `{job_description}`.
    pub user_template: &'static str,
}

/// Combines a role statement with the shared grounding and output rules.
pub fn system_prompt(role: &str) -> String {
    format!("{role} {GROUNDING_INSTRUCTION} {MARKDOWN_OUTPUT_INSTRUCTION}")
}

pub fn template_for(feature: Feature) -> Option<FeatureTemplate> {
    let template = match feature {
        Feature::ResumeAnalysis => FeatureTemplate {
            system_role: RESUME_ANALYSIS_SYSTEM,
            user_template: RESUME_ANALYSIS_TEMPLATE,
        },
        Feature::AtsCheck => FeatureTemplate {
            system_role: ATS_CHECK_SYSTEM,
            user_template: ATS_CHECK_TEMPLATE,
        },
        Feature::JobMatch => FeatureTemplate {
            system_role: JOB_MATCH_SYSTEM,
            user_template: JOB_MATCH_TEMPLATE,
        },
        Feature::EnhancementSuggestions => FeatureTemplate {
            system_role: ENHANCEMENT_SYSTEM,
            user_template: ENHANCEMENT_TEMPLATE,
        },
        Feature::CoverLetter => FeatureTemplate {
            system_role: COVER_LETTER_SYSTEM,
            user_template: COVER_LETTER_TEMPLATE,
        },
        Feature::LinkedinOptimization => FeatureTemplate {
            system_role: LINKEDIN_SYSTEM,
            user_template: LINKEDIN_TEMPLATE,
        },
        Feature::InterviewPrep => FeatureTemplate {
            system_role: INTERVIEW_PREP_SYSTEM,
            user_template: INTERVIEW_PREP_TEMPLATE,
        },
        Feature::LayoutAnalysis => return None,
    };
    Some(template)
}

const RESUME_ANALYSIS_SYSTEM: &str =
    "You are an experienced technical recruiter reviewing a candidate's resume against a specific job.";

const RESUME_ANALYSIS_TEMPLATE: &str = r#"Analyze how well this resume fits the job description.

Cover, in this order:
1. Skills match: which required skills are evidenced, which are missing.
2. Experience match: relevance and seniority of past roles.
3. Education match: degrees or certifications the job asks for.
4. Improvement areas: the three most valuable changes to the resume.
5. Overall match: a percentage from 0 to 100 with a one-sentence justification.

JOB DESCRIPTION:
{job_description}

RESUME:
{resume_text}"#;

const ATS_CHECK_SYSTEM: &str =
    "You are an Applicant Tracking System (ATS) specialist who knows how resume parsers read documents.";

const ATS_CHECK_TEMPLATE: &str = r#"Assess whether this resume would pass an ATS screen for the job below.

Report:
- ATS score: 0 to 100.
- Keywords from the job description that are present, and those that are missing.
- Section headings an ATS may fail to recognise.
- Formatting that commonly breaks parsers (tables, columns, graphics, headers/footers).
- A short list of concrete fixes, most important first.

JOB DESCRIPTION:
{job_description}

RESUME:
{resume_text}"#;

const JOB_MATCH_SYSTEM: &str =
    "You are a career coach who tells candidates honestly whether a role is a good fit.";

const JOB_MATCH_TEMPLATE: &str = r#"Decide how well the candidate matches this role.

Give:
- A match verdict: Strong, Moderate or Weak, with a percentage.
- The candidate's strongest selling points for this role.
- Gaps that would concern a hiring manager, and how serious each one is.
- Whether to apply now, or what to close first.

JOB DESCRIPTION:
{job_description}

RESUME:
{resume_text}"#;

const ENHANCEMENT_SYSTEM: &str =
    "You are a professional resume writer improving a resume's clarity and impact.";

const ENHANCEMENT_TEMPLATE: &str = r#"Suggest improvements for this resume.

For each section you change, give:
- The original line.
- An improved version with a strong action verb and, where the resume supports it, a measurable result.
- One sentence on why the change helps.

Finish with general advice on structure, length and wording.

RESUME:
{resume_text}"#;

const COVER_LETTER_SYSTEM: &str =
    "You are a professional writer drafting tailored cover letters for job applications.";

const COVER_LETTER_TEMPLATE: &str = r#"Write a cover letter for this candidate applying to the job below.

Requirements:
- Three to four paragraphs, under 400 words.
- Open with the role and a specific reason for interest.
- Connect two or three concrete achievements from the resume to the job's requirements.
- Close with a call to action.
- Use placeholders such as [Hiring Manager] and [Company] where the details are unknown.

JOB DESCRIPTION:
{job_description}

RESUME:
{resume_text}"#;

const LINKEDIN_SYSTEM: &str =
    "You are a LinkedIn profile strategist who helps professionals get found by recruiters.";

const LINKEDIN_TEMPLATE: &str = r#"Using this resume, produce LinkedIn profile recommendations.

Include:
- Three headline options, each under 220 characters.
- An About section of 150 to 250 words written in the first person.
- Rewritten experience highlights for the two most recent roles.
- Ten skills to list, ordered by importance.
- Three tips for increasing profile visibility.

RESUME:
{resume_text}"#;

const INTERVIEW_PREP_SYSTEM: &str =
    "You are an interview coach preparing a candidate for a specific role.";

const INTERVIEW_PREP_TEMPLATE: &str = r#"Prepare this candidate for an interview for the job below.

Provide:
- Eight likely interview questions, mixing technical and behavioural.
- For each question, talking points drawn from the resume.
- Two questions the candidate should ask the interviewer.
- Weak spots in the resume the interviewer may probe, with a suggested honest answer.

JOB DESCRIPTION:
{job_description}

RESUME:
{resume_text}"#;
