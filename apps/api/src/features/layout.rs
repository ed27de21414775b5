//! Layout analysis: text-level formatting heuristics that affect ATS parsing.
//!
//! Pure CPU, no model call. Each failed check adds one human-readable issue
//! and a fixed penalty; `formatting_score = clamp(100 − Σ penalties, 0, 100)`.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

const MIN_WORDS: usize = 150;
const MAX_WORDS: usize = 1000;
const MAX_LINE_CHARS: usize = 150;
/// Longer lines are body text, never headings.
const MAX_HEADING_CHARS: usize = 40;

const PENALTY_EMAIL: u32 = 15;
const PENALTY_PHONE: u32 = 10;
const PENALTY_CORE_SECTION: u32 = 15;
const PENALTY_SUMMARY: u32 = 5;
const PENALTY_LENGTH: u32 = 10;
const PENALTY_LONG_LINES: u32 = 10;
const PENALTY_MIXED_BULLETS: u32 = 5;
const PENALTY_TABLES: u32 = 10;

const BULLET_MARKERS: &[char] = &['•', '-', '*', '–', '▪', '●', '◦', '►', '➢'];

/// Heading synonyms per section. The first three are core sections.
const SECTIONS: &[(&str, &[&str])] = &[
    (
        "experience",
        &[
            "experience",
            "work experience",
            "professional experience",
            "employment",
            "employment history",
            "work history",
            "relevant experience",
        ],
    ),
    (
        "education",
        &["education", "academic background", "education and training"],
    ),
    (
        "skills",
        &[
            "skills",
            "technical skills",
            "core competencies",
            "competencies",
            "key skills",
            "technologies",
        ],
    ),
    (
        "summary",
        &[
            "summary",
            "professional summary",
            "profile",
            "professional profile",
            "objective",
            "career objective",
            "about me",
        ],
    ),
    ("projects", &["projects", "personal projects", "key projects"]),
    (
        "certifications",
        &["certifications", "certificates", "licenses and certifications"],
    ),
];

const CORE_SECTIONS: &[&str] = &["experience", "education", "skills"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutReport {
    pub formatting_score: u32, // 0 – 100
    pub layout_issues: Vec<String>,
    pub detected_sections: Vec<String>,
    pub word_count: usize,
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").expect("email regex is valid")
    })
}

fn phone_regex() -> &'static Regex {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE.get_or_init(|| Regex::new(r"\+?\(?\d[\d\s().\-]{7,18}\d").expect("phone regex is valid"))
}

fn has_phone(text: &str) -> bool {
    phone_regex().find_iter(text).any(|m| {
        let digits = m.as_str().chars().filter(|c| c.is_ascii_digit()).count();
        (9..=15).contains(&digits)
    })
}

/// Lowercase, keep letters/digits/spaces, collapse whitespace.
/// `&`, `/` and `,` become " and " so combined headings can be split.
fn normalize_heading(line: &str) -> String {
    let cleaned: String = line
        .replace(['&', '/', ','], " and ")
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .to_lowercase();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn matches_synonym(heading: &str, synonyms: &[&str]) -> bool {
    synonyms.contains(&heading)
        || heading
            .split(" and ")
            .any(|part| synonyms.contains(&part.trim()))
}

fn detect_sections(text: &str) -> BTreeSet<&'static str> {
    let mut found = BTreeSet::new();
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.chars().count() > MAX_HEADING_CHARS {
            continue;
        }
        let heading = normalize_heading(trimmed);
        for (section, synonyms) in SECTIONS {
            if matches_synonym(&heading, synonyms) {
                found.insert(*section);
            }
        }
    }
    found
}

fn bullet_marker(line: &str) -> Option<char> {
    let first = line.trim_start().chars().next()?;
    BULLET_MARKERS.contains(&first).then_some(first)
}

/// Runs every layout check over plain resume text.
pub fn analyze_layout(resume_text: &str) -> LayoutReport {
    let mut issues = Vec::new();
    let mut penalty = 0u32;

    if !email_regex().is_match(resume_text) {
        issues.push("No email address found; recruiters and ATS need a contact email.".to_string());
        penalty += PENALTY_EMAIL;
    }
    if !has_phone(resume_text) {
        issues.push("No phone number found in the contact details.".to_string());
        penalty += PENALTY_PHONE;
    }

    let sections = detect_sections(resume_text);
    for core in CORE_SECTIONS {
        if !sections.contains(core) {
            issues.push(format!(
                "Missing a clearly labelled '{}' section heading.",
                capitalize(core)
            ));
            penalty += PENALTY_CORE_SECTION;
        }
    }
    if !sections.contains("summary") {
        issues.push("No summary or objective section at the top of the resume.".to_string());
        penalty += PENALTY_SUMMARY;
    }

    let word_count = resume_text.split_whitespace().count();
    if word_count < MIN_WORDS {
        issues.push(format!(
            "Resume is very short ({word_count} words); aim for at least {MIN_WORDS}."
        ));
        penalty += PENALTY_LENGTH;
    } else if word_count > MAX_WORDS {
        issues.push(format!(
            "Resume is long ({word_count} words); consider trimming below {MAX_WORDS}."
        ));
        penalty += PENALTY_LENGTH;
    }

    let long_lines = resume_text
        .lines()
        .filter(|l| l.trim().chars().count() > MAX_LINE_CHARS)
        .count();
    if long_lines > 0 {
        issues.push(format!(
            "{long_lines} line(s) exceed {MAX_LINE_CHARS} characters; break dense paragraphs into bullets."
        ));
        penalty += PENALTY_LONG_LINES;
    }

    let markers: BTreeSet<char> = resume_text.lines().filter_map(bullet_marker).collect();
    if markers.len() > 1 {
        let listed: Vec<String> = markers.iter().map(|c| format!("'{c}'")).collect();
        issues.push(format!(
            "Inconsistent bullet styles ({}); use a single marker throughout.",
            listed.join(", ")
        ));
        penalty += PENALTY_MIXED_BULLETS;
    }

    if resume_text.lines().any(|l| l.contains('|') || l.contains('\t')) {
        issues.push(
            "Table or column formatting detected ('|' or tab characters); many ATS parsers misread these."
                .to_string(),
        );
        penalty += PENALTY_TABLES;
    }

    LayoutReport {
        formatting_score: 100u32.saturating_sub(penalty),
        layout_issues: issues,
        detected_sections: sections.into_iter().map(str::to_string).collect(),
        word_count,
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn well_formed_resume() -> String {
        let bullets =
            "- Delivered reliable backend services for payments and search teams.\n".repeat(20);
        format!(
            "Jane Doe\njane.doe@example.com\n+1 (555) 123-4567\n\n\
             Professional Summary\nBackend engineer with eight years of experience.\n\n\
             Work Experience\n{bullets}\n\
             Education\n- BSc Computer Science\n\n\
             Technical Skills:\n- Rust, Tokio, PostgreSQL\n"
        )
    }

    #[test]
    fn test_well_formed_resume_scores_100() {
        let report = analyze_layout(&well_formed_resume());
        assert_eq!(report.formatting_score, 100, "issues: {:?}", report.layout_issues);
        assert!(report.layout_issues.is_empty());
        assert_eq!(
            report.detected_sections,
            vec!["education", "experience", "skills", "summary"]
        );
    }

    #[test]
    fn test_empty_resume_flags_everything_and_clamps() {
        let report = analyze_layout("");
        assert_eq!(report.word_count, 0);
        // 15 + 10 + 3×15 + 5 + 10 = 85
        assert_eq!(report.formatting_score, 15);
        assert_eq!(report.layout_issues.len(), 7);
    }

    #[test]
    fn test_missing_contact_details() {
        let text = well_formed_resume()
            .replace("jane.doe@example.com", "")
            .replace("+1 (555) 123-4567", "");
        let report = analyze_layout(&text);
        assert_eq!(report.formatting_score, 100 - PENALTY_EMAIL - PENALTY_PHONE);
        assert!(report.layout_issues[0].contains("email"));
        assert!(report.layout_issues[1].contains("phone"));
    }

    #[test]
    fn test_year_ranges_are_not_phone_numbers() {
        assert!(!has_phone("2019 - 2021"));
        assert!(has_phone("Call 555.123.4567"));
        assert!(has_phone("+44 20 7946 0958"));
    }

    #[test]
    fn test_mixed_bullets_flagged() {
        let text = format!("{}\n• Shipped things\n", well_formed_resume());
        let report = analyze_layout(&text);
        assert_eq!(report.formatting_score, 100 - PENALTY_MIXED_BULLETS);
        assert!(report.layout_issues[0].contains("'-'"));
        assert!(report.layout_issues[0].contains("'•'"));
    }

    #[test]
    fn test_table_characters_flagged() {
        let text = format!("{}\nRust\tGo\tPython\n", well_formed_resume());
        let report = analyze_layout(&text);
        assert_eq!(report.formatting_score, 100 - PENALTY_TABLES);
    }

    #[test]
    fn test_long_lines_flagged() {
        let text = format!("{}\n{}\n", well_formed_resume(), "word ".repeat(40));
        let report = analyze_layout(&text);
        assert!(report
            .layout_issues
            .iter()
            .any(|i| i.starts_with("1 line(s) exceed")));
    }

    #[test]
    fn test_heading_detection_ignores_case_and_punctuation() {
        let sections = detect_sections("EDUCATION:\nSkills & Competencies\n  work history  \n");
        assert!(sections.contains("education"));
        assert!(sections.contains("experience"));
        assert!(sections.contains("skills"));
    }

    #[test]
    fn test_combined_headings_detect_each_part() {
        let sections = detect_sections("Education / Certifications\nProjects and Technologies\n");
        assert_eq!(
            sections.into_iter().collect::<Vec<_>>(),
            vec!["certifications", "education", "projects", "skills"]
        );
    }

    #[test]
    fn test_combined_heading_with_unknown_part_still_counts() {
        let sections = detect_sections("Skills & Interests\n");
        assert!(sections.contains("skills"));
        assert!(!detect_sections("Rust and Go\n").contains("skills"));
    }

    #[test]
    fn test_heading_inside_sentence_not_detected() {
        let sections = detect_sections("I have experience with Rust and a strong education in maths.");
        assert!(sections.is_empty());
    }
}
