//! Keyword coverage: a deterministic, model-free ATS keyword check.
//!
//! Algorithm:
//! 1. Tokenize the job description (lowercase Unicode letters and digits; `+ # . -` allowed inside tokens
//!    so `c++`, `c#`, `node.js` and `ci-cd` survive), drop stopwords, numbers
//!    and 1-char tokens.
//! 2. Rank by frequency, ties broken by first occurrence; keep the top `MAX_KEYWORDS`.
//! 3. A keyword matches when the resume contains it as a whole token.
//! 4. coverage_score = Σ(matched jd_frequency) / Σ(jd_frequency) × 100

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub const MAX_KEYWORDS: usize = 25;

const STOPWORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "all", "also", "an", "and", "any", "are", "as", "at",
    "be", "been", "being", "best", "both", "but", "by", "can", "company", "could", "day", "do",
    "does", "each", "etc", "ever", "every", "experience", "for", "from", "get", "good", "great",
    "has", "have", "help", "how", "ideal", "if", "in", "including", "into", "is", "it", "its",
    "job", "join", "just", "like", "looking", "make", "may", "more", "most", "must", "need", "new",
    "not", "of", "on", "one", "or", "other", "our", "out", "over", "own", "per", "plus",
    "position", "preferred", "required", "requirements", "responsibilities", "role", "should",
    "so", "some", "strong", "such", "team", "than", "that", "the", "their", "them", "then",
    "there", "these", "they", "this", "those", "through", "to", "up", "us", "use", "using",
    "very", "want", "we", "well", "what", "when", "where", "which", "while", "who", "will", "with",
    "within", "work", "working", "would", "year", "years", "you", "your",
];

/// A JD keyword the resume covers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordMatch {
    pub keyword: String,
    pub jd_frequency: u32,
    pub resume_frequency: u32,
}

/// A JD keyword absent from the resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordGap {
    pub keyword: String,
    pub jd_frequency: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordReport {
    pub coverage_score: u32, // 0 – 100
    pub matched: Vec<KeywordMatch>,
    pub missing: Vec<KeywordGap>,
    pub recommendation: String,
}

fn token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r"[\p{L}\p{N}][\p{L}\p{N}+#.\-]*").expect("token regex is valid"))
}

/// Lowercased tokens in document order, trailing `.`/`-` stripped.
fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    token_regex()
        .find_iter(&lower)
        .map(|m| m.as_str().trim_end_matches(['.', '-']).to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

fn is_keyword(token: &str) -> bool {
    token.chars().count() >= 2
        && !token.chars().all(|c| c.is_numeric() || c == '.')
        && !STOPWORDS.contains(&token)
}

/// Extracts ranked `(keyword, frequency)` pairs from a job description.
pub fn extract_keywords(job_description: &str) -> Vec<(String, u32)> {
    let mut counts: HashMap<String, (u32, usize)> = HashMap::new();

    for (position, token) in tokenize(job_description).into_iter().enumerate() {
        if !is_keyword(&token) {
            continue;
        }
        counts.entry(token).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(String, u32, usize)> = counts
        .into_iter()
        .map(|(kw, (freq, first))| (kw, freq, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.truncate(MAX_KEYWORDS);

    ranked.into_iter().map(|(kw, freq, _)| (kw, freq)).collect()
}

/// Scores how many of the job description's keywords the resume covers.
pub fn compute_keyword_report(resume_text: &str, job_description: &str) -> KeywordReport {
    let keywords = extract_keywords(job_description);

    if keywords.is_empty() {
        return KeywordReport {
            coverage_score: 0,
            matched: vec![],
            missing: vec![],
            recommendation: "No keywords found in the job description; cannot score coverage."
                .to_string(),
        };
    }

    let mut resume_counts: HashMap<String, u32> = HashMap::new();
    for token in tokenize(resume_text) {
        *resume_counts.entry(token).or_insert(0) += 1;
    }

    let mut matched = Vec::new();
    let mut missing = Vec::new();
    let mut total = 0u32;
    let mut covered = 0u32;

    for (keyword, jd_frequency) in keywords {
        total += jd_frequency;
        match resume_counts.get(&keyword) {
            Some(&resume_frequency) => {
                covered += jd_frequency;
                matched.push(KeywordMatch {
                    keyword,
                    jd_frequency,
                    resume_frequency,
                });
            }
            None => missing.push(KeywordGap {
                keyword,
                jd_frequency,
            }),
        }
    }

    let coverage_score = ((covered as f32 / total as f32) * 100.0).round() as u32;
    let recommendation = build_recommendation(coverage_score, &missing);

    KeywordReport {
        coverage_score,
        matched,
        missing,
        recommendation,
    }
}

fn build_recommendation(score: u32, missing: &[KeywordGap]) -> String {
    let top_missing: Vec<&str> = missing.iter().take(3).map(|g| g.keyword.as_str()).collect();

    if score >= 80 {
        "Strong keyword coverage. Your resume reflects most of the job description's terms."
            .to_string()
    } else if score >= 60 {
        format!(
            "Moderate keyword coverage ({score}/100). Consider working in: {}.",
            top_missing.join(", ")
        )
    } else {
        format!(
            "Low keyword coverage ({score}/100). Missing key terms: {}. An ATS may filter this resume out.",
            top_missing.join(", ")
        )
    }
}
