// Shared prompt fragments and the template renderer.
// Each feature's own wording lives in features/prompts.rs.

/// Appended to every feature system prompt.
pub const GROUNDING_INSTRUCTION: &str = "\
    Base every statement on the resume and job description provided. \
    Do NOT invent employers, dates, degrees, certifications or metrics. \
    If something is missing from the resume, say so plainly instead of guessing.";

/// Output format shared by all text features.
pub const MARKDOWN_OUTPUT_INSTRUCTION: &str = "\
    Format the answer as Markdown with short headings and bullet points. \
    Do NOT wrap the whole answer in a code fence.";

/// Substitutes `{name}` placeholders in a single left-to-right pass.
///
/// Only names present in `vars` are replaced; any other brace text is copied
/// as-is. Substituted values are never rescanned, so user text that happens
/// to contain `{job_description}` is embedded literally.
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let extra: usize = vars.iter().map(|(_, v)| v.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let substituted = after.find('}').and_then(|close| {
            let name = &after[..close];
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });

        match substituted {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_replaces_known_placeholders() {
        let out = render_template("A={a}, B={b}", &[("a", "1"), ("b", "2")]);
        assert_eq!(out, "A=1, B=2");
    }

    #[test]
    fn test_render_leaves_unknown_braces_alone() {
        let template = r#"Return {"score": 0} for {name} and {missing}"#;
        let out = render_template(template, &[("name", "Ada")]);
        assert_eq!(out, r#"Return {"score": 0} for Ada and {missing}"#);
    }

    #[test]
    fn test_render_does_not_rescan_values() {
        let out = render_template(
            "R: {resume_text}\nJ: {job_description}",
            &[
                ("resume_text", "I wrote {job_description} here"),
                ("job_description", "Rust role"),
            ],
        );
        assert_eq!(out, "R: I wrote {job_description} here\nJ: Rust role");
    }

    #[test]
    fn test_render_repeated_placeholder() {
        let out = render_template("{x}-{x}", &[("x", "y")]);
        assert_eq!(out, "y-y");
    }

    #[test]
    fn test_render_unclosed_brace_is_copied() {
        let out = render_template("tail {x", &[("x", "y")]);
        assert_eq!(out, "tail {x");
    }

    #[test]
    fn test_render_handles_multibyte_text() {
        let out = render_template("→ {v} ←", &[("v", "José Müller 🎯")]);
        assert_eq!(out, "→ José Müller 🎯 ←");
    }
}
