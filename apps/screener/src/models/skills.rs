/// Splits comma-delimited skill text into trimmed, non-empty entries, order preserved.
pub fn parse_skills(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn render_skills<S: AsRef<str>>(skills: &[S]) -> String {
    skills
        .iter()
        .map(|s| s.as_ref().trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_drops_empty() {
        assert_eq!(
            parse_skills(" Java, Spring Boot ,,SQL,  "),
            vec!["Java", "Spring Boot", "SQL"]
        );
        assert!(parse_skills("").is_empty());
        assert!(parse_skills(" , ").is_empty());
    }

    #[test]
    fn test_render_then_parse_keeps_order() {
        let skills = parse_skills("rust,  tokio , serde,axum");
        let rendered = render_skills(&skills);
        assert_eq!(rendered, "rust, tokio, serde, axum");
        assert_eq!(parse_skills(&rendered), skills);
    }

    #[test]
    fn test_render_trims_entries() {
        assert_eq!(render_skills(&["  Docker", "K8s "]), "Docker, K8s");
    }
}
