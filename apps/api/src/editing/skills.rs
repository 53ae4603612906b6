//! Skills list <-> comma-delimited text, and suggestion merging.

/// Parses the form's skills text: split on commas, trim, drop empty segments.
pub fn parse_skills_text(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Inverse of [`parse_skills_text`] for skills that contain no comma.
pub fn join_skills_text(skills: &[String]) -> String {
    skills.join(", ")
}

/// Appends each suggested skill not already present, keeping existing order.
///
/// Matching is exact and case-sensitive: "rust" and "Rust" are distinct.
pub fn merge_skills(existing: &[String], suggested: &[String]) -> Vec<String> {
    let mut merged = existing.to_vec();
    for skill in suggested {
        if !merged.contains(skill) {
            merged.push(skill.clone());
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_trims_and_drops_empty() {
        assert_eq!(
            parse_skills_text(" Rust ,, SQL,  ,Git "),
            owned(&["Rust", "SQL", "Git"])
        );
        assert!(parse_skills_text("").is_empty());
        assert!(parse_skills_text(" , ,").is_empty());
    }

    #[test]
    fn test_join_then_parse_round_trips() {
        let skills = owned(&["JavaScript (ES6+)", "Node.js", "Git/GitHub", "Tailwind CSS"]);
        assert_eq!(parse_skills_text(&join_skills_text(&skills)), skills);
        assert_eq!(parse_skills_text(&join_skills_text(&[])), Vec::<String>::new());
    }

    #[test]
    fn test_merge_appends_only_new_skills() {
        let existing = owned(&["Rust", "SQL"]);
        let suggested = owned(&["Go", "SQL", "Docker"]);
        assert_eq!(
            merge_skills(&existing, &suggested),
            owned(&["Rust", "SQL", "Go", "Docker"])
        );
    }

    #[test]
    fn test_merge_is_idempotent() {
        let existing = owned(&["Rust"]);
        let suggested = owned(&["Go", "Go", "Kubernetes"]);
        let once = merge_skills(&existing, &suggested);
        let twice = merge_skills(&once, &suggested);
        assert_eq!(once, twice);
        assert_eq!(once, owned(&["Rust", "Go", "Kubernetes"]));
    }

    #[test]
    fn test_merge_is_case_sensitive() {
        let merged = merge_skills(&owned(&["Rust"]), &owned(&["rust"]));
        assert_eq!(merged, owned(&["Rust", "rust"]));
    }
}
