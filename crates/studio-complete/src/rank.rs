//! Candidate filtering and ordering.

use crate::candidate::Candidate;

/// Keep candidates whose display text contains `query` (case-insensitive).
pub fn filter_contains(candidates: Vec<Candidate>, query: &str) -> Vec<Candidate> {
    let query = query.to_lowercase();
    candidates
        .into_iter()
        .filter(|c| c.display_text.to_lowercase().contains(&query))
        .collect()
}

/// Sort prefix matches of `query` first, then alphabetically (case-insensitive, byte order
/// breaking ties), and truncate to `limit`.
pub fn sort_and_truncate(
    mut candidates: Vec<Candidate>,
    query: &str,
    limit: usize,
) -> Vec<Candidate> {
    let query = query.to_lowercase();
    candidates.sort_by_cached_key(|c| {
        let lower = c.display_text.to_lowercase();
        (!lower.starts_with(&query), lower, c.display_text.clone())
    });
    candidates.truncate(limit);
    candidates
}

/// [`filter_contains`] followed by [`sort_and_truncate`].
pub fn rank(candidates: Vec<Candidate>, query: &str, limit: usize) -> Vec<Candidate> {
    sort_and_truncate(filter_contains(candidates, query), query, limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::CandidateKind;
    use studio_core::{Range, TextEdit};

    fn candidate(text: &str) -> Candidate {
        Candidate {
            text: text.to_string(),
            display_text: text.to_string(),
            kind: CandidateKind::Condition,
            description: None,
            edit: TextEdit::new(Range::default(), text),
        }
    }

    fn labels(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.display_text.as_str()).collect()
    }

    #[test]
    fn test_substring_filter() {
        let got = rank(
            vec![candidate("condition: device"), candidate("condition: and")],
            "dev",
            20,
        );
        assert_eq!(labels(&got), vec!["condition: device"]);
    }

    #[test]
    fn test_equal_prefix_matches_are_alphabetical() {
        let got = rank(
            vec![candidate("condition: device"), candidate("condition: and")],
            "cond",
            20,
        );
        assert_eq!(labels(&got), vec!["condition: and", "condition: device"]);
    }

    #[test]
    fn test_prefix_matches_come_first() {
        let got = rank(
            vec![candidate("alias:"), candidate("state:"), candidate("unique_id:")],
            "s",
            20,
        );
        assert_eq!(labels(&got), vec!["state:", "alias:"]);
    }

    #[test]
    fn test_case_insensitive_with_stable_tie_break() {
        let got = rank(vec![candidate("b"), candidate("B"), candidate("a")], "", 20);
        assert_eq!(labels(&got), vec!["a", "B", "b"]);
    }

    #[test]
    fn test_truncate() {
        let many: Vec<_> = (0..45).map(|i| candidate(&format!("key_{i:02}:"))).collect();
        assert_eq!(rank(many, "", 20).len(), 20);
    }
}
