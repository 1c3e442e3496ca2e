//! Lenient token matching.
//!
//! Two tokens match when either contains the other, ignoring case. This is a
//! deliberately high-recall rule: "react" matches "React Native" and "java"
//! matches "JavaScript". Blank tokens never match.
//!
//! Targets (required skills, tags) are treated as a set: entries that differ
//! only in case or surrounding whitespace count once, first spelling wins.

use std::collections::HashSet;

/// Case-insensitive symmetric substring containment.
pub fn tokens_match(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();

    if a.is_empty() || b.is_empty() {
        return false;
    }

    a.contains(&b) || b.contains(&a)
}

/// Targets with case-insensitive duplicates removed, in first-seen order.
pub fn distinct_targets(targets: &[String]) -> Vec<&str> {
    let mut seen = HashSet::new();
    targets
        .iter()
        .map(String::as_str)
        .filter(|target| seen.insert(target.trim().to_lowercase()))
        .collect()
}

/// Distinct targets covered by at least one candidate token, in target order.
pub fn matched_targets<'a>(targets: &'a [String], candidates: &[String]) -> Vec<&'a str> {
    distinct_targets(targets)
        .into_iter()
        .filter(|target| candidates.iter().any(|c| tokens_match(c, target)))
        .collect()
}

/// Fraction of distinct targets covered, or `empty_value` when there are none.
pub fn coverage(targets: &[String], candidates: &[String], empty_value: f64) -> f64 {
    let total = distinct_targets(targets).len();
    if total == 0 {
        return empty_value;
    }

    matched_targets(targets, candidates).len() as f64 / total as f64
}
