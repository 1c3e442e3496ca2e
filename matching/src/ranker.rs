//! Ordering and truncation of scored candidates.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::types::MatchResult;

/// How candidates with equal scores are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Keep the order candidates were supplied in
    #[default]
    InputOrder,
    /// Order ties by subject id, ascending, for reproducible output
    SubjectId,
}

/// Sorts candidates by descending score and keeps the best `limit`.
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    tie_break: TieBreak,
}

impl Ranker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tie_break(tie_break: TieBreak) -> Self {
        Self { tie_break }
    }

    /// Rank candidates.
    ///
    /// The sort is stable, so a lower score never precedes a strictly higher
    /// one and, under [`TieBreak::InputOrder`], equal scores keep their
    /// relative input order. At most `limit` results are returned.
    pub fn rank(&self, mut candidates: Vec<MatchResult>, limit: usize) -> Vec<MatchResult> {
        candidates.sort_by(|a, b| {
            let by_score = b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal);
            match self.tie_break {
                TieBreak::InputOrder => by_score,
                TieBreak::SubjectId => by_score.then_with(|| a.subject_id.cmp(&b.subject_id)),
            }
        });
        candidates.truncate(limit);
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(id: &str, score: f64) -> MatchResult {
        MatchResult {
            subject_id: id.to_string(),
            score,
            reasons: vec![],
        }
    }

    fn ids(results: &[MatchResult]) -> Vec<&str> {
        results.iter().map(|r| r.subject_id.as_str()).collect()
    }

    #[test]
    fn test_descending_order() {
        let ranked = Ranker::new().rank(
            vec![result("a", 0.2), result("b", 0.9), result("c", 0.5)],
            10,
        );
        assert_eq!(ids(&ranked), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ranked = Ranker::new().rank(
            vec![
                result("z", 0.5),
                result("a", 0.7),
                result("m", 0.5),
                result("b", 0.5),
            ],
            10,
        );
        assert_eq!(ids(&ranked), vec!["a", "z", "m", "b"]);
    }

    #[test]
    fn test_ties_by_subject_id() {
        let ranked = Ranker::with_tie_break(TieBreak::SubjectId).rank(
            vec![
                result("z", 0.5),
                result("a", 0.7),
                result("m", 0.5),
                result("b", 0.5),
            ],
            10,
        );
        assert_eq!(ids(&ranked), vec!["a", "b", "m", "z"]);
    }

    #[test]
    fn test_truncates_to_limit() {
        let candidates: Vec<MatchResult> = (0..20u32)
            .map(|i| result(&format!("c{i}"), f64::from(i) / 20.0))
            .collect();

        for limit in [0usize, 1, 5, 20, 50] {
            let ranked = Ranker::new().rank(candidates.clone(), limit);
            assert_eq!(ranked.len(), limit.min(candidates.len()));
            assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(Ranker::new().rank(vec![], 5).is_empty());
    }
}
