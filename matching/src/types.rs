//! Projections scored by the matcher and the results it produces.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[cfg(feature = "typescript")]
use ts_rs::TS;

use reputation::{TrustBadge, UserId};

/// The parts of a user the matcher reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserSnapshot {
    pub id: UserId,
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    /// Reputation on the 0-100 scale
    pub reputation_score: u8,
    /// Average rating on the 0-5 scale
    pub average_rating: f64,
    pub completed_collaborations: u32,
    pub trust_badges: BTreeSet<TrustBadge>,
}

impl UserSnapshot {
    pub fn new(id: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests = interests.into_iter().map(Into::into).collect();
        self
    }
}

/// The parts of an idea the matcher reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdeaSnapshot {
    pub id: String,
    pub owner_id: UserId,
    pub required_skills: Vec<String>,
    pub tags: Vec<String>,
}

impl IdeaSnapshot {
    pub fn new(id: impl Into<String>, owner_id: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            owner_id: owner_id.into(),
            ..Default::default()
        }
    }

    pub fn with_required_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_skills = skills.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// A scored candidate. Never persisted.
///
/// `score` is on the 0-1 match scale, not the 0-100 reputation scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct MatchResult {
    /// The idea or user being recommended
    pub subject_id: String,
    /// Compatibility (0.0 - 1.0), two decimal places
    pub score: f64,
    /// Human-readable justifications, advisory only
    pub reasons: Vec<String>,
}

/// Every component of a match score, before weighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct MatchBreakdown {
    pub skill: f64,
    pub interest: f64,
    pub reputation: f64,
    pub experience: f64,
    pub trust: f64,
    /// Required skills the user covers, in requirement order
    pub matched_skills: Vec<String>,
    /// Weighted sum, two decimal places
    pub score: f64,
    pub reasons: Vec<String>,
}

impl MatchBreakdown {
    /// Attach a subject to produce a rankable result.
    pub fn into_result(self, subject_id: impl Into<String>) -> MatchResult {
        MatchResult {
            subject_id: subject_id.into(),
            score: self.score,
            reasons: self.reasons,
        }
    }
}
