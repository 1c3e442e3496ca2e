//! Weighted compatibility scoring between a user and an idea.
//!
//! | Component  | Weight | Value                                              |
//! |------------|--------|----------------------------------------------------|
//! | skill      | 0.40   | share of required skills covered (1.0 if none)     |
//! | interest   | 0.20   | share of idea tags covered by interests (0.5 if none) |
//! | reputation | 0.20   | mean of reputation/100 and average rating/5        |
//! | experience | 0.10   | completed collaborations / 10, saturating          |
//! | trust      | 0.10   | 0.2 per badge, saturating                          |

use tracing::debug;

use reputation::{round_to, MAX_RATING_VALUE};

use crate::config::MatchingConfig;
use crate::similarity::{coverage, matched_targets};
use crate::types::{IdeaSnapshot, MatchBreakdown, MatchResult, UserSnapshot};

/// Computes match scores under a [`MatchingConfig`].
pub struct MatchScorer {
    config: MatchingConfig,
}

impl MatchScorer {
    pub fn new() -> Self {
        Self::with_config(MatchingConfig::default())
    }

    pub fn with_config(config: MatchingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Score every component and combine them.
    pub fn breakdown(&self, user: &UserSnapshot, idea: &IdeaSnapshot) -> MatchBreakdown {
        let c = &self.config;

        let matched_skills: Vec<String> = matched_targets(&idea.required_skills, &user.skills)
            .into_iter()
            .map(str::to_string)
            .collect();
        let skill = coverage(&idea.required_skills, &user.skills, 1.0);
        let interest = coverage(&idea.tags, &user.interests, c.neutral_interest);

        let reputation = unit(
            0.5 * (f64::from(user.reputation_score) / 100.0)
                + 0.5 * (user.average_rating / f64::from(MAX_RATING_VALUE)),
        );
        let experience = unit(
            f64::from(user.completed_collaborations) / f64::from(c.experience_saturation.max(1)),
        );
        let trust = unit(c.trust_per_badge * user.trust_badges.len() as f64);

        let w = &c.weights;
        let weighted = w.skill * skill
            + w.interest * interest
            + w.reputation * reputation
            + w.experience * experience
            + w.trust * trust;
        let score = unit(round_to(weighted, 2));

        let reasons = self.reasons(user, &matched_skills, interest);

        debug!(
            user_id = %user.id,
            idea_id = %idea.id,
            skill,
            interest,
            reputation,
            experience,
            trust,
            score,
            "Scored match"
        );

        MatchBreakdown {
            skill,
            interest,
            reputation,
            experience,
            trust,
            matched_skills,
            score,
            reasons,
        }
    }

    /// Score a pair and label the result with the subject being recommended.
    pub fn score(
        &self,
        user: &UserSnapshot,
        idea: &IdeaSnapshot,
        subject_id: impl Into<String>,
    ) -> MatchResult {
        self.breakdown(user, idea).into_result(subject_id)
    }

    fn reasons(&self, user: &UserSnapshot, matched_skills: &[String], interest: f64) -> Vec<String> {
        let t = &self.config.reasons;
        let mut reasons = Vec::new();

        if !matched_skills.is_empty() && t.max_named_skills > 0 {
            let named: Vec<&str> = matched_skills
                .iter()
                .take(t.max_named_skills)
                .map(String::as_str)
                .collect();
            reasons.push(format!("Skills match: {}", named.join(", ")));
        }

        if interest > t.interest_above {
            reasons.push("Shares interests with this idea".to_string());
        }

        if user.average_rating >= t.high_rating_min {
            reasons.push(format!("Highly rated ({:.1}/5)", user.average_rating));
        }

        if user.completed_collaborations >= t.experienced_min {
            reasons.push(format!(
                "Experienced collaborator ({} completed)",
                user.completed_collaborations
            ));
        }

        reasons
    }
}

impl Default for MatchScorer {
    fn default() -> Self {
        Self::new()
    }
}

fn unit(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}
