//! Trust badge derivation.
//!
//! Badges are a pure function of current user state. Every trigger recomputes
//! the full set from scratch; nothing is ever patched incrementally, so a
//! badge whose predicate stopped holding disappears on the next recompute.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

use crate::config::BadgeConfig;
use crate::types::TrustBadge;

/// The user state badge predicates read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BadgeSignals {
    pub email_verified: bool,
    /// Derived from the presence of a resume reference
    pub resume_uploaded: bool,
    pub completed_collaborations: u32,
    pub average_rating: f64,
    pub total_ratings: u32,
}

/// Evaluates each badge predicate independently.
pub struct TrustBadgeDeriver {
    config: BadgeConfig,
}

impl TrustBadgeDeriver {
    pub fn new() -> Self {
        Self::with_config(BadgeConfig::default())
    }

    pub fn with_config(config: BadgeConfig) -> Self {
        Self { config }
    }

    /// Derive the complete badge set for a user.
    pub fn derive(&self, signals: &BadgeSignals, owned_idea_count: u32) -> BTreeSet<TrustBadge> {
        let badges: BTreeSet<TrustBadge> = TrustBadge::ALL
            .into_iter()
            .filter(|badge| self.holds(*badge, signals, owned_idea_count))
            .collect();

        debug!(
            badge_count = badges.len(),
            owned_idea_count,
            "Derived trust badges"
        );

        badges
    }

    /// Whether a single badge's predicate holds.
    pub fn holds(&self, badge: TrustBadge, signals: &BadgeSignals, owned_idea_count: u32) -> bool {
        match badge {
            TrustBadge::EmailVerified => signals.email_verified,
            TrustBadge::ResumeUploaded => signals.resume_uploaded,
            TrustBadge::ActiveCollaborator => signals.completed_collaborations >= 1,
            TrustBadge::IdeaCreator => owned_idea_count >= 1,
            TrustBadge::TopRated => {
                signals.average_rating >= self.config.top_rated_min_average
                    && signals.total_ratings >= self.config.top_rated_min_ratings
            }
        }
    }
}

impl Default for TrustBadgeDeriver {
    fn default() -> Self {
        Self::new()
    }
}
