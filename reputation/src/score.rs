//! Composite reputation scoring.
//!
//! Four independently capped evidence signals are summed and clamped:
//!
//! | Component      | Formula                          | Cap |
//! |----------------|----------------------------------|-----|
//! | rating base    | average rating x 10              | 50  |
//! | volume         | total ratings x 1.5              | 20  |
//! | categories     | (category mean / 5) x 15         | 15  |
//! | collaborations | completed collaborations x 1.5   | 15  |
//!
//! No single signal can dominate; the final clamp bounds the result to 0-100
//! even if the caps are reconfigured.

use serde::{Deserialize, Serialize};
use tracing::debug;

#[cfg(feature = "typescript")]
use ts_rs::TS;

use crate::aggregate::RatingSummary;
use crate::config::ReputationConfig;
use crate::types::{CategoryAverages, MAX_RATING_VALUE};

/// The individually capped parts of a reputation score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct ReputationBreakdown {
    pub rating_base: f64,
    pub volume_bonus: f64,
    pub category_bonus: f64,
    pub collaboration_bonus: f64,
    /// Rounded, clamped sum of the components
    pub score: u8,
}

/// Combines rating statistics and collaboration history into a 0-100 score.
pub struct ReputationScorer {
    config: ReputationConfig,
}

impl ReputationScorer {
    /// Create a scorer with the production constants.
    pub fn new() -> Self {
        Self::with_config(ReputationConfig::default())
    }

    /// Create a scorer with custom caps and multipliers.
    pub fn with_config(config: ReputationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReputationConfig {
        &self.config
    }

    /// Compute each capped component and the final score.
    ///
    /// Total over all inputs: an empty rating history degrades to the
    /// collaboration component alone.
    pub fn breakdown(
        &self,
        average_rating: f64,
        total_ratings: u32,
        category_averages: &CategoryAverages,
        completed_collaborations: u32,
    ) -> ReputationBreakdown {
        let c = &self.config;

        let rating_base = capped(average_rating * c.rating_multiplier, c.rating_cap);
        let volume_bonus = capped(f64::from(total_ratings) * c.volume_per_rating, c.volume_cap);
        let category_bonus = capped(
            category_averages.mean() / f64::from(MAX_RATING_VALUE) * c.category_cap,
            c.category_cap,
        );
        let collaboration_bonus = capped(
            f64::from(completed_collaborations) * c.collaboration_per_completion,
            c.collaboration_cap,
        );

        let raw = rating_base + volume_bonus + category_bonus + collaboration_bonus;
        let score = raw.round().clamp(0.0, f64::from(c.max_score)) as u8;

        debug!(
            rating_base,
            volume_bonus,
            category_bonus,
            collaboration_bonus,
            score,
            "Computed reputation"
        );

        ReputationBreakdown {
            rating_base,
            volume_bonus,
            category_bonus,
            collaboration_bonus,
            score,
        }
    }

    /// Compute the final 0-100 score.
    pub fn compute(
        &self,
        average_rating: f64,
        total_ratings: u32,
        category_averages: &CategoryAverages,
        completed_collaborations: u32,
    ) -> u8 {
        self.breakdown(
            average_rating,
            total_ratings,
            category_averages,
            completed_collaborations,
        )
        .score
    }

    /// Score a summary produced by the aggregator.
    pub fn score_summary(
        &self,
        summary: &RatingSummary,
        completed_collaborations: u32,
    ) -> ReputationBreakdown {
        self.breakdown(
            summary.average_rating,
            summary.total_ratings,
            &summary.category_averages,
            completed_collaborations,
        )
    }
}

impl Default for ReputationScorer {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply a cap, treating negative or NaN input as zero.
fn capped(value: f64, cap: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.max(0.0).min(cap.max(0.0))
}
