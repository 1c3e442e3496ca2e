//! Reduction of a rating history into summary statistics.

use serde::{Deserialize, Serialize};
use tracing::debug;

#[cfg(feature = "typescript")]
use ts_rs::TS;

use crate::types::{CategoryAverages, Rating, RatingCategory};

/// Summary statistics for one user's received ratings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct RatingSummary {
    /// Mean overall rating, one decimal place (0.0 when there are no ratings)
    pub average_rating: f64,
    /// Number of ratings received
    pub total_ratings: u32,
    /// Mean per category, counting unset values as 0
    pub category_averages: CategoryAverages,
}

/// Reduces rating records into a [`RatingSummary`].
pub struct RatingAggregator;

impl RatingAggregator {
    /// Recompute summary statistics from a full rating history.
    ///
    /// Unset category values (0) stay in the denominator, so a rater who only
    /// filled the overall stars pulls every category mean down.
    pub fn recompute(ratings: &[Rating]) -> RatingSummary {
        if ratings.is_empty() {
            return RatingSummary::default();
        }

        let count = ratings.len() as f64;
        let overall_sum: u32 = ratings.iter().map(|r| u32::from(r.overall)).sum();

        let category_mean = |category: RatingCategory| {
            ratings
                .iter()
                .map(|r| f64::from(r.categories.get(category)))
                .sum::<f64>()
                / count
        };

        let summary = RatingSummary {
            average_rating: round_to(f64::from(overall_sum) / count, 1),
            total_ratings: u32::try_from(ratings.len()).unwrap_or(u32::MAX),
            category_averages: CategoryAverages {
                communication: category_mean(RatingCategory::Communication),
                reliability: category_mean(RatingCategory::Reliability),
                skill: category_mean(RatingCategory::Skill),
                professionalism: category_mean(RatingCategory::Professionalism),
            },
        };

        debug!(
            total_ratings = summary.total_ratings,
            average_rating = summary.average_rating,
            "Aggregated rating history"
        );

        summary
    }
}

/// Round half away from zero to a number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
