//! Rating lifecycle: submission, deletion, and history.
//!
//! Enforces the contracts the scoring core relies on before any rating
//! reaches it: no self-ratings, values in range, one rating per
//! (rated, rater, collaboration), and author-only deletion. Every accepted
//! change triggers a full recompute of the rated user. A change whose
//! recompute fails is rolled back, so stored ratings and aggregates never
//! disagree after an error.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use reputation::{Rating, RatingAggregator, RatingSummary};

use crate::recompute::AggregateRecomputer;
use crate::store::{RatingStore, StoreError, UserStore};
use crate::types::{EngineError, NewRating, RecomputeTrigger, Result, UserAggregates};

/// A user's received ratings with their summary statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingHistory {
    pub ratings: Vec<Rating>,
    pub summary: RatingSummary,
}

/// Outcome of an accepted rating change.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingReceipt {
    pub rating: Rating,
    /// Rated user's aggregates after the recompute
    pub aggregates: UserAggregates,
}

/// Accepts and removes ratings, keeping aggregates in sync.
pub struct RatingLedger {
    users: Arc<dyn UserStore>,
    ratings: Arc<dyn RatingStore>,
    recomputer: Arc<AggregateRecomputer>,
}

impl RatingLedger {
    pub fn new(
        users: Arc<dyn UserStore>,
        ratings: Arc<dyn RatingStore>,
        recomputer: Arc<AggregateRecomputer>,
    ) -> Self {
        Self {
            users,
            ratings,
            recomputer,
        }
    }

    /// Validate and store a rating, then recompute the rated user.
    pub async fn submit(&self, new_rating: NewRating) -> Result<RatingReceipt> {
        let rating = new_rating.into_rating();
        rating.validate()?;

        if self.users.get_user(&rating.rated_user_id).await?.is_none() {
            return Err(EngineError::UserNotFound(rating.rated_user_id.clone()));
        }

        match self.ratings.insert_rating(rating.clone()).await {
            Ok(()) => {}
            Err(StoreError::Conflict(_)) => {
                return Err(EngineError::DuplicateRating {
                    rated_user_id: rating.rated_user_id.clone(),
                    rating_user_id: rating.rating_user_id.clone(),
                });
            }
            Err(e) => return Err(e.into()),
        }

        info!(
            rating_id = %rating.id,
            rated_user_id = %rating.rated_user_id,
            rating_user_id = %rating.rating_user_id,
            overall = rating.overall,
            "Rating submitted"
        );

        let trigger = RecomputeTrigger::RatingCreated {
            rated_user_id: rating.rated_user_id.clone(),
        };
        match self.recomputer.handle(&trigger).await {
            Ok(aggregates) => Ok(RatingReceipt { rating, aggregates }),
            Err(e) => {
                warn!(rating_id = %rating.id, error = %e, "Recompute failed, withdrawing rating");
                if let Err(rollback) = self.ratings.delete_rating(&rating.id).await {
                    warn!(rating_id = %rating.id, error = %rollback, "Failed to withdraw rating");
                }
                Err(e)
            }
        }
    }

    /// Delete a rating on behalf of its author, then recompute the rated user.
    pub async fn delete(&self, rating_id: &str, requester_id: &str) -> Result<RatingReceipt> {
        let rating = self
            .ratings
            .get_rating(rating_id)
            .await?
            .ok_or_else(|| EngineError::RatingNotFound(rating_id.to_string()))?;

        if rating.rating_user_id != requester_id {
            return Err(EngineError::NotRatingAuthor {
                rating_id: rating_id.to_string(),
                requester_id: requester_id.to_string(),
            });
        }

        if !self.ratings.delete_rating(rating_id).await? {
            return Err(EngineError::RatingNotFound(rating_id.to_string()));
        }

        info!(
            rating_id = %rating_id,
            rated_user_id = %rating.rated_user_id,
            "Rating deleted"
        );

        let trigger = RecomputeTrigger::RatingDeleted {
            rated_user_id: rating.rated_user_id.clone(),
        };
        match self.recomputer.handle(&trigger).await {
            Ok(aggregates) => Ok(RatingReceipt { rating, aggregates }),
            Err(e) => {
                warn!(rating_id = %rating_id, error = %e, "Recompute failed, restoring rating");
                if let Err(rollback) = self.ratings.insert_rating(rating).await {
                    warn!(rating_id = %rating_id, error = %rollback, "Failed to restore rating");
                }
                Err(e)
            }
        }
    }

    /// Ratings a user has received, with fresh summary statistics.
    pub async fn history(&self, user_id: &str) -> Result<RatingHistory> {
        let ratings = self.ratings.ratings_for_user(user_id).await?;
        let summary = RatingAggregator::recompute(&ratings);
        Ok(RatingHistory { ratings, summary })
    }
}
