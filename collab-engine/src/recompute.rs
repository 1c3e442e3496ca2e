//! The recompute cascade: ratings -> summary -> reputation -> badges.
//!
//! Aggregate fields on a user are a materialized view. This module owns the
//! only code path that refreshes them, and it always recomputes from the full
//! rating history rather than patching previous values.

use dashmap::DashMap;
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use reputation::{
    Rating, RatingAggregator, ReputationConfig, ReputationScorer, TrustBadgeDeriver, UserId,
};

use crate::store::{IdeaStore, RatingStore, UserStore};
use crate::types::{EngineError, RecomputeTrigger, Result, UserAggregates, UserProfile};

/// Recomputes and persists a user's aggregates.
///
/// Recomputes for the same user are serialized through a per-user async
/// mutex so two racing cascades cannot interleave their read and write.
/// Different users proceed concurrently.
pub struct AggregateRecomputer {
    users: Arc<dyn UserStore>,
    ratings: Arc<dyn RatingStore>,
    ideas: Arc<dyn IdeaStore>,
    scorer: ReputationScorer,
    deriver: TrustBadgeDeriver,
    locks: DashMap<UserId, Arc<Mutex<()>>>,
}

impl AggregateRecomputer {
    /// Create a recomputer over separate stores.
    pub fn new(
        users: Arc<dyn UserStore>,
        ratings: Arc<dyn RatingStore>,
        ideas: Arc<dyn IdeaStore>,
        config: &ReputationConfig,
    ) -> Self {
        Self {
            users,
            ratings,
            ideas,
            scorer: ReputationScorer::with_config(config.clone()),
            deriver: TrustBadgeDeriver::with_config(config.badges.clone()),
            locks: DashMap::new(),
        }
    }

    /// Create a recomputer over one store that implements every trait.
    pub fn from_store<S>(store: Arc<S>, config: &ReputationConfig) -> Self
    where
        S: UserStore + RatingStore + IdeaStore + 'static,
    {
        Self::new(store.clone(), store.clone(), store, config)
    }

    /// Compute fresh aggregates from a snapshot without persisting them.
    pub fn compute(
        &self,
        user: &UserProfile,
        ratings: &[Rating],
        owned_idea_count: u32,
    ) -> UserAggregates {
        let summary = RatingAggregator::recompute(ratings);
        let reputation = self
            .scorer
            .score_summary(&summary, user.completed_collaborations);
        let signals = user.badge_signals(summary.average_rating, summary.total_ratings);
        let trust_badges = self.deriver.derive(&signals, owned_idea_count);

        UserAggregates {
            average_rating: summary.average_rating,
            total_ratings: summary.total_ratings,
            reputation_score: reputation.score,
            trust_badges,
        }
    }

    /// Reload a user's inputs, recompute, and write the aggregates back.
    pub async fn recompute_user_aggregates(&self, user_id: &str) -> Result<UserAggregates> {
        let lock = self.lock_for(user_id);
        let result = {
            let _guard = lock.lock().await;
            self.recompute_locked(user_id).await
        };

        // Map entry + our clone; anything higher means another task is waiting
        self.locks
            .remove_if(user_id, |_, entry| Arc::strong_count(entry) <= 2);

        result
    }

    /// Recompute the user affected by a state change.
    pub async fn handle(&self, trigger: &RecomputeTrigger) -> Result<UserAggregates> {
        debug!(trigger = ?trigger, "Handling recompute trigger");
        self.recompute_user_aggregates(trigger.user_id()).await
    }

    /// Recompute several users concurrently.
    pub async fn recompute_many(
        &self,
        user_ids: &[UserId],
    ) -> Vec<(UserId, Result<UserAggregates>)> {
        let results = join_all(
            user_ids
                .iter()
                .map(|id| self.recompute_user_aggregates(id)),
        )
        .await;

        user_ids.iter().cloned().zip(results).collect()
    }

    async fn recompute_locked(&self, user_id: &str) -> Result<UserAggregates> {
        let user = self
            .users
            .get_user(user_id)
            .await?
            .ok_or_else(|| EngineError::UserNotFound(user_id.to_string()))?;
        let ratings = self.ratings.ratings_for_user(user_id).await?;
        let owned_idea_count = self.ideas.count_owned_ideas(user_id).await?;

        let aggregates = self.compute(&user, &ratings, owned_idea_count);
        self.users
            .write_aggregates(user_id, aggregates.clone())
            .await?;

        info!(
            user_id = %user_id,
            average_rating = aggregates.average_rating,
            total_ratings = aggregates.total_ratings,
            reputation_score = aggregates.reputation_score,
            badges = aggregates.trust_badges.len(),
            "Recomputed user aggregates"
        );

        Ok(aggregates)
    }

    fn lock_for(&self, user_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use crate::types::IdeaRecord;
    use reputation::{CategoryRatings, TrustBadge};
    use std::collections::BTreeSet;

    async fn setup() -> (Arc<InMemoryStore>, AggregateRecomputer) {
        let store = Arc::new(InMemoryStore::new());
        let recomputer = AggregateRecomputer::from_store(store.clone(), &ReputationConfig::default());
        (store, recomputer)
    }

    #[tokio::test]
    async fn test_user_without_ratings() {
        let (store, recomputer) = setup().await;
        let mut user = UserProfile::new("u1", "Ada");
        user.completed_collaborations = 4;
        store.put_user(user).await;

        let aggregates = recomputer.recompute_user_aggregates("u1").await.unwrap();

        assert_eq!(aggregates.total_ratings, 0);
        assert_eq!(aggregates.average_rating, 0.0);
        // min(4 * 1.5, 15) = 6
        assert_eq!(aggregates.reputation_score, 6);
        assert_eq!(
            aggregates.trust_badges,
            BTreeSet::from([TrustBadge::ActiveCollaborator])
        );
    }

    #[tokio::test]
    async fn test_full_cascade_persists() {
        let (store, recomputer) = setup().await;
        let mut user = UserProfile::new("u1", "Ada");
        user.email_verified = true;
        store.put_user(user).await;
        store.put_idea(IdeaRecord::new("u1", "Tool library")).await;

        for (rater, overall) in [("b", 5), ("c", 4), ("d", 5)] {
            store
                .insert_rating(
                    Rating::new("u1", rater, overall).with_categories(CategoryRatings::uniform(5)),
                )
                .await
                .unwrap();
        }

        recomputer.recompute_user_aggregates("u1").await.unwrap();
        let stored = store.get_user("u1").await.unwrap().unwrap();
        let aggregates = stored.aggregates();

        assert_eq!(aggregates.total_ratings, 3);
        assert_eq!(aggregates.average_rating, 4.7);
        // 47 + 4.5 + 15 + 0 = 66.5 -> 67
        assert_eq!(aggregates.reputation_score, 67);
        assert_eq!(
            aggregates.trust_badges,
            BTreeSet::from([
                TrustBadge::EmailVerified,
                TrustBadge::IdeaCreator,
                TrustBadge::TopRated,
            ])
        );
    }

    #[tokio::test]
    async fn test_recompute_is_idempotent() {
        let (store, recomputer) = setup().await;
        store.put_user(UserProfile::new("u1", "Ada")).await;
        store.insert_rating(Rating::new("u1", "b", 3)).await.unwrap();

        let first = recomputer.recompute_user_aggregates("u1").await.unwrap();
        let second = recomputer.recompute_user_aggregates("u1").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_stale_badge_removed() {
        let (store, recomputer) = setup().await;
        store.put_user(UserProfile::new("u1", "Ada")).await;
        let idea = IdeaRecord::new("u1", "Seed swap");
        let idea_id = idea.id.clone();
        store.put_idea(idea).await;

        let before = recomputer
            .handle(&RecomputeTrigger::IdeaCreated {
                owner_id: "u1".into(),
            })
            .await
            .unwrap();
        assert!(before.trust_badges.contains(&TrustBadge::IdeaCreator));

        store.remove_idea(&idea_id).await;
        let after = recomputer
            .handle(&RecomputeTrigger::IdeaDeleted {
                owner_id: "u1".into(),
            })
            .await
            .unwrap();
        assert!(!after.trust_badges.contains(&TrustBadge::IdeaCreator));
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let (_store, recomputer) = setup().await;
        let result = recomputer.recompute_user_aggregates("ghost").await;
        assert!(matches!(result, Err(EngineError::UserNotFound(id)) if id == "ghost"));
    }

    #[tokio::test]
    async fn test_recompute_many_and_lock_cleanup() {
        let (store, recomputer) = setup().await;
        store.put_user(UserProfile::new("u1", "Ada")).await;
        store.put_user(UserProfile::new("u2", "Grace")).await;
        store.insert_rating(Rating::new("u2", "u1", 5)).await.unwrap();

        let ids = vec!["u1".to_string(), "u2".to_string(), "ghost".to_string()];
        let results = recomputer.recompute_many(&ids).await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].0, "u1");
        assert_eq!(results[1].1.as_ref().unwrap().total_ratings, 1);
        assert!(results[2].1.is_err());
        assert!(recomputer.locks.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_recomputes_same_user() {
        let (store, recomputer) = setup().await;
        let recomputer = Arc::new(recomputer);
        store.put_user(UserProfile::new("u1", "Ada")).await;
        for i in 0..5 {
            store
                .insert_rating(Rating::new("u1", format!("rater-{i}"), 4))
                .await
                .unwrap();
        }

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let recomputer = recomputer.clone();
                tokio::spawn(async move { recomputer.recompute_user_aggregates("u1").await })
            })
            .collect();

        for task in tasks {
            let aggregates = task.await.unwrap().unwrap();
            assert_eq!(aggregates.total_ratings, 5);
        }

        let stored = store.get_user("u1").await.unwrap().unwrap();
        assert_eq!(stored.aggregates().total_ratings, 5);
        assert_eq!(stored.aggregates().average_rating, 4.0);
    }
}
