//! The assembled engine.

use std::sync::Arc;
use tracing::info;

use crate::config::EngineConfig;
use crate::ledger::RatingLedger;
use crate::recommend::Recommender;
use crate::recompute::AggregateRecomputer;
use crate::store::{IdeaStore, RatingStore, UserStore};
use crate::types::Result;

/// Recompute pipeline, rating ledger and recommender sharing one storage
/// backend and one validated configuration.
pub struct CollabEngine {
    config: EngineConfig,
    recomputer: Arc<AggregateRecomputer>,
    ledger: RatingLedger,
    recommender: Recommender,
}

impl CollabEngine {
    /// Build an engine over separate stores.
    pub fn new(
        users: Arc<dyn UserStore>,
        ratings: Arc<dyn RatingStore>,
        ideas: Arc<dyn IdeaStore>,
        config: EngineConfig,
    ) -> Result<Self> {
        config.validate()?;

        let recomputer = Arc::new(AggregateRecomputer::new(
            users.clone(),
            ratings.clone(),
            ideas.clone(),
            &config.reputation,
        ));
        let ledger = RatingLedger::new(users.clone(), ratings, recomputer.clone());
        let recommender = Recommender::new(
            users,
            ideas,
            &config.matching,
            config.recommendation.clone(),
        );

        info!(
            default_limit = config.recommendation.default_limit,
            tie_break = ?config.matching.tie_break,
            "Collaboration engine ready"
        );

        Ok(Self {
            config,
            recomputer,
            ledger,
            recommender,
        })
    }

    /// Build an engine over one store that implements every trait.
    pub fn from_store<S>(store: Arc<S>, config: EngineConfig) -> Result<Self>
    where
        S: UserStore + RatingStore + IdeaStore + 'static,
    {
        Self::new(store.clone(), store.clone(), store, config)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn recomputer(&self) -> &AggregateRecomputer {
        &self.recomputer
    }

    pub fn ledger(&self) -> &RatingLedger {
        &self.ledger
    }

    pub fn recommender(&self) -> &Recommender {
        &self.recommender
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::store::InMemoryStore;
    use crate::types::{EngineError, IdeaRecord, NewRating, RecomputeTrigger, UserProfile};
    use reputation::{CategoryRatings, TrustBadge};

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = EngineConfig::default();
        config.matching.weights.skill = 0.9;

        let result = CollabEngine::from_store(Arc::new(InMemoryStore::new()), config);
        assert!(matches!(
            result,
            Err(EngineError::Config(ConfigError::Matching(_)))
        ));
    }

    #[tokio::test]
    async fn test_rating_to_recommendation_flow() {
        let store = Arc::new(InMemoryStore::new());
        let engine = CollabEngine::from_store(store.clone(), EngineConfig::default()).unwrap();

        let mut maya = UserProfile::new("maya", "Maya")
            .with_skills(["Rust", "PostgreSQL"])
            .with_interests(["climate"]);
        maya.email_verified = true;
        maya.completed_collaborations = 6;
        store.put_user(maya).await;
        store
            .put_user(UserProfile::new("leo", "Leo").with_skills(["Rust"]))
            .await;
        for id in ["r1", "r2", "r3"] {
            store.put_user(UserProfile::new(id, id)).await;
        }

        store
            .put_idea(
                IdeaRecord::new("r1", "Grid carbon tracker")
                    .with_id("carbon")
                    .with_required_skills(["rust", "postgres"])
                    .with_tags(["Climate"]),
            )
            .await;

        for rater in ["r1", "r2", "r3"] {
            engine
                .ledger()
                .submit(
                    NewRating::new("maya", rater, 5)
                        .for_collaboration("carbon")
                        .with_categories(CategoryRatings::uniform(5)),
                )
                .await
                .unwrap();
        }

        // Completed collaborations changed outside the ledger
        let aggregates = engine
            .recomputer()
            .handle(&RecomputeTrigger::CollaborationCompleted {
                user_id: "maya".into(),
            })
            .await
            .unwrap();
        // 50 + 4.5 + 15 + 9 = 78.5 -> 79
        assert_eq!(aggregates.reputation_score, 79);
        assert!(aggregates.trust_badges.contains(&TrustBadge::TopRated));
        assert!(aggregates.trust_badges.contains(&TrustBadge::EmailVerified));
        assert!(aggregates.trust_badges.contains(&TrustBadge::ActiveCollaborator));

        let ranked = engine
            .recommender()
            .collaborators_for_idea("carbon", Some(2))
            .await
            .unwrap();

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].subject_id, "maya");
        assert!(ranked[0].score > ranked[1].score);
        assert!(ranked[0].score <= 1.0);
        assert!(ranked[0]
            .reasons
            .iter()
            .any(|r| r == "Experienced collaborator (6 completed)"));
    }
}
