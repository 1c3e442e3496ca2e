//! Storage seams for the engine.
//!
//! The engine never talks to a database directly. Users, ratings and ideas
//! are read and written through these traits so the persistence layer
//! (document store, SQL, mock) can be swapped without touching the scoring
//! pipeline. [`InMemoryStore`] backs tests and single-process deployments.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use reputation::Rating;

use crate::types::{IdeaRecord, UserAggregates, UserProfile};

/// Error types for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Backend is not reachable
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Write rejected because it would break a uniqueness constraint
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Record referenced by a write does not exist
    #[error("Record not found: {0}")]
    NotFound(String),
}

/// Read access to users plus the single aggregate write path.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Load a user by ID.
    async fn get_user(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError>;

    /// Load every user.
    async fn list_users(&self) -> Result<Vec<UserProfile>, StoreError>;

    /// Replace a user's aggregate fields.
    ///
    /// Only the recompute pipeline calls this.
    async fn write_aggregates(
        &self,
        user_id: &str,
        aggregates: UserAggregates,
    ) -> Result<(), StoreError>;
}

/// Rating persistence.
#[async_trait]
pub trait RatingStore: Send + Sync {
    /// Insert a rating.
    ///
    /// Must fail with [`StoreError::Conflict`] when a rating with the same
    /// (rated, rater, collaboration) key already exists.
    async fn insert_rating(&self, rating: Rating) -> Result<(), StoreError>;

    /// Load a rating by ID.
    async fn get_rating(&self, rating_id: &str) -> Result<Option<Rating>, StoreError>;

    /// Delete a rating, returning whether it existed.
    async fn delete_rating(&self, rating_id: &str) -> Result<bool, StoreError>;

    /// Full rating history received by a user.
    async fn ratings_for_user(&self, rated_user_id: &str) -> Result<Vec<Rating>, StoreError>;
}

/// Idea persistence.
#[async_trait]
pub trait IdeaStore: Send + Sync {
    /// Load an idea by ID.
    async fn get_idea(&self, idea_id: &str) -> Result<Option<IdeaRecord>, StoreError>;

    /// Load every idea.
    async fn list_ideas(&self) -> Result<Vec<IdeaRecord>, StoreError>;

    /// Number of ideas owned by a user.
    async fn count_owned_ideas(&self, owner_id: &str) -> Result<u32, StoreError>;

    /// Cache the best collaborator score on an idea for display.
    async fn cache_top_match_score(&self, idea_id: &str, score: f64) -> Result<(), StoreError>;
}

/// In-memory store implementing every storage trait.
///
/// Iteration order of `list_users` and `list_ideas` follows insertion order,
/// like a database fetch without an explicit sort.
#[derive(Default)]
pub struct InMemoryStore {
    users: Arc<RwLock<Vec<UserProfile>>>,
    ratings: Arc<RwLock<Vec<Rating>>>,
    ideas: Arc<RwLock<Vec<IdeaRecord>>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update a user's profile fields.
    ///
    /// Aggregates already stored for the user are kept; incoming aggregate
    /// values are ignored.
    pub async fn put_user(&self, mut profile: UserProfile) {
        let mut users = self.users.write().await;

        if let Some(existing) = users.iter_mut().find(|u| u.id == profile.id) {
            profile.replace_aggregates(existing.aggregates().clone());
            *existing = profile;
        } else {
            profile.replace_aggregates(UserAggregates::default());
            users.push(profile);
        }
    }

    /// Insert or replace an idea.
    pub async fn put_idea(&self, idea: IdeaRecord) {
        let mut ideas = self.ideas.write().await;

        if let Some(existing) = ideas.iter_mut().find(|i| i.id == idea.id) {
            *existing = idea;
        } else {
            ideas.push(idea);
        }
    }

    /// Remove an idea, returning it if it existed.
    pub async fn remove_idea(&self, idea_id: &str) -> Option<IdeaRecord> {
        let mut ideas = self.ideas.write().await;
        let index = ideas.iter().position(|i| i.id == idea_id)?;
        Some(ideas.remove(index))
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn get_user(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn list_users(&self) -> Result<Vec<UserProfile>, StoreError> {
        Ok(self.users.read().await.clone())
    }

    async fn write_aggregates(
        &self,
        user_id: &str,
        aggregates: UserAggregates,
    ) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| StoreError::NotFound(user_id.to_string()))?;

        user.replace_aggregates(aggregates);
        Ok(())
    }
}

#[async_trait]
impl RatingStore for InMemoryStore {
    async fn insert_rating(&self, rating: Rating) -> Result<(), StoreError> {
        let mut ratings = self.ratings.write().await;

        if ratings.iter().any(|r| r.dedup_key() == rating.dedup_key()) {
            return Err(StoreError::Conflict(format!(
                "rating by {} for {} already exists",
                rating.rating_user_id, rating.rated_user_id
            )));
        }

        ratings.push(rating);
        Ok(())
    }

    async fn get_rating(&self, rating_id: &str) -> Result<Option<Rating>, StoreError> {
        let ratings = self.ratings.read().await;
        Ok(ratings.iter().find(|r| r.id == rating_id).cloned())
    }

    async fn delete_rating(&self, rating_id: &str) -> Result<bool, StoreError> {
        let mut ratings = self.ratings.write().await;
        let before = ratings.len();
        ratings.retain(|r| r.id != rating_id);
        Ok(ratings.len() != before)
    }

    async fn ratings_for_user(&self, rated_user_id: &str) -> Result<Vec<Rating>, StoreError> {
        let ratings = self.ratings.read().await;
        Ok(ratings
            .iter()
            .filter(|r| r.rated_user_id == rated_user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl IdeaStore for InMemoryStore {
    async fn get_idea(&self, idea_id: &str) -> Result<Option<IdeaRecord>, StoreError> {
        let ideas = self.ideas.read().await;
        Ok(ideas.iter().find(|i| i.id == idea_id).cloned())
    }

    async fn list_ideas(&self) -> Result<Vec<IdeaRecord>, StoreError> {
        Ok(self.ideas.read().await.clone())
    }

    async fn count_owned_ideas(&self, owner_id: &str) -> Result<u32, StoreError> {
        let ideas = self.ideas.read().await;
        let count = ideas.iter().filter(|i| i.owner_id == owner_id).count();
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    async fn cache_top_match_score(&self, idea_id: &str, score: f64) -> Result<(), StoreError> {
        let mut ideas = self.ideas.write().await;
        let idea = ideas
            .iter_mut()
            .find(|i| i.id == idea_id)
            .ok_or_else(|| StoreError::NotFound(idea_id.to_string()))?;

        idea.top_match_score = Some(score);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reputation::TrustBadge;

    #[tokio::test]
    async fn test_put_user_preserves_aggregates() {
        let store = InMemoryStore::new();
        store.put_user(UserProfile::new("u1", "Ada")).await;

        let aggregates = UserAggregates {
            average_rating: 4.5,
            total_ratings: 3,
            reputation_score: 70,
            trust_badges: [TrustBadge::TopRated].into_iter().collect(),
        };
        store.write_aggregates("u1", aggregates.clone()).await.unwrap();

        // A profile edit carrying stale aggregates must not overwrite them
        let edited = UserProfile::new("u1", "Ada L.").with_skills(["rust"]);
        store.put_user(edited).await;

        let user = store.get_user("u1").await.unwrap().unwrap();
        assert_eq!(user.name, "Ada L.");
        assert_eq!(user.aggregates(), &aggregates);
    }

    #[tokio::test]
    async fn test_new_user_aggregates_start_empty() {
        let store = InMemoryStore::new();
        let mut forged = UserProfile::new("u1", "Mallory");
        forged.replace_aggregates(UserAggregates {
            reputation_score: 100,
            ..Default::default()
        });
        store.put_user(forged).await;

        let user = store.get_user("u1").await.unwrap().unwrap();
        assert_eq!(user.aggregates(), &UserAggregates::default());
    }

    #[tokio::test]
    async fn test_duplicate_rating_conflicts() {
        let store = InMemoryStore::new();
        store
            .insert_rating(Rating::new("a", "b", 5).for_collaboration("idea-1"))
            .await
            .unwrap();

        let duplicate = store
            .insert_rating(Rating::new("a", "b", 3).for_collaboration("idea-1"))
            .await;
        assert!(matches!(duplicate, Err(StoreError::Conflict(_))));

        // Different collaboration is a different key
        store
            .insert_rating(Rating::new("a", "b", 3).for_collaboration("idea-2"))
            .await
            .unwrap();
        assert_eq!(store.ratings_for_user("a").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_rating() {
        let store = InMemoryStore::new();
        let rating = Rating::new("a", "b", 4);
        let id = rating.id.clone();
        store.insert_rating(rating).await.unwrap();

        assert!(store.delete_rating(&id).await.unwrap());
        assert!(!store.delete_rating(&id).await.unwrap());
        assert!(store.get_rating(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_idea_counts_and_cache() {
        let store = InMemoryStore::new();
        store.put_idea(IdeaRecord::new("owner", "One").with_id("i1")).await;
        store.put_idea(IdeaRecord::new("owner", "Two").with_id("i2")).await;
        store.put_idea(IdeaRecord::new("other", "Three").with_id("i3")).await;

        assert_eq!(store.count_owned_ideas("owner").await.unwrap(), 2);

        store.cache_top_match_score("i1", 0.83).await.unwrap();
        let idea = store.get_idea("i1").await.unwrap().unwrap();
        assert_eq!(idea.top_match_score, Some(0.83));

        assert!(store.remove_idea("i2").await.is_some());
        assert_eq!(store.count_owned_ideas("owner").await.unwrap(), 1);
        assert!(matches!(
            store.cache_top_match_score("i2", 0.5).await,
            Err(StoreError::NotFound(_))
        ));
    }
}
