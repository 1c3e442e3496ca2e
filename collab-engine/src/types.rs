//! Core types for the collaboration engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use matching::{IdeaSnapshot, UserSnapshot};
use reputation::{BadgeSignals, CategoryRatings, Rating, RatingError, TrustBadge, UserId};

use crate::config::ConfigError;
use crate::store::StoreError;

/// Fields of a user that only the recompute pipeline writes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserAggregates {
    /// Average overall rating (0.0 - 5.0)
    pub average_rating: f64,
    /// Number of ratings received
    pub total_ratings: u32,
    /// Composite reputation (0 - 100)
    pub reputation_score: u8,
    /// Current trust credentials
    pub trust_badges: BTreeSet<TrustBadge>,
}

/// A platform user as the engine sees it.
///
/// Aggregate fields are a materialized view: they can be read through
/// [`UserProfile::aggregates`] but are only replaced by a recompute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique user ID
    pub id: UserId,
    /// Display name
    pub name: String,
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    /// Accepted collaborations that reached completion
    pub completed_collaborations: u32,
    pub email_verified: bool,
    /// Reference to an uploaded resume in object storage
    pub resume_url: Option<String>,
    /// When the account was created
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    aggregates: UserAggregates,
}

impl UserProfile {
    /// Create a new profile with empty aggregates.
    pub fn new(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            skills: vec![],
            interests: vec![],
            completed_collaborations: 0,
            email_verified: false,
            resume_url: None,
            created_at: Utc::now(),
            aggregates: UserAggregates::default(),
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

    /// Current aggregate fields.
    pub fn aggregates(&self) -> &UserAggregates {
        &self.aggregates
    }

    /// Whether a resume reference is on file.
    pub fn has_resume(&self) -> bool {
        self.resume_url.as_deref().is_some_and(|url| !url.trim().is_empty())
    }

    /// Projection read by badge predicates, using the given fresh rating stats.
    pub fn badge_signals(&self, average_rating: f64, total_ratings: u32) -> BadgeSignals {
        BadgeSignals {
            email_verified: self.email_verified,
            resume_uploaded: self.has_resume(),
            completed_collaborations: self.completed_collaborations,
            average_rating,
            total_ratings,
        }
    }

    /// Projection read by the matcher.
    pub fn match_snapshot(&self) -> UserSnapshot {
        UserSnapshot {
            id: self.id.clone(),
            skills: self.skills.clone(),
            interests: self.interests.clone(),
            reputation_score: self.aggregates.reputation_score,
            average_rating: self.aggregates.average_rating,
            completed_collaborations: self.completed_collaborations,
            trust_badges: self.aggregates.trust_badges.clone(),
        }
    }

    /// Store-side write path for [`UserStore::write_aggregates`](crate::store::UserStore::write_aggregates).
    pub(crate) fn replace_aggregates(&mut self, aggregates: UserAggregates) {
        self.aggregates = aggregates;
    }
}

/// Lifecycle of an idea.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdeaStatus {
    /// Looking for collaborators
    #[default]
    Open,
    /// Work underway, still accepting collaborators
    InProgress,
    /// Finished
    Completed,
    /// Withdrawn by the owner
    Archived,
}

impl IdeaStatus {
    /// Whether the idea can still take on collaborators.
    pub fn accepts_collaborators(&self) -> bool {
        matches!(self, Self::Open | Self::InProgress)
    }
}

/// An idea posted on the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdeaRecord {
    /// Unique idea ID
    pub id: String,
    pub owner_id: UserId,
    pub title: String,
    pub required_skills: Vec<String>,
    pub tags: Vec<String>,
    pub status: IdeaStatus,
    pub collaborator_ids: BTreeSet<UserId>,
    /// Best candidate score from the last collaborator search. Display only.
    pub top_match_score: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl IdeaRecord {
    pub fn new(owner_id: impl Into<UserId>, title: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            owner_id: owner_id.into(),
            title: title.into(),
            required_skills: vec![],
            tags: vec![],
            status: IdeaStatus::Open,
            collaborator_ids: BTreeSet::new(),
            top_match_score: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
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

    pub fn with_collaborator(mut self, user_id: impl Into<UserId>) -> Self {
        self.collaborator_ids.insert(user_id.into());
        self
    }

    pub fn with_status(mut self, status: IdeaStatus) -> Self {
        self.status = status;
        self
    }

    /// Whether the user owns or already works on this idea.
    pub fn involves(&self, user_id: &str) -> bool {
        self.owner_id == user_id || self.collaborator_ids.contains(user_id)
    }

    /// Projection read by the matcher.
    pub fn match_snapshot(&self) -> IdeaSnapshot {
        IdeaSnapshot {
            id: self.id.clone(),
            owner_id: self.owner_id.clone(),
            required_skills: self.required_skills.clone(),
            tags: self.tags.clone(),
        }
    }
}

/// A rating as submitted by an authenticated user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRating {
    pub rated_user_id: UserId,
    pub rating_user_id: UserId,
    pub collaboration_id: Option<String>,
    pub overall: u8,
    #[serde(default)]
    pub categories: CategoryRatings,
    pub comment: Option<String>,
}

impl NewRating {
    pub fn new(
        rated_user_id: impl Into<UserId>,
        rating_user_id: impl Into<UserId>,
        overall: u8,
    ) -> Self {
        Self {
            rated_user_id: rated_user_id.into(),
            rating_user_id: rating_user_id.into(),
            collaboration_id: None,
            overall,
            categories: CategoryRatings::default(),
            comment: None,
        }
    }

    pub fn for_collaboration(mut self, collaboration_id: impl Into<String>) -> Self {
        self.collaboration_id = Some(collaboration_id.into());
        self
    }

    pub fn with_categories(mut self, categories: CategoryRatings) -> Self {
        self.categories = categories;
        self
    }

    /// Assign an ID and timestamp.
    pub fn into_rating(self) -> Rating {
        let mut rating = Rating::new(self.rated_user_id, self.rating_user_id, self.overall)
            .with_categories(self.categories);
        rating.collaboration_id = self.collaboration_id;
        rating.comment = self.comment;
        rating
    }
}

/// State changes that invalidate a user's aggregates and badges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecomputeTrigger {
    RatingCreated { rated_user_id: UserId },
    RatingDeleted { rated_user_id: UserId },
    CollaborationCompleted { user_id: UserId },
    IdeaCreated { owner_id: UserId },
    IdeaDeleted { owner_id: UserId },
    EmailVerified { user_id: UserId },
    ResumeUploaded { user_id: UserId },
}

impl RecomputeTrigger {
    /// The user whose aggregates must be recomputed.
    pub fn user_id(&self) -> &str {
        match self {
            Self::RatingCreated { rated_user_id } | Self::RatingDeleted { rated_user_id } => {
                rated_user_id
            }
            Self::IdeaCreated { owner_id } | Self::IdeaDeleted { owner_id } => owner_id,
            Self::CollaborationCompleted { user_id }
            | Self::EmailVerified { user_id }
            | Self::ResumeUploaded { user_id } => user_id,
        }
    }
}

/// Error types for the engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// User does not exist
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Idea does not exist
    #[error("Idea not found: {0}")]
    IdeaNotFound(String),

    /// Rating does not exist
    #[error("Rating not found: {0}")]
    RatingNotFound(String),

    /// Rating failed structural validation
    #[error("Invalid rating: {0}")]
    InvalidRating(#[from] RatingError),

    /// The rater already rated this user for this collaboration
    #[error("User {rating_user_id} already rated {rated_user_id} for this collaboration")]
    DuplicateRating {
        rated_user_id: String,
        rating_user_id: String,
    },

    /// Only the author may delete a rating
    #[error("User {requester_id} is not the author of rating {rating_id}")]
    NotRatingAuthor {
        rating_id: String,
        requester_id: String,
    },

    /// Storage layer error
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
