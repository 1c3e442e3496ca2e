//! Core types for rating aggregation and trust derivation.
//!
//! With the `typescript` feature enabled, the presentation types can be exported
//! to TypeScript using ts-rs for consistency with the web frontend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Identifier of a platform user.
pub type UserId = String;

/// Highest value on any rating scale.
pub const MAX_RATING_VALUE: u8 = 5;

/// Sub-dimension scored alongside the overall star rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum RatingCategory {
    Communication,
    Reliability,
    Skill,
    Professionalism,
}

impl RatingCategory {
    /// Every category, in display order.
    pub const ALL: [RatingCategory; 4] = [
        Self::Communication,
        Self::Reliability,
        Self::Skill,
        Self::Professionalism,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Communication => "communication",
            Self::Reliability => "reliability",
            Self::Skill => "skill",
            Self::Professionalism => "professionalism",
        }
    }
}

impl std::fmt::Display for RatingCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-category values of a single rating.
///
/// Each value is 0-5 where 0 means the rater left the category unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct CategoryRatings {
    #[serde(default)]
    pub communication: u8,
    #[serde(default)]
    pub reliability: u8,
    #[serde(default)]
    pub skill: u8,
    #[serde(default)]
    pub professionalism: u8,
}

impl CategoryRatings {
    /// Ratings with every category set to the same value.
    pub fn uniform(value: u8) -> Self {
        Self {
            communication: value,
            reliability: value,
            skill: value,
            professionalism: value,
        }
    }

    /// Value recorded for a category (0 when unset).
    pub fn get(&self, category: RatingCategory) -> u8 {
        match category {
            RatingCategory::Communication => self.communication,
            RatingCategory::Reliability => self.reliability,
            RatingCategory::Skill => self.skill,
            RatingCategory::Professionalism => self.professionalism,
        }
    }
}

/// Mean value per category across a rating history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct CategoryAverages {
    pub communication: f64,
    pub reliability: f64,
    pub skill: f64,
    pub professionalism: f64,
}

impl CategoryAverages {
    pub fn get(&self, category: RatingCategory) -> f64 {
        match category {
            RatingCategory::Communication => self.communication,
            RatingCategory::Reliability => self.reliability,
            RatingCategory::Skill => self.skill,
            RatingCategory::Professionalism => self.professionalism,
        }
    }

    /// Unweighted mean of the four category averages.
    pub fn mean(&self) -> f64 {
        RatingCategory::ALL.iter().map(|c| self.get(*c)).sum::<f64>()
            / RatingCategory::ALL.len() as f64
    }
}

/// A rating one user gave another, optionally tied to a collaboration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Unique rating ID
    pub id: String,
    /// User receiving the rating
    pub rated_user_id: UserId,
    /// Author of the rating
    pub rating_user_id: UserId,
    /// Idea the collaboration happened on, if any
    pub collaboration_id: Option<String>,
    /// Overall stars (1-5)
    pub overall: u8,
    /// Optional sub-dimension scores
    #[serde(default)]
    pub categories: CategoryRatings,
    /// Free-text review
    pub comment: Option<String>,
    /// When the rating was submitted
    pub created_at: DateTime<Utc>,
}

impl Rating {
    /// Create a rating with only the overall value set.
    pub fn new(
        rated_user_id: impl Into<UserId>,
        rating_user_id: impl Into<UserId>,
        overall: u8,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            rated_user_id: rated_user_id.into(),
            rating_user_id: rating_user_id.into(),
            collaboration_id: None,
            overall,
            categories: CategoryRatings::default(),
            comment: None,
            created_at: Utc::now(),
        }
    }

    /// Attach the collaboration this rating refers to.
    pub fn for_collaboration(mut self, collaboration_id: impl Into<String>) -> Self {
        self.collaboration_id = Some(collaboration_id.into());
        self
    }

    /// Set category values.
    pub fn with_categories(mut self, categories: CategoryRatings) -> Self {
        self.categories = categories;
        self
    }

    /// Set the review text.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Check the structural contracts a rating must meet before aggregation.
    pub fn validate(&self) -> Result<(), RatingError> {
        if self.rated_user_id == self.rating_user_id {
            return Err(RatingError::SelfRating(self.rated_user_id.clone()));
        }

        if !(1..=MAX_RATING_VALUE).contains(&self.overall) {
            return Err(RatingError::OverallOutOfRange(self.overall));
        }

        for category in RatingCategory::ALL {
            let value = self.categories.get(category);
            if value > MAX_RATING_VALUE {
                return Err(RatingError::CategoryOutOfRange { category, value });
            }
        }

        Ok(())
    }

    /// Uniqueness key: at most one rating per (rated, rater, collaboration).
    pub fn dedup_key(&self) -> (&str, &str, Option<&str>) {
        (
            &self.rated_user_id,
            &self.rating_user_id,
            self.collaboration_id.as_deref(),
        )
    }
}

/// Closed set of trust credentials a user can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum TrustBadge {
    /// Email address confirmed
    EmailVerified,
    /// A resume is on file
    ResumeUploaded,
    /// Completed at least one collaboration
    ActiveCollaborator,
    /// Owns at least one idea
    IdeaCreator,
    /// Consistently high ratings across enough raters
    TopRated,
}

impl TrustBadge {
    pub const ALL: [TrustBadge; 5] = [
        Self::EmailVerified,
        Self::ResumeUploaded,
        Self::ActiveCollaborator,
        Self::IdeaCreator,
        Self::TopRated,
    ];

    /// Stable wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmailVerified => "email_verified",
            Self::ResumeUploaded => "resume_uploaded",
            Self::ActiveCollaborator => "active_collaborator",
            Self::IdeaCreator => "idea_creator",
            Self::TopRated => "top_rated",
        }
    }
}

impl std::fmt::Display for TrustBadge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors for ratings that violate their structural contracts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RatingError {
    /// Rater and rated user are the same
    #[error("User {0} cannot rate themselves")]
    SelfRating(UserId),

    /// Overall value outside 1-5
    #[error("Overall rating must be between 1 and 5, got {0}")]
    OverallOutOfRange(u8),

    /// Category value outside 0-5
    #[error("Category {category} must be between 0 and 5, got {value}")]
    CategoryOutOfRange { category: RatingCategory, value: u8 },
}
