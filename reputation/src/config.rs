//! Tunables for reputation scoring and badge thresholds.

use serde::{Deserialize, Serialize};

/// Error raised when a configuration is internally inconsistent.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A value that must be non-negative and finite is not
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: f64 },
}

/// Configuration for the reputation pipeline.
///
/// Defaults match the production constants: four capped components
/// (50 / 20 / 15 / 15) summed and clamped to 0-100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReputationConfig {
    /// Multiplier applied to the 0-5 average rating
    pub rating_multiplier: f64,
    /// Cap for the rating component
    pub rating_cap: f64,
    /// Points per received rating
    pub volume_per_rating: f64,
    /// Cap for the volume component
    pub volume_cap: f64,
    /// Cap for the category component (reached at a 5.0 category mean)
    pub category_cap: f64,
    /// Points per completed collaboration
    pub collaboration_per_completion: f64,
    /// Cap for the collaboration component
    pub collaboration_cap: f64,
    /// Upper bound of the final score
    pub max_score: u8,
    /// Badge thresholds
    pub badges: BadgeConfig,
}

impl Default for ReputationConfig {
    fn default() -> Self {
        Self {
            rating_multiplier: 10.0,
            rating_cap: 50.0,
            volume_per_rating: 1.5,
            volume_cap: 20.0,
            category_cap: 15.0,
            collaboration_per_completion: 1.5,
            collaboration_cap: 15.0,
            max_score: 100,
            badges: BadgeConfig::default(),
        }
    }
}

impl ReputationConfig {
    /// Load config from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Reject negative or non-finite tunables.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("rating_multiplier", self.rating_multiplier),
            ("rating_cap", self.rating_cap),
            ("volume_per_rating", self.volume_per_rating),
            ("volume_cap", self.volume_cap),
            ("category_cap", self.category_cap),
            ("collaboration_per_completion", self.collaboration_per_completion),
            ("collaboration_cap", self.collaboration_cap),
            ("badges.top_rated_min_average", self.badges.top_rated_min_average),
        ];

        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }

        Ok(())
    }

    /// Sum of all component caps.
    pub fn total_cap(&self) -> f64 {
        self.rating_cap + self.volume_cap + self.category_cap + self.collaboration_cap
    }
}

/// Thresholds for the `TopRated` badge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BadgeConfig {
    /// Minimum average rating
    pub top_rated_min_average: f64,
    /// Minimum number of received ratings
    pub top_rated_min_ratings: u32,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            top_rated_min_average: 4.5,
            top_rated_min_ratings: 3,
        }
    }
}
