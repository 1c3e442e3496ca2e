//! Configuration for the collaboration engine.

use serde::{Deserialize, Serialize};

use matching::MatchingConfig;
use reputation::ReputationConfig;

/// Error raised when engine configuration is inconsistent.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Reputation(#[from] reputation::ConfigError),

    #[error(transparent)]
    Matching(#[from] matching::ConfigError),

    /// Recommendation limits out of order
    #[error("Invalid recommendation limits: {0}")]
    Recommendation(String),
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Reputation caps and badge thresholds
    pub reputation: ReputationConfig,
    /// Match weights and reason thresholds
    pub matching: MatchingConfig,
    /// Result list sizing
    pub recommendation: RecommendationConfig,
}

impl EngineConfig {
    /// Load config from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.reputation.validate()?;
        self.matching.validate()?;
        self.recommendation.validate()
    }
}

/// Recommendation list sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationConfig {
    /// Results returned when the caller gives no limit
    pub default_limit: usize,
    /// Hard ceiling on requested limits
    pub max_limit: usize,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 50,
        }
    }
}

impl RecommendationConfig {
    /// Resolve a caller-supplied limit.
    pub fn effective_limit(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.default_limit).min(self.max_limit)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_limit == 0 {
            return Err(ConfigError::Recommendation(
                "max_limit must be positive".to_string(),
            ));
        }
        if self.default_limit > self.max_limit {
            return Err(ConfigError::Recommendation(format!(
                "default_limit {} exceeds max_limit {}",
                self.default_limit, self.max_limit
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_effective_limit() {
        let config = RecommendationConfig::default();
        assert_eq!(config.effective_limit(None), 10);
        assert_eq!(config.effective_limit(Some(3)), 3);
        assert_eq!(config.effective_limit(Some(500)), 50);
    }

    #[test]
    fn test_nested_yaml() {
        let yaml = r#"
reputation:
  volume_cap: 25.0
matching:
  weights:
    skill: 0.5
    interest: 0.1
recommendation:
  default_limit: 5
"#;
        let config = EngineConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.reputation.volume_cap, 25.0);
        assert_eq!(config.matching.weights.skill, 0.5);
        assert_eq!(config.recommendation.default_limit, 5);
        assert_eq!(config.recommendation.max_limit, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_sections_surface() {
        let config = EngineConfig {
            recommendation: RecommendationConfig {
                default_limit: 80,
                max_limit: 50,
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Recommendation(_))
        ));

        let mut config = EngineConfig::default();
        config.matching.weights.trust = 0.5;
        assert!(matches!(config.validate(), Err(ConfigError::Matching(_))));
    }
}
