//! Configuration for match scoring and ranking.

use serde::{Deserialize, Serialize};

use crate::ranker::TieBreak;

/// Tolerance when checking that weights sum to one.
const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Error raised for an inconsistent matching configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Component weights must sum to 1.0
    #[error("Match weights must sum to 1.0, got {0}")]
    WeightsDoNotSumToOne(f64),

    /// A value outside its allowed range
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: f64 },
}

/// Match scoring configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Component weights
    pub weights: MatchWeights,
    /// Interest component when the idea has no tags
    pub neutral_interest: f64,
    /// Completed collaborations at which experience saturates
    pub experience_saturation: u32,
    /// Trust contributed by each badge
    pub trust_per_badge: f64,
    /// When to attach human-readable reasons
    pub reasons: ReasonThresholds,
    /// How equal scores are ordered
    pub tie_break: TieBreak,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            weights: MatchWeights::default(),
            neutral_interest: 0.5,
            experience_saturation: 10,
            trust_per_badge: 0.2,
            reasons: ReasonThresholds::default(),
            tie_break: TieBreak::default(),
        }
    }
}

impl MatchingConfig {
    /// Load config from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Check weights and unit-interval values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weights.validate()?;

        for (field, value) in [
            ("neutral_interest", self.neutral_interest),
            ("trust_per_badge", self.trust_per_badge),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }

        if self.experience_saturation == 0 {
            return Err(ConfigError::InvalidValue {
                field: "experience_saturation",
                value: 0.0,
            });
        }

        Ok(())
    }
}

/// Relative weight of each match component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchWeights {
    pub skill: f64,
    pub interest: f64,
    pub reputation: f64,
    pub experience: f64,
    pub trust: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            skill: 0.40,
            interest: 0.20,
            reputation: 0.20,
            experience: 0.10,
            trust: 0.10,
        }
    }
}

impl MatchWeights {
    pub fn sum(&self) -> f64 {
        self.skill + self.interest + self.reputation + self.experience + self.trust
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("weights.skill", self.skill),
            ("weights.interest", self.interest),
            ("weights.reputation", self.reputation),
            ("weights.experience", self.experience),
            ("weights.trust", self.trust),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(ConfigError::WeightsDoNotSumToOne(sum));
        }

        Ok(())
    }
}

/// Thresholds that gate each advisory reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReasonThresholds {
    /// Matched skills named in the skills reason
    pub max_named_skills: usize,
    /// Interest component above which alignment is mentioned
    pub interest_above: f64,
    /// Average rating at which the rating is mentioned
    pub high_rating_min: f64,
    /// Completed collaborations at which experience is mentioned
    pub experienced_min: u32,
}

impl Default for ReasonThresholds {
    fn default() -> Self {
        Self {
            max_named_skills: 3,
            interest_above: 0.3,
            high_rating_min: 4.0,
            experienced_min: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let config = MatchingConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.weights.sum() - 1.0).abs() < WEIGHT_TOLERANCE);
    }

    #[test]
    fn test_unbalanced_weights_rejected() {
        let config = MatchingConfig {
            weights: MatchWeights {
                skill: 0.5,
                ..Default::default()
            },
            ..Default::default()
        };

        match config.validate() {
            Err(ConfigError::WeightsDoNotSumToOne(sum)) => assert!((sum - 1.1).abs() < 1e-9),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_zero_saturation_rejected() {
        let config = MatchingConfig {
            experience_saturation: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "experience_saturation",
                ..
            })
        ));
    }

    #[test]
    fn test_yaml_overrides() {
        let yaml = "tie_break: subject_id\nreasons:\n  max_named_skills: 5\n";
        let config = MatchingConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.tie_break, TieBreak::SubjectId);
        assert_eq!(config.reasons.max_named_skills, 5);
        assert_eq!(config.reasons.interest_above, 0.3);
        assert_eq!(config.weights, MatchWeights::default());
    }
}
