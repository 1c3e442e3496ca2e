//! Collaboration Matching for Ideahub
//!
//! Scores how well a user fits an idea and ranks the candidates:
//!
//! - [`MatchScorer`]: weighted compatibility on a 0-1 scale with advisory reasons
//! - [`Ranker`]: stable descending sort with truncation
//!
//! Used in both directions: ideas recommended to a user, and users
//! recommended as collaborators on an idea. Match scores are transient and
//! must not be confused with the 0-100 reputation scale.
//!
//! # Example
//!
//! ```
//! use matching::{IdeaSnapshot, MatchScorer, Ranker, UserSnapshot};
//!
//! let scorer = MatchScorer::new();
//! let idea = IdeaSnapshot::new("idea-1", "owner").with_required_skills(["react", "mongodb"]);
//!
//! let candidates = vec![
//!     UserSnapshot::new("alice").with_skills(["React", "Node.js"]),
//!     UserSnapshot::new("bob").with_skills(["React", "MongoDB"]),
//! ];
//!
//! let results = candidates
//!     .iter()
//!     .map(|user| scorer.score(user, &idea, user.id.clone()))
//!     .collect();
//!
//! let ranked = Ranker::new().rank(results, 10);
//! assert_eq!(ranked[0].subject_id, "bob");
//! ```

pub mod config;
pub mod ranker;
pub mod scorer;
pub mod similarity;
pub mod types;

// Re-export main types
pub use config::{ConfigError, MatchWeights, MatchingConfig, ReasonThresholds};
pub use ranker::{Ranker, TieBreak};
pub use scorer::MatchScorer;
pub use similarity::tokens_match;
pub use types::*;
