//! Reputation and Trust Core for Ideahub
//!
//! Turns raw peer ratings into a bounded trust score and a set of discrete
//! trust credentials:
//!
//! - [`RatingAggregator`]: reduces a rating history into summary statistics
//! - [`ReputationScorer`]: combines four capped evidence signals into a 0-100 score
//! - [`TrustBadgeDeriver`]: evaluates independent predicates into a badge set
//!
//! Every operation is a pure function over an input snapshot. Deciding when to
//! recompute and persisting the results belong to the caller.
//!
//! # Example
//!
//! ```
//! use reputation::{
//!     BadgeSignals, Rating, RatingAggregator, ReputationScorer, TrustBadge, TrustBadgeDeriver,
//! };
//!
//! let ratings = vec![
//!     Rating::new("alice", "bob", 5),
//!     Rating::new("alice", "carol", 4),
//!     Rating::new("alice", "dave", 5),
//! ];
//!
//! let summary = RatingAggregator::recompute(&ratings);
//! let reputation = ReputationScorer::new().score_summary(&summary, 2);
//! assert!(reputation.score <= 100);
//!
//! let signals = BadgeSignals {
//!     average_rating: summary.average_rating,
//!     total_ratings: summary.total_ratings,
//!     completed_collaborations: 2,
//!     ..Default::default()
//! };
//! let badges = TrustBadgeDeriver::new().derive(&signals, 0);
//! assert!(badges.contains(&TrustBadge::TopRated));
//! ```

pub mod aggregate;
pub mod badges;
pub mod config;
pub mod score;
pub mod types;

// Re-export main types
pub use aggregate::{round_to, RatingAggregator, RatingSummary};
pub use badges::{BadgeSignals, TrustBadgeDeriver};
pub use config::{BadgeConfig, ConfigError, ReputationConfig};
pub use score::{ReputationBreakdown, ReputationScorer};
pub use types::*;
