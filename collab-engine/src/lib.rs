//! Ideahub Collaboration Engine
//!
//! Wires the pure reputation and matching cores to an abstract storage layer:
//!
//! - **Recompute cascade**: rating or profile change -> aggregate -> score -> badges
//! - **Rating ledger**: validated submission and author-only deletion
//! - **Recommendations**: ideas for a user, collaborators for an idea
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        CollabEngine                          │
//! │                                                              │
//! │  ┌──────────────┐   trigger   ┌─────────────────────────┐    │
//! │  │ RatingLedger │────────────▶│   AggregateRecomputer   │    │
//! │  └──────────────┘             │ Aggregate▶Score▶Badges  │    │
//! │                               └────────────┬────────────┘    │
//! │  ┌──────────────┐                          │ write_aggregates│
//! │  │ Recommender  │ MatchScorer▶Ranker       │                 │
//! │  └──────┬───────┘                          │                 │
//! │         │                                  │                 │
//! │  ┌──────▼──────────────────────────────────▼──────────────┐  │
//! │  │        UserStore / RatingStore / IdeaStore             │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine decides nothing about *when* to recompute: callers emit a
//! [`RecomputeTrigger`] for every state change and the engine produces the
//! correct aggregates for the current snapshot.

pub mod config;
pub mod engine;
pub mod ledger;
pub mod recommend;
pub mod recompute;
pub mod store;
pub mod types;

// Re-export main types
pub use config::{ConfigError, EngineConfig, RecommendationConfig};
pub use engine::CollabEngine;
pub use ledger::{RatingHistory, RatingLedger, RatingReceipt};
pub use recommend::Recommender;
pub use recompute::AggregateRecomputer;
pub use store::{IdeaStore, InMemoryStore, RatingStore, StoreError, UserStore};
pub use types::*;
