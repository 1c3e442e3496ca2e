//! On-demand recommendations in both directions.
//!
//! - ideas for a user: every idea still accepting collaborators that the user
//!   neither owns nor already works on
//! - collaborators for an idea: every user other than the owner and the
//!   current collaborators, as long as the idea still accepts collaborators
//!
//! Results are transient. The only write is a best-effort cache of the top
//! collaborator score on the idea, which is never authoritative.

use std::sync::Arc;
use tracing::{debug, warn};

use matching::{MatchResult, MatchScorer, MatchingConfig, Ranker};

use crate::config::RecommendationConfig;
use crate::store::{IdeaStore, UserStore};
use crate::types::{EngineError, Result};

/// Scores and ranks candidates pulled from storage.
pub struct Recommender {
    users: Arc<dyn UserStore>,
    ideas: Arc<dyn IdeaStore>,
    scorer: MatchScorer,
    ranker: Ranker,
    config: RecommendationConfig,
}

impl Recommender {
    pub fn new(
        users: Arc<dyn UserStore>,
        ideas: Arc<dyn IdeaStore>,
        matching: &MatchingConfig,
        config: RecommendationConfig,
    ) -> Self {
        Self {
            users,
            ideas,
            scorer: MatchScorer::with_config(matching.clone()),
            ranker: Ranker::with_tie_break(matching.tie_break),
            config,
        }
    }

    /// Ideas the user could join, best match first.
    pub async fn ideas_for_user(
        &self,
        user_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<MatchResult>> {
        let user = self
            .users
            .get_user(user_id)
            .await?
            .ok_or_else(|| EngineError::UserNotFound(user_id.to_string()))?;
        let snapshot = user.match_snapshot();

        let candidates: Vec<MatchResult> = self
            .ideas
            .list_ideas()
            .await?
            .into_iter()
            .filter(|idea| idea.status.accepts_collaborators() && !idea.involves(user_id))
            .map(|idea| {
                self.scorer
                    .score(&snapshot, &idea.match_snapshot(), idea.id.clone())
            })
            .collect();

        let limit = self.config.effective_limit(limit);
        debug!(
            user_id = %user_id,
            candidates = candidates.len(),
            limit,
            "Ranking ideas for user"
        );

        Ok(self.ranker.rank(candidates, limit))
    }

    /// Users who could join the idea, best match first.
    pub async fn collaborators_for_idea(
        &self,
        idea_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<MatchResult>> {
        let idea = self
            .ideas
            .get_idea(idea_id)
            .await?
            .ok_or_else(|| EngineError::IdeaNotFound(idea_id.to_string()))?;

        if !idea.status.accepts_collaborators() {
            debug!(idea_id = %idea_id, status = ?idea.status, "Idea is closed to collaborators");
            return Ok(vec![]);
        }

        let idea_snapshot = idea.match_snapshot();

        let candidates: Vec<MatchResult> = self
            .users
            .list_users()
            .await?
            .into_iter()
            .filter(|user| !idea.involves(&user.id))
            .map(|user| {
                self.scorer
                    .score(&user.match_snapshot(), &idea_snapshot, user.id.clone())
            })
            .collect();

        let limit = self.config.effective_limit(limit);
        debug!(
            idea_id = %idea_id,
            candidates = candidates.len(),
            limit,
            "Ranking collaborators for idea"
        );

        let ranked = self.ranker.rank(candidates, limit);

        if let Some(top) = ranked.first() {
            if let Err(e) = self.ideas.cache_top_match_score(idea_id, top.score).await {
                warn!(idea_id = %idea_id, error = %e, "Failed to cache top match score");
            }
        }

        Ok(ranked)
    }
}
