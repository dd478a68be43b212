//! CheckVoteEligibilityHandler - Query handler for a caller's vote status.

use std::sync::Arc;

use crate::domain::foundation::{PollId, UserId};
use crate::domain::poll::PollError;
use crate::ports::VoteRepository;

/// Query whether the caller has already voted on a poll.
#[derive(Debug, Clone)]
pub struct CheckVoteEligibilityQuery {
    pub poll_id: PollId,
    pub caller: Option<UserId>,
}

/// Handler answering "has this caller voted on this poll".
pub struct CheckVoteEligibilityHandler {
    votes: Arc<dyn VoteRepository>,
}

impl CheckVoteEligibilityHandler {
    pub fn new(votes: Arc<dyn VoteRepository>) -> Self {
        Self { votes }
    }

    /// Anonymous callers are never tracked, so they always get `false`.
    pub async fn handle(&self, query: CheckVoteEligibilityQuery) -> Result<bool, PollError> {
        let Some(user_id) = query.caller else {
            return Ok(false);
        };

        let has_voted = self
            .votes
            .has_user_voted_on_poll(&query.poll_id, &user_id)
            .await?;

        tracing::debug!(poll_id = %query.poll_id, user_id = %user_id, has_voted, "Vote status checked");
        Ok(has_voted)
    }
}
