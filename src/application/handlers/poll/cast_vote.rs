//! CastVoteHandler - Command handler for voting on a poll option.

use std::sync::Arc;

use crate::domain::foundation::{OptionId, PollId, Timestamp, UserId};
use crate::domain::poll::{PollError, Vote};
use crate::ports::{PollRepository, VoteRepository};

/// Command to cast one vote.
#[derive(Debug, Clone)]
pub struct CastVoteCommand {
    pub poll_id: PollId,
    /// Required; `None` fails validation.
    pub option_id: Option<OptionId>,
    /// `None` casts an anonymous vote.
    pub voter: Option<UserId>,
}

/// Handler for casting votes.
pub struct CastVoteHandler {
    polls: Arc<dyn PollRepository>,
    votes: Arc<dyn VoteRepository>,
}

impl CastVoteHandler {
    pub fn new(polls: Arc<dyn PollRepository>, votes: Arc<dyn VoteRepository>) -> Self {
        Self { polls, votes }
    }

    pub async fn handle(&self, cmd: CastVoteCommand) -> Result<Vote, PollError> {
        // 1. Both identifiers required
        let option_id = cmd
            .option_id
            .ok_or_else(|| PollError::validation("option_id", "Option ID is required"))?;

        // 2. Load poll and check the option belongs to it
        let poll = self
            .polls
            .find_by_id(&cmd.poll_id)
            .await?
            .ok_or(PollError::PollNotFound(cmd.poll_id))?;

        if !poll.has_option(&option_id) {
            return Err(PollError::OptionNotFound(option_id));
        }

        let now = Timestamp::now();
        if poll.is_expired(&now) {
            tracing::warn!(poll_id = %cmd.poll_id, "Vote rejected: poll closed");
            return Err(PollError::PollClosed);
        }

        // 3. Eligibility for authenticated voters on single-vote polls
        let policy = poll.vote_policy();
        if let Some(voter) = &cmd.voter {
            if policy.is_exclusive()
                && self
                    .votes
                    .has_user_voted_on_poll(&cmd.poll_id, voter)
                    .await?
            {
                tracing::warn!(poll_id = %cmd.poll_id, voter = %voter, "Vote rejected: already voted");
                return Err(PollError::DuplicateVote);
            }
        }

        // 4. Insert; the store's uniqueness rule backs up the check above
        let vote = Vote::cast(cmd.poll_id, option_id, cmd.voter, now);
        self.votes.save(&vote, policy).await.map_err(|e| {
            let err = PollError::from(e);
            if matches!(err, PollError::Infrastructure(_)) {
                tracing::error!(poll_id = %vote.poll_id, "Failed to save vote: {}", err);
            } else {
                tracing::warn!(poll_id = %vote.poll_id, "Vote rejected by store: {}", err);
            }
            err
        })?;

        tracing::info!(
            poll_id = %vote.poll_id,
            option_id = %vote.option_id,
            anonymous = vote.is_anonymous(),
            "Vote cast"
        );

        Ok(vote)
    }
}
