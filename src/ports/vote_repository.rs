//! Vote repository port.
//!
//! Votes are inserted singly and never updated or deleted through this port.

use crate::domain::foundation::{DomainError, PollId, UserId};
use crate::domain::poll::{Vote, VotePolicy};
use async_trait::async_trait;

/// Repository port for vote persistence and the eligibility check.
#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Insert a vote.
    ///
    /// Under [`VotePolicy::Single`] the store itself must refuse a second
    /// vote by the same authenticated voter on the same poll, even when two
    /// requests race past the eligibility check.
    ///
    /// # Errors
    ///
    /// - `DuplicateVote` if the store rejects a second single-policy vote
    /// - `OptionNotFound` if the option does not belong to the vote's poll
    /// - `DatabaseError` on persistence failure
    async fn save(&self, vote: &Vote, policy: VotePolicy) -> Result<(), DomainError>;

    /// Whether `user_id` has voted on any option of `poll_id`.
    async fn has_user_voted_on_poll(
        &self,
        poll_id: &PollId,
        user_id: &UserId,
    ) -> Result<bool, DomainError>;
}
