//! Poll reader port (read side / CQRS queries).
//!
//! Listing and result aggregation. Results are computed from stored votes
//! on every call and never cached.

use crate::domain::foundation::{DomainError, PollId, Timestamp, UserId};
use crate::domain::poll::OptionTally;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Reader port for poll queries.
#[async_trait]
pub trait PollReader: Send + Sync {
    /// List all public polls, newest first.
    async fn list_public(&self) -> Result<Vec<PollSummary>, DomainError>;

    /// List every poll created by `creator_id`, public or not, newest first.
    async fn list_by_creator(&self, creator_id: &UserId) -> Result<Vec<PollSummary>, DomainError>;

    /// Per-option vote counts for a poll, in option order.
    ///
    /// Options without votes are included with a zero count. An unknown poll
    /// yields an empty list.
    async fn results(&self, poll_id: &PollId) -> Result<Vec<OptionTally>, DomainError>;
}

/// Summary view of a poll for lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollSummary {
    pub id: PollId,
    pub title: String,
    pub description: Option<String>,
    pub creator_id: UserId,
    pub is_public: bool,
    pub allow_multiple_votes: bool,
    pub expires_at: Option<Timestamp>,
    pub option_count: u32,
    pub created_at: Timestamp,
}
