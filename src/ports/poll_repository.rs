//! Poll repository port (write side).
//!
//! Persists Poll aggregates together with their options.

use crate::domain::foundation::{DomainError, PollId};
use crate::domain::poll::Poll;
use async_trait::async_trait;

/// Repository port for Poll aggregate persistence.
///
/// Implementations must ensure:
/// - A poll and its options are written atomically
/// - Deleting a poll removes its options and votes
#[async_trait]
pub trait PollRepository: Send + Sync {
    /// Save a new poll with all of its options in one unit of work.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure; nothing is written
    async fn create(&self, poll: &Poll) -> Result<(), DomainError>;

    /// Find a poll (with options in position order) by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &PollId) -> Result<Option<Poll>, DomainError>;

    /// Delete a poll, cascading to its options and votes.
    ///
    /// # Errors
    ///
    /// - `PollNotFound` if the poll doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn delete(&self, id: &PollId) -> Result<(), DomainError>;
}
