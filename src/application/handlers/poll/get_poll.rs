//! GetPollHandler - Query handler for a single poll with its options.

use std::sync::Arc;

use crate::domain::foundation::PollId;
use crate::domain::poll::{Poll, PollError};
use crate::ports::PollRepository;

#[derive(Debug, Clone)]
pub struct GetPollQuery {
    pub poll_id: PollId,
}

pub struct GetPollHandler {
    repository: Arc<dyn PollRepository>,
}

impl GetPollHandler {
    pub fn new(repository: Arc<dyn PollRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetPollQuery) -> Result<Poll, PollError> {
        self.repository
            .find_by_id(&query.poll_id)
            .await?
            .ok_or(PollError::PollNotFound(query.poll_id))
    }
}
