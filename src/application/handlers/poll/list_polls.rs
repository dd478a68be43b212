//! ListPollsHandler - Query handler for poll listings.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::poll::PollError;
use crate::ports::{PollReader, PollSummary};

/// Which polls to list. Both listings are newest first.
#[derive(Debug, Clone)]
pub enum ListPollsQuery {
    /// Every public poll.
    Public,
    /// Every poll created by the caller, public or private.
    Mine { caller: Option<UserId> },
}

pub struct ListPollsHandler {
    reader: Arc<dyn PollReader>,
}

impl ListPollsHandler {
    pub fn new(reader: Arc<dyn PollReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, query: ListPollsQuery) -> Result<Vec<PollSummary>, PollError> {
        let polls = match query {
            ListPollsQuery::Public => self.reader.list_public().await?,
            ListPollsQuery::Mine { caller } => {
                let caller = caller.ok_or(PollError::Unauthenticated)?;
                self.reader.list_by_creator(&caller).await?
            }
        };
        tracing::debug!(count = polls.len(), "Polls listed");
        Ok(polls)
    }
}
