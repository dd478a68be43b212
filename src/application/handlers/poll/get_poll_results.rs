//! GetPollResultsHandler - Query handler for per-option vote tallies.

use std::sync::Arc;

use crate::domain::foundation::PollId;
use crate::domain::poll::{OptionTally, PollError};
use crate::ports::PollReader;

/// Query for the results of one poll.
#[derive(Debug, Clone)]
pub struct GetPollResultsQuery {
    pub poll_id: PollId,
}

/// Handler for poll results.
pub struct GetPollResultsHandler {
    reader: Arc<dyn PollReader>,
}

impl GetPollResultsHandler {
    pub fn new(reader: Arc<dyn PollReader>) -> Self {
        Self { reader }
    }

    /// Every stored poll has at least two options, so an empty tally list
    /// means the poll does not exist.
    pub async fn handle(&self, query: GetPollResultsQuery) -> Result<Vec<OptionTally>, PollError> {
        let tallies = self.reader.results(&query.poll_id).await?;
        if tallies.is_empty() {
            return Err(PollError::PollNotFound(query.poll_id));
        }
        Ok(tallies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainError, OptionId, UserId};
    use crate::ports::PollSummary;
    use async_trait::async_trait;

    struct MockPollReader {
        tallies: Vec<OptionTally>,
    }

    #[async_trait]
    impl PollReader for MockPollReader {
        async fn list_public(&self) -> Result<Vec<PollSummary>, DomainError> {
            Ok(vec![])
        }

        async fn list_by_creator(&self, _creator_id: &UserId) -> Result<Vec<PollSummary>, DomainError> {
            Ok(vec![])
        }

        async fn results(&self, _poll_id: &PollId) -> Result<Vec<OptionTally>, DomainError> {
            Ok(self.tallies.clone())
        }
    }

    fn tally(text: &str, vote_count: u64) -> OptionTally {
        OptionTally {
            option_id: OptionId::new(),
            option_text: text.to_string(),
            vote_count,
        }
    }

    #[tokio::test]
    async fn returns_zero_counts_in_option_order() {
        let reader = Arc::new(MockPollReader {
            tallies: vec![tally("JS", 0), tally("Python", 0)],
        });
        let handler = GetPollResultsHandler::new(reader);

        let results = handler
            .handle(GetPollResultsQuery {
                poll_id: PollId::new(),
            })
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].option_text, "JS");
        assert_eq!(results[1].option_text, "Python");
        assert!(results.iter().all(|t| t.vote_count == 0));
    }

    #[tokio::test]
    async fn empty_results_mean_unknown_poll() {
        let reader = Arc::new(MockPollReader { tallies: vec![] });
        let handler = GetPollResultsHandler::new(reader);
        let poll_id = PollId::new();

        let result = handler.handle(GetPollResultsQuery { poll_id }).await;
        assert_eq!(result.unwrap_err(), PollError::PollNotFound(poll_id));
    }
}
