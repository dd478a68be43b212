//! DeletePollHandler - Command handler for deleting polls.

use std::sync::Arc;

use crate::domain::foundation::{OwnedByUser, PollId, UserId};
use crate::domain::poll::PollError;
use crate::ports::PollRepository;

/// Command to delete a poll.
#[derive(Debug, Clone)]
pub struct DeletePollCommand {
    pub poll_id: PollId,
    pub caller: Option<UserId>,
}

/// Handler for deleting polls. Only the creator may delete.
pub struct DeletePollHandler {
    repository: Arc<dyn PollRepository>,
}

impl DeletePollHandler {
    pub fn new(repository: Arc<dyn PollRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeletePollCommand) -> Result<(), PollError> {
        // 1. Authenticate
        let caller = cmd.caller.ok_or(PollError::Unauthenticated)?;

        // 2. Load poll
        let poll = self
            .repository
            .find_by_id(&cmd.poll_id)
            .await?
            .ok_or(PollError::PollNotFound(cmd.poll_id))?;

        // 3. Authorize - caller must be the creator
        if poll.check_ownership(&caller).is_err() {
            tracing::warn!(poll_id = %cmd.poll_id, caller = %caller, "Delete rejected: not the creator");
            return Err(PollError::Forbidden);
        }

        // 4. Delete; options and votes go with it
        self.repository.delete(&cmd.poll_id).await?;

        tracing::info!(poll_id = %cmd.poll_id, "Poll deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
    use crate::domain::poll::{Poll, PollDraft};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockPollRepository {
        polls: Mutex<Vec<Poll>>,
    }

    impl MockPollRepository {
        fn with_poll(poll: Poll) -> Self {
            Self {
                polls: Mutex::new(vec![poll]),
            }
        }

        fn contains(&self, id: &PollId) -> bool {
            self.polls.lock().unwrap().iter().any(|p| p.id() == id)
        }
    }

    #[async_trait]
    impl PollRepository for MockPollRepository {
        async fn create(&self, poll: &Poll) -> Result<(), DomainError> {
            self.polls.lock().unwrap().push(poll.clone());
            Ok(())
        }

        async fn find_by_id(&self, id: &PollId) -> Result<Option<Poll>, DomainError> {
            Ok(self
                .polls
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.id() == id)
                .cloned())
        }

        async fn delete(&self, id: &PollId) -> Result<(), DomainError> {
            let mut polls = self.polls.lock().unwrap();
            let before = polls.len();
            polls.retain(|p| p.id() != id);
            if polls.len() == before {
                return Err(DomainError::new(ErrorCode::PollNotFound, "Poll not found")
                    .with_detail("poll_id", id.to_string()));
            }
            Ok(())
        }
    }

    fn creator() -> UserId {
        UserId::new("creator-1").unwrap()
    }

    fn test_poll() -> Poll {
        Poll::create(
            PollId::new(),
            creator(),
            PollDraft {
                title: "Lunch".to_string(),
                options: vec!["a".to_string(), "b".to_string()],
                ..Default::default()
            },
            Timestamp::now(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn creator_can_delete() {
        let poll = test_poll();
        let poll_id = *poll.id();
        let repo = Arc::new(MockPollRepository::with_poll(poll));
        let handler = DeletePollHandler::new(repo.clone());

        handler
            .handle(DeletePollCommand {
                poll_id,
                caller: Some(creator()),
            })
            .await
            .unwrap();

        assert!(!repo.contains(&poll_id));
    }

    #[tokio::test]
    async fn non_creator_is_forbidden_and_poll_remains() {
        let poll = test_poll();
        let poll_id = *poll.id();
        let repo = Arc::new(MockPollRepository::with_poll(poll));
        let handler = DeletePollHandler::new(repo.clone());

        let result = handler
            .handle(DeletePollCommand {
                poll_id,
                caller: Some(UserId::new("intruder").unwrap()),
            })
            .await;

        assert_eq!(result.unwrap_err(), PollError::Forbidden);
        assert!(repo.contains(&poll_id));
    }

    #[tokio::test]
    async fn anonymous_caller_is_unauthenticated() {
        let poll = test_poll();
        let poll_id = *poll.id();
        let repo = Arc::new(MockPollRepository::with_poll(poll));
        let handler = DeletePollHandler::new(repo.clone());

        let result = handler
            .handle(DeletePollCommand {
                poll_id,
                caller: None,
            })
            .await;

        assert_eq!(result.unwrap_err(), PollError::Unauthenticated);
        assert!(repo.contains(&poll_id));
    }

    #[tokio::test]
    async fn missing_poll_is_not_found() {
        let repo = Arc::new(MockPollRepository::with_poll(test_poll()));
        let handler = DeletePollHandler::new(repo);
        let missing = PollId::new();

        let result = handler
            .handle(DeletePollCommand {
                poll_id: missing,
                caller: Some(creator()),
            })
            .await;

        assert_eq!(result.unwrap_err(), PollError::PollNotFound(missing));
    }
}
