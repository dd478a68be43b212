//! CreatePollHandler - Command handler for creating polls.

use std::sync::Arc;

use crate::domain::foundation::{PollId, Timestamp, UserId};
use crate::domain::poll::{Poll, PollDraft, PollError};
use crate::ports::PollRepository;

/// Command to create a poll with its options.
#[derive(Debug, Clone)]
pub struct CreatePollCommand {
    /// Authenticated caller; `None` is rejected.
    pub creator: Option<UserId>,
    pub draft: PollDraft,
}

/// Handler for creating polls.
pub struct CreatePollHandler {
    repository: Arc<dyn PollRepository>,
}

impl CreatePollHandler {
    pub fn new(repository: Arc<dyn PollRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: CreatePollCommand) -> Result<Poll, PollError> {
        // 1. Authenticate
        let creator = cmd.creator.ok_or(PollError::Unauthenticated)?;

        // 2. Validate and build the aggregate
        let poll = Poll::create(PollId::new(), creator, cmd.draft, Timestamp::now())?;

        // 3. Persist poll and options together
        self.repository.create(&poll).await.map_err(|e| {
            tracing::error!(poll_id = %poll.id(), "Failed to create poll: {}", e);
            PollError::from(e)
        })?;

        tracing::info!(
            poll_id = %poll.id(),
            creator_id = %poll.creator_id(),
            options = poll.options().len(),
            "Poll created"
        );

        Ok(poll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::DomainError;
    use crate::domain::poll::VotePolicy;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockPollRepository {
        polls: Mutex<Vec<Poll>>,
        fail_create: bool,
    }

    impl MockPollRepository {
        fn new() -> Self {
            Self {
                polls: Mutex::new(Vec::new()),
                fail_create: false,
            }
        }

        fn failing() -> Self {
            Self {
                polls: Mutex::new(Vec::new()),
                fail_create: true,
            }
        }

        fn saved(&self) -> Vec<Poll> {
            self.polls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PollRepository for MockPollRepository {
        async fn create(&self, poll: &Poll) -> Result<(), DomainError> {
            if self.fail_create {
                return Err(DomainError::database("connection refused"));
            }
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

        async fn delete(&self, _id: &PollId) -> Result<(), DomainError> {
            Ok(())
        }
    }

    fn test_user_id() -> UserId {
        UserId::new("test-user-123").unwrap()
    }

    fn draft(title: &str, options: &[&str]) -> PollDraft {
        PollDraft {
            title: title.to_string(),
            description: None,
            options: options.iter().map(|o| o.to_string()).collect(),
            is_public: true,
            allow_multiple_votes: false,
            expires_at: None,
        }
    }

    #[tokio::test]
    async fn creates_favorite_language_poll() {
        let repo = Arc::new(MockPollRepository::new());
        let handler = CreatePollHandler::new(repo.clone());

        let cmd = CreatePollCommand {
            creator: Some(test_user_id()),
            draft: draft("Favorite Language", &["JS", "Python"]),
        };

        let poll = handler.handle(cmd).await.unwrap();

        assert_eq!(poll.title(), "Favorite Language");
        assert_eq!(poll.options().len(), 2);
        assert!(poll.is_public());
        assert_eq!(poll.vote_policy(), VotePolicy::Single);
        assert_eq!(poll.creator_id(), &test_user_id());

        let saved = repo.saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].id(), poll.id());
    }

    #[tokio::test]
    async fn option_rows_match_non_blank_inputs() {
        let repo = Arc::new(MockPollRepository::new());
        let handler = CreatePollHandler::new(repo.clone());

        let cmd = CreatePollCommand {
            creator: Some(test_user_id()),
            draft: draft("Lunch", &["Pizza", "", "Tacos", "   ", "Sushi"]),
        };

        let poll = handler.handle(cmd).await.unwrap();

        let saved = &repo.saved()[0];
        assert_eq!(saved.options().len(), 3);
        assert!(saved.options().iter().all(|o| o.poll_id == *poll.id()));
    }

    #[tokio::test]
    async fn blank_title_writes_nothing() {
        let repo = Arc::new(MockPollRepository::new());
        let handler = CreatePollHandler::new(repo.clone());

        let cmd = CreatePollCommand {
            creator: Some(test_user_id()),
            draft: draft("  ", &["a", "b"]),
        };

        let result = handler.handle(cmd).await;
        assert!(matches!(
            result,
            Err(PollError::ValidationFailed { ref field, .. }) if field == "title"
        ));
        assert!(repo.saved().is_empty());
    }

    #[tokio::test]
    async fn insufficient_options_writes_nothing() {
        let repo = Arc::new(MockPollRepository::new());
        let handler = CreatePollHandler::new(repo.clone());

        let cmd = CreatePollCommand {
            creator: Some(test_user_id()),
            draft: draft("Lunch", &["Pizza", " "]),
        };

        let result = handler.handle(cmd).await;
        assert!(matches!(
            result,
            Err(PollError::ValidationFailed { ref field, .. }) if field == "options"
        ));
        assert!(repo.saved().is_empty());
    }

    #[tokio::test]
    async fn anonymous_caller_is_rejected() {
        let repo = Arc::new(MockPollRepository::new());
        let handler = CreatePollHandler::new(repo.clone());

        let cmd = CreatePollCommand {
            creator: None,
            draft: draft("Lunch", &["a", "b"]),
        };

        let result = handler.handle(cmd).await;
        assert_eq!(result.unwrap_err(), PollError::Unauthenticated);
        assert!(repo.saved().is_empty());
    }

    #[tokio::test]
    async fn persistence_failure_surfaces_as_infrastructure() {
        let repo = Arc::new(MockPollRepository::failing());
        let handler = CreatePollHandler::new(repo);

        let cmd = CreatePollCommand {
            creator: Some(test_user_id()),
            draft: draft("Lunch", &["a", "b"]),
        };

        let result = handler.handle(cmd).await;
        assert!(matches!(result, Err(PollError::Infrastructure(_))));
    }
}
