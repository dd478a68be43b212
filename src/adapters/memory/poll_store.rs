//! In-Memory Poll Store
//!
//! Implements every persistence port over one lock-guarded state, so each
//! operation is atomic the way a database transaction would be. Deleting a
//! poll drops its votes, and single-vote polls reject a second vote by the
//! same user at insert time.
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, PollId, UserId};
use crate::domain::poll::{OptionTally, Poll, Vote, VotePolicy};
use crate::ports::{PollReader, PollRepository, PollSummary, VoteRepository};

#[derive(Debug, Default)]
struct StoreState {
    /// Poll plus insertion sequence, used to break `created_at` ties.
    polls: HashMap<PollId, (u64, Poll)>,
    votes: Vec<StoredVote>,
    next_seq: u64,
}

#[derive(Debug, Clone)]
struct StoredVote {
    vote: Vote,
    exclusive: bool,
}

/// In-memory implementation of the poll, reader, and vote ports.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPollStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryPollStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored polls.
    pub async fn poll_count(&self) -> usize {
        self.state.read().await.polls.len()
    }

    /// Number of stored votes across all polls.
    pub async fn vote_count(&self) -> usize {
        self.state.read().await.votes.len()
    }

    fn summarize(poll: &Poll) -> PollSummary {
        PollSummary {
            id: *poll.id(),
            title: poll.title().to_string(),
            description: poll.description().map(str::to_string),
            creator_id: poll.creator_id().clone(),
            is_public: poll.is_public(),
            allow_multiple_votes: poll.allow_multiple_votes(),
            expires_at: poll.expires_at().copied(),
            option_count: poll.options().len() as u32,
            created_at: *poll.created_at(),
        }
    }

    async fn list_where(&self, keep: impl Fn(&Poll) -> bool) -> Vec<PollSummary> {
        let state = self.state.read().await;
        let mut polls: Vec<&(u64, Poll)> = state.polls.values().filter(|(_, p)| keep(p)).collect();
        polls.sort_by(|(seq_a, a), (seq_b, b)| {
            b.created_at()
                .cmp(a.created_at())
                .then_with(|| seq_b.cmp(seq_a))
        });
        polls.into_iter().map(|(_, p)| Self::summarize(p)).collect()
    }
}

#[async_trait]
impl PollRepository for InMemoryPollStore {
    async fn create(&self, poll: &Poll) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state.polls.contains_key(poll.id()) {
            return Err(DomainError::database(format!("Poll already exists: {}", poll.id())));
        }
        let seq = state.next_seq;
        state.next_seq += 1;
        state.polls.insert(*poll.id(), (seq, poll.clone()));
        Ok(())
    }

    async fn find_by_id(&self, id: &PollId) -> Result<Option<Poll>, DomainError> {
        Ok(self.state.read().await.polls.get(id).map(|(_, p)| p.clone()))
    }

    async fn delete(&self, id: &PollId) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state.polls.remove(id).is_none() {
            return Err(
                DomainError::new(ErrorCode::PollNotFound, format!("Poll not found: {}", id))
                    .with_detail("poll_id", id.to_string()),
            );
        }
        state.votes.retain(|v| v.vote.poll_id != *id);
        Ok(())
    }
}

#[async_trait]
impl PollReader for InMemoryPollStore {
    async fn list_public(&self) -> Result<Vec<PollSummary>, DomainError> {
        Ok(self.list_where(|p| p.is_public()).await)
    }

    async fn list_by_creator(&self, creator_id: &UserId) -> Result<Vec<PollSummary>, DomainError> {
        Ok(self.list_where(|p| p.creator_id() == creator_id).await)
    }

    async fn results(&self, poll_id: &PollId) -> Result<Vec<OptionTally>, DomainError> {
        let state = self.state.read().await;
        let Some((_, poll)) = state.polls.get(poll_id) else {
            return Ok(Vec::new());
        };

        Ok(poll
            .options()
            .iter()
            .map(|option| OptionTally {
                option_id: option.id,
                option_text: option.text.clone(),
                vote_count: state
                    .votes
                    .iter()
                    .filter(|v| v.vote.option_id == option.id)
                    .count() as u64,
            })
            .collect())
    }
}

#[async_trait]
impl VoteRepository for InMemoryPollStore {
    async fn save(&self, vote: &Vote, policy: VotePolicy) -> Result<(), DomainError> {
        let mut state = self.state.write().await;

        let belongs = state
            .polls
            .get(&vote.poll_id)
            .map(|(_, p)| p.has_option(&vote.option_id))
            .unwrap_or(false);
        if !belongs {
            return Err(DomainError::new(
                ErrorCode::OptionNotFound,
                format!("Option {} does not belong to poll {}", vote.option_id, vote.poll_id),
            )
            .with_detail("option_id", vote.option_id.to_string()));
        }

        let exclusive = policy.is_exclusive();
        if exclusive && vote.voter.is_some() {
            let taken = state.votes.iter().any(|stored| {
                stored.exclusive
                    && stored.vote.poll_id == vote.poll_id
                    && stored.vote.voter == vote.voter
            });
            if taken {
                return Err(DomainError::new(
                    ErrorCode::DuplicateVote,
                    "You have already voted on this poll",
                ));
            }
        }

        state.votes.push(StoredVote {
            vote: vote.clone(),
            exclusive,
        });
        Ok(())
    }

    async fn has_user_voted_on_poll(
        &self,
        poll_id: &PollId,
        user_id: &UserId,
    ) -> Result<bool, DomainError> {
        Ok(self
            .state
            .read()
            .await
            .votes
            .iter()
            .any(|v| v.vote.poll_id == *poll_id && v.vote.voter.as_ref() == Some(user_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{OptionId, Timestamp};
    use crate::domain::poll::PollDraft;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn poll(creator: &str, title: &str, is_public: bool, now: Timestamp) -> Poll {
        Poll::create(
            PollId::new(),
            user(creator),
            PollDraft {
                title: title.to_string(),
                options: vec!["JS".to_string(), "Python".to_string()],
                is_public,
                ..Default::default()
            },
            now,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn create_then_find_returns_same_poll() {
        let store = InMemoryPollStore::new();
        let poll = poll("u1", "Lunch", true, Timestamp::now());

        store.create(&poll).await.unwrap();

        assert_eq!(store.find_by_id(poll.id()).await.unwrap(), Some(poll));
    }

    #[tokio::test]
    async fn listings_are_newest_first() {
        let store = InMemoryPollStore::new();
        let now = Timestamp::now();
        let older = poll("u1", "Older", true, now);
        let newer = poll("u2", "Newer", true, now.plus_minutes(1));
        let private = poll("u1", "Private", false, now.plus_minutes(2));
        store.create(&older).await.unwrap();
        store.create(&newer).await.unwrap();
        store.create(&private).await.unwrap();

        let public: Vec<String> = store
            .list_public()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(public, vec!["Newer", "Older"]);

        let mine: Vec<String> = store
            .list_by_creator(&user("u1"))
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(mine, vec!["Private", "Older"]);
    }

    #[tokio::test]
    async fn results_include_zero_counts_in_option_order() {
        let store = InMemoryPollStore::new();
        let poll = poll("u1", "Lunch", true, Timestamp::now());
        store.create(&poll).await.unwrap();

        let python = poll.options()[1].id;
        let vote = Vote::cast(*poll.id(), python, None, Timestamp::now());
        store.save(&vote, VotePolicy::Single).await.unwrap();

        let results = store.results(poll.id()).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].option_text, "JS");
        assert_eq!(results[0].vote_count, 0);
        assert_eq!(results[1].option_text, "Python");
        assert_eq!(results[1].vote_count, 1);
    }

    #[tokio::test]
    async fn exclusive_votes_are_unique_per_user() {
        let store = InMemoryPollStore::new();
        let poll = poll("u1", "Lunch", true, Timestamp::now());
        store.create(&poll).await.unwrap();
        let option = poll.options()[0].id;

        let first = Vote::cast(*poll.id(), option, Some(user("u2")), Timestamp::now());
        store.save(&first, VotePolicy::Single).await.unwrap();

        let second = Vote::cast(*poll.id(), option, Some(user("u2")), Timestamp::now());
        let err = store.save(&second, VotePolicy::Single).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateVote);
        assert_eq!(store.vote_count().await, 1);
    }

    #[tokio::test]
    async fn foreign_option_inserts_nothing() {
        let store = InMemoryPollStore::new();
        let poll = poll("u1", "Lunch", true, Timestamp::now());
        store.create(&poll).await.unwrap();

        let vote = Vote::cast(*poll.id(), OptionId::new(), None, Timestamp::now());
        let err = store.save(&vote, VotePolicy::Multiple).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::OptionNotFound);
        assert_eq!(store.vote_count().await, 0);
    }

    #[tokio::test]
    async fn delete_cascades_to_votes() {
        let store = InMemoryPollStore::new();
        let poll = poll("u1", "Lunch", true, Timestamp::now());
        store.create(&poll).await.unwrap();
        let vote = Vote::cast(*poll.id(), poll.options()[0].id, Some(user("u2")), Timestamp::now());
        store.save(&vote, VotePolicy::Single).await.unwrap();

        store.delete(poll.id()).await.unwrap();

        assert_eq!(store.poll_count().await, 0);
        assert_eq!(store.vote_count().await, 0);
        assert!(!store.has_user_voted_on_poll(poll.id(), &user("u2")).await.unwrap());
    }

    #[tokio::test]
    async fn deleting_unknown_poll_is_not_found() {
        let store = InMemoryPollStore::new();
        let err = store.delete(&PollId::new()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PollNotFound);
    }
}
