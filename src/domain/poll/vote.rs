//! Vote entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{OptionId, PollId, Timestamp, UserId, VoteId};

/// A single vote for one option of one poll.
///
/// Votes are written once and never mutated. A `None` voter is an anonymous
/// vote, which no eligibility rule restricts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub id: VoteId,
    pub poll_id: PollId,
    pub option_id: OptionId,
    pub voter: Option<UserId>,
    pub created_at: Timestamp,
}

impl Vote {
    pub fn cast(
        poll_id: PollId,
        option_id: OptionId,
        voter: Option<UserId>,
        now: Timestamp,
    ) -> Self {
        Self {
            id: VoteId::new(),
            poll_id,
            option_id,
            voter,
            created_at: now,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.voter.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cast_generates_fresh_ids() {
        let poll_id = PollId::new();
        let option_id = OptionId::new();
        let a = Vote::cast(poll_id, option_id, None, Timestamp::now());
        let b = Vote::cast(poll_id, option_id, None, Timestamp::now());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn vote_without_voter_is_anonymous() {
        let anon = Vote::cast(PollId::new(), OptionId::new(), None, Timestamp::now());
        assert!(anon.is_anonymous());

        let named = Vote::cast(
            PollId::new(),
            OptionId::new(),
            Some(UserId::new("u1").unwrap()),
            Timestamp::now(),
        );
        assert!(!named.is_anonymous());
    }
}
