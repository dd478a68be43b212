//! Poll aggregate entity.
//!
//! A poll is created together with its options and never edited afterwards;
//! it is removed only by explicit deletion from its creator.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    OptionId, OwnedByUser, PollId, Timestamp, UserId, ValidationError,
};

/// Maximum length for a poll title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length for a poll description.
pub const MAX_DESCRIPTION_LENGTH: usize = 2000;

/// Maximum length for a single option text.
pub const MAX_OPTION_LENGTH: usize = 200;

/// Minimum number of non-blank options a poll is created with.
pub const MIN_OPTIONS: usize = 2;

/// Maximum number of options on one poll.
pub const MAX_OPTIONS: usize = 20;

/// Whether an authenticated voter may vote on a poll more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VotePolicy {
    /// One vote per authenticated voter.
    Single,
    /// Unlimited votes per voter.
    Multiple,
}

impl VotePolicy {
    pub fn from_allow_multiple(allow_multiple_votes: bool) -> Self {
        if allow_multiple_votes {
            VotePolicy::Multiple
        } else {
            VotePolicy::Single
        }
    }

    /// True when the store must reject a second vote by the same user.
    pub fn is_exclusive(&self) -> bool {
        matches!(self, VotePolicy::Single)
    }
}

/// Unvalidated poll input as submitted by a creator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PollDraft {
    pub title: String,
    pub description: Option<String>,
    pub options: Vec<String>,
    pub is_public: bool,
    pub allow_multiple_votes: bool,
    pub expires_at: Option<Timestamp>,
}

/// A selectable choice belonging to exactly one poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOption {
    pub id: OptionId,
    pub poll_id: PollId,
    pub text: String,
    /// Zero-based display order within the poll.
    pub position: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Poll aggregate.
///
/// # Invariants
///
/// - `title` is non-empty after trimming
/// - `options` holds at least [`MIN_OPTIONS`] entries at creation, ordered by `position`
/// - every option's `poll_id` equals `id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    id: PollId,
    creator_id: UserId,
    title: String,
    description: Option<String>,
    is_public: bool,
    allow_multiple_votes: bool,
    expires_at: Option<Timestamp>,
    options: Vec<PollOption>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Poll {
    /// Validate a draft and build a new poll owned by `creator_id`.
    ///
    /// Checks run fail-fast: title first, then the option count, then the
    /// remaining length and expiration rules. Blank options are dropped
    /// before counting.
    pub fn create(
        id: PollId,
        creator_id: UserId,
        draft: PollDraft,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let title = draft.title.trim().to_string();
        if title.is_empty() {
            return Err(ValidationError::empty_field("title"));
        }

        let option_texts: Vec<String> = draft
            .options
            .iter()
            .map(|text| text.trim())
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .collect();
        if option_texts.len() < MIN_OPTIONS {
            return Err(ValidationError::too_few(
                "options",
                MIN_OPTIONS,
                option_texts.len(),
            ));
        }
        if option_texts.len() > MAX_OPTIONS {
            return Err(ValidationError::too_many(
                "options",
                MAX_OPTIONS,
                option_texts.len(),
            ));
        }

        let title_len = title.chars().count();
        if title_len > MAX_TITLE_LENGTH {
            return Err(ValidationError::too_long("title", MAX_TITLE_LENGTH, title_len));
        }

        let description = draft
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        if let Some(description) = &description {
            let len = description.chars().count();
            if len > MAX_DESCRIPTION_LENGTH {
                return Err(ValidationError::too_long(
                    "description",
                    MAX_DESCRIPTION_LENGTH,
                    len,
                ));
            }
        }

        if let Some(text) = option_texts
            .iter()
            .find(|text| text.chars().count() > MAX_OPTION_LENGTH)
        {
            return Err(ValidationError::too_long(
                "options",
                MAX_OPTION_LENGTH,
                text.chars().count(),
            ));
        }

        if let Some(expires_at) = draft.expires_at {
            if !expires_at.is_after(&now) {
                return Err(ValidationError::invalid_format(
                    "expires_at",
                    "must be in the future",
                ));
            }
        }

        let options = option_texts
            .into_iter()
            .enumerate()
            .map(|(position, text)| PollOption {
                id: OptionId::new(),
                poll_id: id,
                text,
                position: position as u32,
                created_at: now,
                updated_at: now,
            })
            .collect();

        Ok(Self {
            id,
            creator_id,
            title,
            description,
            is_public: draft.is_public,
            allow_multiple_votes: draft.allow_multiple_votes,
            expires_at: draft.expires_at,
            options,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a poll from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: PollId,
        creator_id: UserId,
        title: String,
        description: Option<String>,
        is_public: bool,
        allow_multiple_votes: bool,
        expires_at: Option<Timestamp>,
        mut options: Vec<PollOption>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        options.sort_by_key(|option| option.position);
        Self {
            id,
            creator_id,
            title,
            description,
            is_public,
            allow_multiple_votes,
            expires_at,
            options,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &PollId {
        &self.id
    }

    pub fn creator_id(&self) -> &UserId {
        &self.creator_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_public(&self) -> bool {
        self.is_public
    }

    pub fn allow_multiple_votes(&self) -> bool {
        self.allow_multiple_votes
    }

    pub fn expires_at(&self) -> Option<&Timestamp> {
        self.expires_at.as_ref()
    }

    /// Options in display order.
    pub fn options(&self) -> &[PollOption] {
        &self.options
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rules
    // ─────────────────────────────────────────────────────────────────────────

    pub fn vote_policy(&self) -> VotePolicy {
        VotePolicy::from_allow_multiple(self.allow_multiple_votes)
    }

    /// A poll with an expiration instant at or before `now` takes no votes.
    pub fn is_expired(&self, now: &Timestamp) -> bool {
        self.expires_at
            .map(|expires_at| !expires_at.is_after(now))
            .unwrap_or(false)
    }

    pub fn has_option(&self, option_id: &OptionId) -> bool {
        self.options.iter().any(|option| option.id == *option_id)
    }
}

impl OwnedByUser for Poll {
    fn owner_id(&self) -> &UserId {
        &self.creator_id
    }
}
