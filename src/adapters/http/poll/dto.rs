//! HTTP DTOs for poll endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PollId, Timestamp};
use crate::domain::poll::{total_votes, OptionTally, Poll, PollDraft, PollError, PollOption, Vote};
use crate::ports::PollSummary;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to create a new poll.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePollRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default = "default_is_public")]
    pub is_public: bool,
    #[serde(default)]
    pub allow_multiple_votes: bool,
    /// RFC 3339 instant, e.g. `2030-01-01T00:00:00Z`.
    #[serde(default)]
    pub expires_at: Option<String>,
}

fn default_is_public() -> bool {
    true
}

impl CreatePollRequest {
    /// Converts the request body into a draft, parsing the expiration instant.
    pub fn into_draft(self) -> Result<PollDraft, PollError> {
        let expires_at = match self.expires_at.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(Timestamp::parse_rfc3339(raw).map_err(|_| {
                PollError::validation("expires_at", "must be an RFC 3339 timestamp")
            })?),
        };

        Ok(PollDraft {
            title: self.title,
            description: self.description,
            options: self.options,
            is_public: self.is_public,
            allow_multiple_votes: self.allow_multiple_votes,
            expires_at,
        })
    }
}

/// Request to cast a vote.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CastVoteRequest {
    #[serde(default)]
    pub option_id: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One option of a poll, in display order.
#[derive(Debug, Clone, Serialize)]
pub struct PollOptionResponse {
    pub id: String,
    pub text: String,
    pub position: u32,
}

impl From<&PollOption> for PollOptionResponse {
    fn from(option: &PollOption) -> Self {
        Self {
            id: option.id.to_string(),
            text: option.text.clone(),
            position: option.position,
        }
    }
}

/// Detailed poll view for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct PollResponse {
    pub id: String,
    pub creator_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_public: bool,
    pub allow_multiple_votes: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    pub options: Vec<PollOptionResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Poll> for PollResponse {
    fn from(poll: &Poll) -> Self {
        Self {
            id: poll.id().to_string(),
            creator_id: poll.creator_id().to_string(),
            title: poll.title().to_string(),
            description: poll.description().map(str::to_string),
            is_public: poll.is_public(),
            allow_multiple_votes: poll.allow_multiple_votes(),
            expires_at: poll.expires_at().map(|t| t.as_datetime().to_rfc3339()),
            options: poll.options().iter().map(PollOptionResponse::from).collect(),
            created_at: poll.created_at().as_datetime().to_rfc3339(),
            updated_at: poll.updated_at().as_datetime().to_rfc3339(),
        }
    }
}

/// Poll summary for list responses.
#[derive(Debug, Clone, Serialize)]
pub struct PollSummaryResponse {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub creator_id: String,
    pub is_public: bool,
    pub allow_multiple_votes: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    pub option_count: u32,
    pub created_at: String,
}

impl From<PollSummary> for PollSummaryResponse {
    fn from(summary: PollSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            title: summary.title,
            description: summary.description,
            creator_id: summary.creator_id.to_string(),
            is_public: summary.is_public,
            allow_multiple_votes: summary.allow_multiple_votes,
            expires_at: summary.expires_at.map(|t| t.as_datetime().to_rfc3339()),
            option_count: summary.option_count,
            created_at: summary.created_at.as_datetime().to_rfc3339(),
        }
    }
}

/// A recorded vote.
#[derive(Debug, Clone, Serialize)]
pub struct VoteResponse {
    pub id: String,
    pub poll_id: String,
    pub option_id: String,
    pub anonymous: bool,
    pub created_at: String,
}

impl From<&Vote> for VoteResponse {
    fn from(vote: &Vote) -> Self {
        Self {
            id: vote.id.to_string(),
            poll_id: vote.poll_id.to_string(),
            option_id: vote.option_id.to_string(),
            anonymous: vote.is_anonymous(),
            created_at: vote.created_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Vote tally for one option.
#[derive(Debug, Clone, Serialize)]
pub struct OptionTallyResponse {
    pub option_id: String,
    pub option_text: String,
    pub vote_count: u64,
}

impl From<OptionTally> for OptionTallyResponse {
    fn from(tally: OptionTally) -> Self {
        Self {
            option_id: tally.option_id.to_string(),
            option_text: tally.option_text,
            vote_count: tally.vote_count,
        }
    }
}

/// Aggregated results for a poll.
#[derive(Debug, Clone, Serialize)]
pub struct PollResultsResponse {
    pub poll_id: String,
    pub total_votes: u64,
    pub results: Vec<OptionTallyResponse>,
}

impl PollResultsResponse {
    pub fn new(poll_id: PollId, tallies: Vec<OptionTally>) -> Self {
        Self {
            poll_id: poll_id.to_string(),
            total_votes: total_votes(&tallies),
            results: tallies.into_iter().map(Into::into).collect(),
        }
    }
}

/// Whether the caller has already voted on a poll.
#[derive(Debug, Clone, Serialize)]
pub struct VoteStatusResponse {
    pub poll_id: String,
    pub has_voted: bool,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<&PollError> for ErrorResponse {
    fn from(error: &PollError) -> Self {
        let response = Self::new(error.code().to_string(), error.to_string());
        match error {
            PollError::ValidationFailed { field, .. } => {
                response.with_details(serde_json::json!({ "field": field }))
            }
            _ => response,
        }
    }
}
