//! Poll workflow error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | ValidationFailed | 400 |
//! | Unauthenticated | 401 |
//! | Forbidden | 403 |
//! | PollNotFound | 404 |
//! | OptionNotFound | 404 |
//! | DuplicateVote | 409 |
//! | PollClosed | 409 |
//! | Infrastructure | 500 |

use thiserror::Error;

use crate::domain::foundation::{
    DomainError, ErrorCode, OptionId, PollId, ValidationError,
};

/// Errors raised by the poll workflows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PollError {
    /// Caller input was rejected before any write.
    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    /// The operation needs an authenticated caller.
    #[error("Authentication required")]
    Unauthenticated,

    /// The caller does not own the poll.
    #[error("You do not have permission to delete this poll")]
    Forbidden,

    /// The caller already voted on a single-vote poll.
    #[error("You have already voted on this poll")]
    DuplicateVote,

    #[error("Poll not found: {0}")]
    PollNotFound(PollId),

    #[error("Option not found: {0}")]
    OptionNotFound(OptionId),

    /// The poll's expiration instant has passed.
    #[error("This poll is closed")]
    PollClosed,

    /// Persistence or other infrastructure failure.
    #[error("Error: {0}")]
    Infrastructure(String),
}

impl PollError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        PollError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        PollError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            PollError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            PollError::Unauthenticated => ErrorCode::Unauthorized,
            PollError::Forbidden => ErrorCode::Forbidden,
            PollError::DuplicateVote => ErrorCode::DuplicateVote,
            PollError::PollNotFound(_) => ErrorCode::PollNotFound,
            PollError::OptionNotFound(_) => ErrorCode::OptionNotFound,
            PollError::PollClosed => ErrorCode::PollClosed,
            PollError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<ValidationError> for PollError {
    fn from(err: ValidationError) -> Self {
        PollError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for PollError {
    fn from(err: DomainError) -> Self {
        let detail = |key: &str| err.details.get(key).map(String::as_str);
        match err.code {
            ErrorCode::ValidationFailed => PollError::ValidationFailed {
                field: detail("field").unwrap_or("unknown").to_string(),
                message: err.message.clone(),
            },
            ErrorCode::Unauthorized => PollError::Unauthenticated,
            ErrorCode::Forbidden => PollError::Forbidden,
            ErrorCode::DuplicateVote => PollError::DuplicateVote,
            ErrorCode::PollClosed => PollError::PollClosed,
            ErrorCode::PollNotFound => match detail("poll_id").and_then(|id| id.parse().ok()) {
                Some(id) => PollError::PollNotFound(id),
                None => PollError::Infrastructure(err.to_string()),
            },
            ErrorCode::OptionNotFound => {
                match detail("option_id").and_then(|id| id.parse().ok()) {
                    Some(id) => PollError::OptionNotFound(id),
                    None => PollError::Infrastructure(err.to_string()),
                }
            }
            ErrorCode::DatabaseError | ErrorCode::InternalError => {
                PollError::Infrastructure(err.to_string())
            }
        }
    }
}
