//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod poll;

pub use poll::{
    CastVoteCommand, CastVoteHandler, CheckVoteEligibilityHandler, CheckVoteEligibilityQuery,
    CreatePollCommand, CreatePollHandler, DeletePollCommand, DeletePollHandler, GetPollHandler,
    GetPollQuery, GetPollResultsHandler, GetPollResultsQuery, ListPollsHandler, ListPollsQuery,
};
