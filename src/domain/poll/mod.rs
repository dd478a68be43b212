//! Poll domain module.
//!
//! # Module Structure
//!
//! - `aggregate` - Poll aggregate, options, and creation rules
//! - `vote` - Vote entity
//! - `results` - Per-option tallies
//! - `errors` - Workflow error type

mod aggregate;
mod errors;
mod results;
mod vote;

pub use aggregate::{
    Poll, PollDraft, PollOption, VotePolicy, MAX_DESCRIPTION_LENGTH, MAX_OPTIONS,
    MAX_OPTION_LENGTH, MAX_TITLE_LENGTH, MIN_OPTIONS,
};
pub use errors::PollError;
pub use results::{total_votes, OptionTally};
pub use vote::Vote;
