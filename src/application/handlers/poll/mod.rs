//! Poll command and query handlers.

mod cast_vote;
mod check_vote_eligibility;
mod create_poll;
mod delete_poll;
mod get_poll;
mod get_poll_results;
mod list_polls;

pub use cast_vote::{CastVoteCommand, CastVoteHandler};
pub use check_vote_eligibility::{CheckVoteEligibilityHandler, CheckVoteEligibilityQuery};
pub use create_poll::{CreatePollCommand, CreatePollHandler};
pub use delete_poll::{DeletePollCommand, DeletePollHandler};
pub use get_poll::{GetPollHandler, GetPollQuery};
pub use get_poll_results::{GetPollResultsHandler, GetPollResultsQuery};
pub use list_polls::{ListPollsHandler, ListPollsQuery};
