//! HTTP adapter for poll endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CastVoteRequest, CreatePollRequest, ErrorResponse, OptionTallyResponse, PollOptionResponse,
    PollResponse, PollResultsResponse, PollSummaryResponse, VoteResponse, VoteStatusResponse,
};
pub use handlers::PollHandlers;
pub use routes::poll_routes;
