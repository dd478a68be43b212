//! HTTP routes for poll endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    cast_vote, create_poll, delete_poll, get_poll, get_poll_results, get_vote_status,
    list_my_polls, list_public_polls, PollHandlers,
};

/// Creates the poll router with all endpoints.
pub fn poll_routes(handlers: PollHandlers) -> Router {
    Router::new()
        .route("/", post(create_poll).get(list_public_polls))
        .route("/mine", get(list_my_polls))
        .route("/:id", get(get_poll).delete(delete_poll))
        .route("/:id/votes", post(cast_vote))
        .route("/:id/results", get(get_poll_results))
        .route("/:id/vote-status", get(get_vote_status))
        .with_state(handlers)
}
