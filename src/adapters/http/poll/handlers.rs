//! HTTP handlers for poll endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::middleware::{OptionalAuth, RequireAuth};
use crate::application::handlers::poll::{
    CastVoteCommand, CastVoteHandler, CheckVoteEligibilityHandler, CheckVoteEligibilityQuery,
    CreatePollCommand, CreatePollHandler, DeletePollCommand, DeletePollHandler, GetPollHandler,
    GetPollQuery, GetPollResultsHandler, GetPollResultsQuery, ListPollsHandler, ListPollsQuery,
};
use crate::domain::foundation::{OptionId, PollId};
use crate::domain::poll::PollError;
use crate::ports::{PollReader, PollRepository, VoteRepository};

use super::dto::{
    CastVoteRequest, CreatePollRequest, ErrorResponse, PollResponse, PollResultsResponse,
    PollSummaryResponse, VoteResponse, VoteStatusResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct PollHandlers {
    create_handler: Arc<CreatePollHandler>,
    cast_vote_handler: Arc<CastVoteHandler>,
    eligibility_handler: Arc<CheckVoteEligibilityHandler>,
    results_handler: Arc<GetPollResultsHandler>,
    delete_handler: Arc<DeletePollHandler>,
    get_handler: Arc<GetPollHandler>,
    list_handler: Arc<ListPollsHandler>,
}

impl PollHandlers {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        create_handler: Arc<CreatePollHandler>,
        cast_vote_handler: Arc<CastVoteHandler>,
        eligibility_handler: Arc<CheckVoteEligibilityHandler>,
        results_handler: Arc<GetPollResultsHandler>,
        delete_handler: Arc<DeletePollHandler>,
        get_handler: Arc<GetPollHandler>,
        list_handler: Arc<ListPollsHandler>,
    ) -> Self {
        Self {
            create_handler,
            cast_vote_handler,
            eligibility_handler,
            results_handler,
            delete_handler,
            get_handler,
            list_handler,
        }
    }

    /// Wires every poll workflow to the given persistence ports.
    pub fn from_ports(
        polls: Arc<dyn PollRepository>,
        reader: Arc<dyn PollReader>,
        votes: Arc<dyn VoteRepository>,
    ) -> Self {
        Self::new(
            Arc::new(CreatePollHandler::new(polls.clone())),
            Arc::new(CastVoteHandler::new(polls.clone(), votes.clone())),
            Arc::new(CheckVoteEligibilityHandler::new(votes)),
            Arc::new(GetPollResultsHandler::new(reader.clone())),
            Arc::new(DeletePollHandler::new(polls.clone())),
            Arc::new(GetPollHandler::new(polls)),
            Arc::new(ListPollsHandler::new(reader)),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/polls - Create a new poll
pub async fn create_poll(
    State(handlers): State<PollHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CreatePollRequest>,
) -> Response {
    let draft = match req.into_draft() {
        Ok(draft) => draft,
        Err(e) => return handle_poll_error(e),
    };

    let cmd = CreatePollCommand {
        creator: Some(user.id),
        draft,
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(poll) => (StatusCode::CREATED, Json(PollResponse::from(&poll))).into_response(),
        Err(e) => handle_poll_error(e),
    }
}

/// GET /api/polls - List public polls, newest first
pub async fn list_public_polls(State(handlers): State<PollHandlers>) -> Response {
    list(&handlers, ListPollsQuery::Public).await
}

/// GET /api/polls/mine - List the caller's own polls, newest first
pub async fn list_my_polls(
    State(handlers): State<PollHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    list(&handlers, ListPollsQuery::Mine { caller: Some(user.id) }).await
}

async fn list(handlers: &PollHandlers, query: ListPollsQuery) -> Response {
    match handlers.list_handler.handle(query).await {
        Ok(summaries) => {
            let response: Vec<PollSummaryResponse> =
                summaries.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_poll_error(e),
    }
}

/// GET /api/polls/:id - Get a poll with its options
pub async fn get_poll(
    State(handlers): State<PollHandlers>,
    Path(poll_id): Path<String>,
) -> Response {
    let poll_id = match parse_poll_id(&poll_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.get_handler.handle(GetPollQuery { poll_id }).await {
        Ok(poll) => (StatusCode::OK, Json(PollResponse::from(&poll))).into_response(),
        Err(e) => handle_poll_error(e),
    }
}

/// DELETE /api/polls/:id - Delete a poll owned by the caller
pub async fn delete_poll(
    State(handlers): State<PollHandlers>,
    RequireAuth(user): RequireAuth,
    Path(poll_id): Path<String>,
) -> Response {
    let poll_id = match parse_poll_id(&poll_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = DeletePollCommand {
        poll_id,
        caller: Some(user.id),
    };

    match handlers.delete_handler.handle(cmd).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_poll_error(e),
    }
}

/// POST /api/polls/:id/votes - Cast a vote, anonymously or as the caller
pub async fn cast_vote(
    State(handlers): State<PollHandlers>,
    OptionalAuth(user): OptionalAuth,
    Path(poll_id): Path<String>,
    Json(req): Json<CastVoteRequest>,
) -> Response {
    let poll_id = match parse_poll_id(&poll_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let option_id = match req.option_id.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => match raw.parse::<OptionId>() {
            Ok(id) => Some(id),
            Err(_) => {
                return handle_poll_error(PollError::validation(
                    "option_id",
                    "must be a valid option ID",
                ))
            }
        },
    };

    let cmd = CastVoteCommand {
        poll_id,
        option_id,
        voter: user.map(|u| u.id),
    };

    match handlers.cast_vote_handler.handle(cmd).await {
        Ok(vote) => (StatusCode::CREATED, Json(VoteResponse::from(&vote))).into_response(),
        Err(e) => handle_poll_error(e),
    }
}

/// GET /api/polls/:id/results - Vote counts per option
pub async fn get_poll_results(
    State(handlers): State<PollHandlers>,
    Path(poll_id): Path<String>,
) -> Response {
    let poll_id = match parse_poll_id(&poll_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .results_handler
        .handle(GetPollResultsQuery { poll_id })
        .await
    {
        Ok(tallies) => (
            StatusCode::OK,
            Json(PollResultsResponse::new(poll_id, tallies)),
        )
            .into_response(),
        Err(e) => handle_poll_error(e),
    }
}

/// GET /api/polls/:id/vote-status - Whether the caller already voted
pub async fn get_vote_status(
    State(handlers): State<PollHandlers>,
    OptionalAuth(user): OptionalAuth,
    Path(poll_id): Path<String>,
) -> Response {
    let poll_id = match parse_poll_id(&poll_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let query = CheckVoteEligibilityQuery {
        poll_id,
        caller: user.map(|u| u.id),
    };

    match handlers.eligibility_handler.handle(query).await {
        Ok(has_voted) => (
            StatusCode::OK,
            Json(VoteStatusResponse {
                poll_id: poll_id.to_string(),
                has_voted,
            }),
        )
            .into_response(),
        Err(e) => handle_poll_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

#[allow(clippy::result_large_err)]
fn parse_poll_id(raw: &str) -> Result<PollId, Response> {
    raw.parse::<PollId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid poll ID")),
        )
            .into_response()
    })
}

fn status_for(error: &PollError) -> StatusCode {
    match error {
        PollError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
        PollError::Unauthenticated => StatusCode::UNAUTHORIZED,
        PollError::Forbidden => StatusCode::FORBIDDEN,
        PollError::PollNotFound(_) | PollError::OptionNotFound(_) => StatusCode::NOT_FOUND,
        PollError::DuplicateVote | PollError::PollClosed => StatusCode::CONFLICT,
        PollError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn handle_poll_error(error: PollError) -> Response {
    if let PollError::Infrastructure(msg) = &error {
        tracing::error!(error = %msg, "Poll request failed");
    }
    (status_for(&error), Json(ErrorResponse::from(&error))).into_response()
}
