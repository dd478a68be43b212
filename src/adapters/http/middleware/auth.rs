//! Caller identity for the poll routes.
//!
//! `auth_middleware` resolves an `Authorization: Bearer <token>` header
//! through the `SessionValidator` port and stores the caller in the request
//! extensions. Requests without a bearer token pass through as anonymous;
//! a token that fails validation stops the request, even on routes where
//! signing in is optional.
//!
//! Handlers then pick the caller up with `RequireAuth` (create, delete,
//! "my polls") or `OptionalAuth` (voting, vote status).

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use http::header;

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::SessionValidator;

/// Middleware state.
pub type AuthState = Arc<dyn SessionValidator>;

pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(request.headers()) else {
        return next.run(request).await;
    };

    match validator.validate(token).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => auth_error_response(&e),
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn error_body(status: StatusCode, code: &str, message: &str) -> Response {
    (
        status,
        Json(serde_json::json!({ "code": code, "message": message })),
    )
        .into_response()
}

fn auth_error_response(error: &AuthError) -> Response {
    match error {
        AuthError::TokenExpired => {
            error_body(StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED", "Token expired")
        }
        AuthError::InvalidToken => {
            error_body(StatusCode::UNAUTHORIZED, "INVALID_TOKEN", "Invalid token")
        }
        AuthError::ServiceUnavailable(msg) => {
            tracing::error!("Auth service unavailable: {}", msg);
            error_body(
                StatusCode::SERVICE_UNAVAILABLE,
                "AUTH_UNAVAILABLE",
                "Authentication service unavailable",
            )
        }
    }
}

/// The signed-in caller; rejects anonymous requests with 401.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(RequireAuth)
            .ok_or_else(|| {
                error_body(
                    StatusCode::UNAUTHORIZED,
                    "UNAUTHORIZED",
                    "Authentication required",
                )
            })
    }
}

/// The caller if signed in, `None` for anonymous requests.
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuth(parts.extensions.get::<AuthenticatedUser>().cloned()))
    }
}
