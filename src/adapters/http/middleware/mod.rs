//! HTTP middleware for axum.
//!
//! - `auth` - Bearer-token middleware and caller extractors

pub mod auth;

pub use auth::{auth_middleware, AuthState, OptionalAuth, RequireAuth};
