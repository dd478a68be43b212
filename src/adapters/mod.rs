//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Session validators (HS256 access tokens, mock)
//! - `http` - axum router, auth middleware and poll endpoints
//! - `memory` - In-memory persistence for tests and local development
//! - `postgres` - sqlx persistence against the polls schema

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
