//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, identity)
//! - `poll` - Poll aggregate, votes, result tallies and workflow errors

pub mod foundation;
pub mod poll;
