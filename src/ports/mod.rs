//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the poll workflows and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `PollRepository` - Atomic poll + options writes, lookup, cascading delete
//! - `PollReader` - Listings and on-demand result tallies
//! - `VoteRepository` - Vote inserts and the eligibility check
//!
//! ## Identity
//!
//! - `SessionValidator` - Resolves the caller from a bearer token

mod poll_reader;
mod poll_repository;
mod session_validator;
mod vote_repository;

pub use poll_reader::{PollReader, PollSummary};
pub use poll_repository::PollRepository;
pub use session_validator::SessionValidator;
pub use vote_repository::VoteRepository;
