//! In-memory adapters for testing and local development.

mod poll_store;

pub use poll_store::InMemoryPollStore;
