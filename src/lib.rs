//! alx-poll - Polling service
//!
//! Authenticated users create polls with two or more options; anyone can
//! vote (anonymously or signed in) and read live per-option tallies.
//! Creators may delete their own polls.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
