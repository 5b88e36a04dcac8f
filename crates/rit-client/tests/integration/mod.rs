//! Integration tests for rit-client.
//!
//! These tests drive the client against an in-process mock of the RIT REST API:
//! - Snapshot reads (case, book, securities)
//! - Order submission and rejection handling
//! - A full quoting cycle through the decision engine

pub mod common;
