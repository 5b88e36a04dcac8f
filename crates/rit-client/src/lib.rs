//! REST client for the RIT (Rotman Interactive Trader) client API.
//!
//! Fetches market snapshots (tick, top of book, position) and submits limit
//! orders for a single ticker. [`RitClient`] implements the
//! [`rit_core::SnapshotSource`] and [`rit_core::OrderSink`] seams.

pub mod client;
pub mod error;
pub mod types;

pub use client::{RitClient, DEFAULT_TIMEOUT};
pub use error::{ClientError, ClientResult};
pub use types::{
    ApiErrorResponse, BookLevel, BookResponse, CaseResponse, OrderResponse, SecurityResponse,
};
