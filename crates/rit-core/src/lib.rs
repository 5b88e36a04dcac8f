//! Core domain types for the RIT market maker.
//!
//! This crate provides the types shared by every other crate:
//! - `Price`, `Quantity`: precision-safe numeric types
//! - `MarketSnapshot`: per-cycle top of book, position and tick
//! - `CycleOutcome`: how a quoting cycle ended, for metrics
//! - `OrderSide`, `OrderType`, `QuoteRequest`: order legs
//! - `SnapshotSource`, `OrderSink`: venue collaborator traits

pub mod decimal;
pub mod error;
pub mod order;
pub mod types;
pub mod venue;

pub use decimal::{Price, Quantity};
pub use error::{CoreError, Result};
pub use order::{OrderSide, OrderType, QuoteRequest};
pub use types::{BookState, CycleOutcome, MarketSnapshot};
pub use venue::{
    BoxFuture, DynOrderSink, DynSnapshotSource, MockVenue, OrderSink, SnapshotSource,
    SubmitResult, VenueError, VenueResult,
};
