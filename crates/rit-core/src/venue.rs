//! Venue collaborator traits.
//!
//! The decision engine never talks HTTP directly. It reads snapshots from a
//! [`SnapshotSource`] and hands order legs to an [`OrderSink`]. This allows for:
//! - Unit testing with the in-memory [`MockVenue`]
//! - Swapping the live RIT client for a dry-run sink in observation mode

use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;

use crate::{MarketSnapshot, QuoteRequest};

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// Failure to obtain data from the venue.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VenueError {
    /// Venue unreachable (connect, timeout, I/O).
    #[error("Transport error: {0}")]
    Transport(String),

    /// Venue answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Venue answered but the payload was unusable.
    #[error("Decode error: {0}")]
    Decode(String),
}

impl VenueError {
    /// Short label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Status { .. } => "status",
            Self::Decode(_) => "decode",
        }
    }
}

pub type VenueResult<T> = Result<T, VenueError>;

/// Outcome of handing one order leg to the venue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitResult {
    /// Venue accepted the order.
    Accepted { order_id: Option<u64> },
    /// Venue declined the order (stale price, size violation, ...).
    Rejected(String),
    /// Venue could not be reached.
    TransportError(String),
}

impl SubmitResult {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitResult::Accepted { .. })
    }

    /// Label used in logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            SubmitResult::Accepted { .. } => "accepted",
            SubmitResult::Rejected(_) => "rejected",
            SubmitResult::TransportError(_) => "transport_error",
        }
    }
}

/// Supplies a fresh market snapshot each cycle.
pub trait SnapshotSource: Send + Sync {
    fn snapshot(&self) -> BoxFuture<'_, VenueResult<MarketSnapshot>>;
}

/// Accepts order legs.
pub trait OrderSink: Send + Sync {
    /// Submit one order leg. Never retried by the caller.
    fn submit_order(&self, request: QuoteRequest) -> BoxFuture<'_, SubmitResult>;
}

/// Arc wrapper for SnapshotSource trait objects.
pub type DynSnapshotSource = Arc<dyn SnapshotSource>;

/// Arc wrapper for OrderSink trait objects.
pub type DynOrderSink = Arc<dyn OrderSink>;

/// In-memory venue for tests and offline runs.
///
/// Serves a configurable snapshot and records every submitted order.
/// Submit results are popped from a script; once the script is empty
/// every order is accepted.
#[derive(Debug, Default)]
pub struct MockVenue {
    snapshot: Mutex<Option<MarketSnapshot>>,
    scripted_results: Mutex<VecDeque<SubmitResult>>,
    submissions: Mutex<Vec<QuoteRequest>>,
    snapshot_calls: AtomicU64,
}

impl MockVenue {
    /// Create a venue with no snapshot (snapshot reads fail).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a venue serving the given snapshot.
    pub fn with_snapshot(snapshot: MarketSnapshot) -> Self {
        let venue = Self::new();
        venue.set_snapshot(Some(snapshot));
        venue
    }

    /// Replace the served snapshot. `None` makes reads fail with a transport error.
    pub fn set_snapshot(&self, snapshot: Option<MarketSnapshot>) {
        *self.snapshot.lock() = snapshot;
    }

    /// Queue the result for the next submitted order.
    pub fn push_result(&self, result: SubmitResult) {
        self.scripted_results.lock().push_back(result);
    }

    /// Orders submitted so far, in submission order.
    pub fn submissions(&self) -> Vec<QuoteRequest> {
        self.submissions.lock().clone()
    }

    pub fn snapshot_calls(&self) -> u64 {
        self.snapshot_calls.load(Ordering::SeqCst)
    }
}

impl SnapshotSource for MockVenue {
    fn snapshot(&self) -> BoxFuture<'_, VenueResult<MarketSnapshot>> {
        Box::pin(async move {
            self.snapshot_calls.fetch_add(1, Ordering::SeqCst);
            self.snapshot
                .lock()
                .clone()
                .ok_or_else(|| VenueError::Transport("mock venue offline".to_string()))
        })
    }
}

impl OrderSink for MockVenue {
    fn submit_order(&self, request: QuoteRequest) -> BoxFuture<'_, SubmitResult> {
        Box::pin(async move {
            self.submissions.lock().push(request);
            self.scripted_results
                .lock()
                .pop_front()
                .unwrap_or(SubmitResult::Accepted { order_id: None })
        })
    }
}
