//! Market data types.
//!
//! Contains the per-cycle market snapshot (top of book, position, tick)
//! and the book state classification used when logging decisions.

use crate::Price;
use serde::{Deserialize, Serialize};

/// Top-of-book state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookState {
    /// Ask strictly above bid.
    Normal,
    /// Ask equals bid.
    Locked,
    /// Ask below bid.
    Crossed,
}

impl std::fmt::Display for BookState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Locked => write!(f, "LOCKED"),
            Self::Crossed => write!(f, "CROSSED"),
        }
    }
}

/// Everything the decision engine needs for one cycle.
///
/// Produced fresh by the snapshot source each cycle and never
/// mutated or persisted afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Best (highest) bid price.
    pub best_bid: Price,
    /// Best (lowest) ask price.
    pub best_ask: Price,
    /// Signed net position in shares (positive = long).
    pub position: i64,
    /// Exchange case tick at read time.
    pub tick: i64,
}

impl MarketSnapshot {
    pub fn new(best_bid: Price, best_ask: Price, position: i64, tick: i64) -> Self {
        Self {
            best_bid,
            best_ask,
            position,
            tick,
        }
    }

    /// Calculate spread: ask - bid. Negative on a crossed book.
    pub fn spread(&self) -> Price {
        self.best_ask - self.best_bid
    }

    pub fn book_state(&self) -> BookState {
        match self.best_ask.cmp(&self.best_bid) {
            std::cmp::Ordering::Greater => BookState::Normal,
            std::cmp::Ordering::Equal => BookState::Locked,
            std::cmp::Ordering::Less => BookState::Crossed,
        }
    }
}

/// How a quoting cycle ended. Used as a metrics label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CycleOutcome {
    /// At least one leg was sent to the order sink.
    Quoted,
    /// Spread did not clear the required threshold.
    Unprofitable,
    /// Profitable, but the position guard blocked both sides.
    Halted,
    /// No snapshot could be read; the cycle was skipped.
    SnapshotFailed,
}

impl CycleOutcome {
    pub const ALL: [CycleOutcome; 4] = [
        Self::Quoted,
        Self::Unprofitable,
        Self::Halted,
        Self::SnapshotFailed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quoted => "quoted",
            Self::Unprofitable => "unprofitable",
            Self::Halted => "halted",
            Self::SnapshotFailed => "snapshot_failed",
        }
    }
}

impl std::fmt::Display for CycleOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn snapshot(bid: rust_decimal::Decimal, ask: rust_decimal::Decimal) -> MarketSnapshot {
        MarketSnapshot::new(Price::new(bid), Price::new(ask), 0, 1)
    }

    #[test]
    fn test_spread() {
        let snap = snapshot(dec!(10.00), dec!(10.05));
        assert_eq!(snap.spread().inner(), dec!(0.05));
        assert_eq!(snap.book_state(), BookState::Normal);
    }

    #[test]
    fn test_locked_book() {
        let snap = snapshot(dec!(10.00), dec!(10.00));
        assert!(snap.spread().is_zero());
        assert_eq!(snap.book_state(), BookState::Locked);
    }

    #[test]
    fn test_crossed_book_negative_spread() {
        let snap = snapshot(dec!(10.05), dec!(10.00));
        assert_eq!(snap.spread().inner(), dec!(-0.05));
        assert_eq!(snap.book_state(), BookState::Crossed);
    }

    #[test]
    fn test_snapshot_is_plain_data() {
        // Same readings give the same snapshot, whenever they were taken.
        let first = snapshot(dec!(10.00), dec!(10.05));
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = snapshot(dec!(10.00), dec!(10.05));
        assert_eq!(first, second);
    }

    #[test]
    fn test_cycle_outcome_labels_unique() {
        let labels: std::collections::HashSet<_> =
            CycleOutcome::ALL.iter().map(|o| o.as_str()).collect();
        assert_eq!(labels.len(), CycleOutcome::ALL.len());
        assert_eq!(CycleOutcome::SnapshotFailed.to_string(), "snapshot_failed");
    }
}
