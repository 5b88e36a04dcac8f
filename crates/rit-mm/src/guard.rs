//! Position guard.
//!
//! Decides, from the current net position, which legs may be quoted and
//! whether the over-limit fine has to be priced into this cycle.
//!
//! The guard works against a soft cap (`max_position_abs * position_buffer`)
//! so that quoting stops before the exchange-enforced hard limit is reached.

use rit_core::{OrderSide, Quantity};
use rust_decimal::Decimal;

use crate::config::QuotingConfig;

/// Result of a guard evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardDecision {
    /// Buying permitted: position below the long soft cap.
    pub allow_buy: bool,
    /// Selling permitted: position above the short soft cap.
    pub allow_sell: bool,
    /// Placing the larger leg could push |position| past the soft cap.
    pub over_limit: bool,
    /// Soft cap used for this decision.
    pub effective_cap: Decimal,
}

impl GuardDecision {
    /// Whether a leg on `side` may be quoted.
    pub fn allows(&self, side: OrderSide) -> bool {
        match side {
            OrderSide::Buy => self.allow_buy,
            OrderSide::Sell => self.allow_sell,
        }
    }

    /// Both sides blocked.
    pub fn is_halted(&self) -> bool {
        !self.allow_buy && !self.allow_sell
    }
}

/// Evaluate the position guard.
///
/// # Arguments
/// * `position` - Signed net position in shares
/// * `buy_size` / `sell_size` - Candidate leg sizes
/// * `max_position_abs` - Hard position limit
/// * `position_buffer` - Soft cap fraction in (0, 1]
///
/// Over-limit is judged against the larger of the two legs, whichever
/// side ends up filling.
pub fn evaluate_guard(
    position: i64,
    buy_size: Quantity,
    sell_size: Quantity,
    max_position_abs: u64,
    position_buffer: Decimal,
) -> GuardDecision {
    let effective_cap = Decimal::from(max_position_abs) * position_buffer;
    let position = Decimal::from(position);
    let largest_leg = buy_size.max(sell_size).as_decimal();

    GuardDecision {
        allow_buy: position < effective_cap,
        allow_sell: position > -effective_cap,
        over_limit: position.abs() + largest_leg > effective_cap,
        effective_cap,
    }
}

/// Position guard bound to a quoting configuration.
#[derive(Debug, Clone)]
pub struct PositionGuard {
    max_position_abs: u64,
    position_buffer: Decimal,
}

impl PositionGuard {
    pub fn new(config: &QuotingConfig) -> Self {
        Self {
            max_position_abs: config.max_position_abs,
            position_buffer: config.position_buffer,
        }
    }

    /// Evaluate with the same candidate size on both legs.
    pub fn evaluate(&self, position: i64, candidate_size: Quantity) -> GuardDecision {
        evaluate_guard(
            position,
            candidate_size,
            candidate_size,
            self.max_position_abs,
            self.position_buffer,
        )
    }
}
