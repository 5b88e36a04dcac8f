//! Quote profitability evaluation.
//!
//! A two-sided quote is worth placing when the quoted spread covers the
//! fixed spread threshold plus the net execution cost of both legs:
//!
//! ```text
//! rebate   = (bid_size + ask_size) * rebate_per_share
//! fee      = (bid_size + ask_size) * fee_per_share + (fine if over_limit)
//! required = base_spread_threshold + (fee - rebate)
//! quote   <=> spread > 0 && spread >= required
//! ```
//!
//! The over-limit fine is charged once per cycle, not per leg.
//! Every evaluation produces a [`ProfitabilityAssessment`] so the decision
//! can be logged with all of its cost components.

use rit_core::Quantity;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::QuotingConfig;

/// Cost breakdown behind a single quote decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitabilityAssessment {
    /// Observed spread (ask - bid).
    pub spread: Decimal,
    /// Rebate earned if both legs fill passively.
    pub expected_rebate: Decimal,
    /// Fees paid if both legs fill, including any fine.
    pub expected_fee: Decimal,
    /// Fine included in `expected_fee` (zero when not over limit).
    pub fine: Decimal,
    /// expected_fee - expected_rebate. Negative when rebates dominate.
    pub net_cost: Decimal,
    /// Spread needed to quote: threshold + net_cost.
    pub required_spread: Decimal,
    /// Final verdict.
    pub profitable: bool,
}

impl ProfitabilityAssessment {
    /// Spread in excess of the requirement (negative when short).
    pub fn margin(&self) -> Decimal {
        self.spread - self.required_spread
    }
}

/// Evaluates quote profitability for fixed fee/rebate/fine parameters.
#[derive(Debug, Clone)]
pub struct ProfitabilityEvaluator {
    base_spread_threshold: Decimal,
    fee_per_share: Decimal,
    rebate_per_share: Decimal,
    over_limit_fine: Decimal,
}

impl ProfitabilityEvaluator {
    pub fn new(config: &QuotingConfig) -> Self {
        Self {
            base_spread_threshold: config.base_spread_threshold,
            fee_per_share: config.fee_per_share,
            rebate_per_share: config.rebate_per_share,
            over_limit_fine: config.over_limit_fine,
        }
    }

    /// Full cost breakdown for a candidate quote.
    ///
    /// A locked or crossed book (spread <= 0) is never profitable, even when
    /// rebates exceed fees and the cost arithmetic alone would allow it.
    pub fn assess(
        &self,
        spread: Decimal,
        bid_size: Quantity,
        ask_size: Quantity,
        over_limit: bool,
    ) -> ProfitabilityAssessment {
        let total_shares = (bid_size + ask_size).as_decimal();
        let expected_rebate = total_shares * self.rebate_per_share;
        let fine = if over_limit {
            self.over_limit_fine
        } else {
            Decimal::ZERO
        };
        let expected_fee = total_shares * self.fee_per_share + fine;
        let net_cost = expected_fee - expected_rebate;
        let required_spread = self.base_spread_threshold + net_cost;

        let profitable = spread > Decimal::ZERO && spread >= required_spread;

        ProfitabilityAssessment {
            spread,
            expected_rebate,
            expected_fee,
            fine,
            net_cost,
            required_spread,
            profitable,
        }
    }

    /// Whether quoting `spread` with the given leg sizes is profitable.
    pub fn is_profitable(
        &self,
        spread: Decimal,
        bid_size: Quantity,
        ask_size: Quantity,
        over_limit: bool,
    ) -> bool {
        self.assess(spread, bid_size, ask_size, over_limit).profitable
    }
}
