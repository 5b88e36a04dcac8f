//! Passive market-making decision engine for a single RIT instrument.
//!
//! Provides:
//! - Position guard against a buffered soft cap
//! - Fee/rebate/fine-aware profitability check
//! - Quote submission of at most one BUY and one SELL leg per cycle
//!
//! # Architecture
//!
//! ```text
//! MarketSnapshot → QuoteSubmitter.submit_quotes()
//!                   ├─ PositionGuard: allow_buy / allow_sell / over_limit
//!                   ├─ ProfitabilityEvaluator: spread >= threshold + net cost
//!                   └─ OrderSink.submit_order() per allowed leg
//!                        ↓
//!                   CycleReport (one LegReport per attempted leg)
//! ```
//!
//! The engine holds no state between cycles.

pub mod config;
pub mod guard;
pub mod profitability;
pub mod submitter;

pub use config::QuotingConfig;
pub use guard::{evaluate_guard, GuardDecision, PositionGuard};
pub use profitability::{ProfitabilityAssessment, ProfitabilityEvaluator};
pub use submitter::{CycleReport, LegReport, QuotePlan, QuoteSubmitter};
