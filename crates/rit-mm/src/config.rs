//! Quoting limits and cost parameters.

use rit_core::{CoreError, Quantity};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Quoting configuration, fixed for the lifetime of the process.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuotingConfig {
    /// Hard exchange position limit in shares (absolute value).
    #[serde(default = "default_max_position_abs")]
    pub max_position_abs: u64,

    /// Fraction of `max_position_abs` at which we stop adding exposure.
    /// E.g. 0.9 = soft cap at 90% of the hard limit.
    #[serde(default = "default_position_buffer")]
    pub position_buffer: Decimal,

    /// Shares per leg. Every submitted leg uses exactly this size.
    #[serde(default = "default_base_order_size")]
    pub base_order_size: u64,

    /// Minimum spread (price units) a quote must clear on top of net costs.
    #[serde(default = "default_base_spread_threshold")]
    pub base_spread_threshold: Decimal,

    /// Exchange fee per executed share.
    #[serde(default = "default_fee_per_share")]
    pub fee_per_share: Decimal,

    /// Liquidity rebate per executed passive share.
    #[serde(default = "default_rebate_per_share")]
    pub rebate_per_share: Decimal,

    /// Flat penalty charged when a cycle risks breaching the soft cap.
    #[serde(default = "default_over_limit_fine")]
    pub over_limit_fine: Decimal,
}

impl Default for QuotingConfig {
    fn default() -> Self {
        Self {
            max_position_abs: default_max_position_abs(),
            position_buffer: default_position_buffer(),
            base_order_size: default_base_order_size(),
            base_spread_threshold: default_base_spread_threshold(),
            fee_per_share: default_fee_per_share(),
            rebate_per_share: default_rebate_per_share(),
            over_limit_fine: default_over_limit_fine(),
        }
    }
}

impl QuotingConfig {
    /// Soft position cap: `max_position_abs * position_buffer`.
    pub fn effective_cap(&self) -> Decimal {
        Decimal::from(self.max_position_abs) * self.position_buffer
    }

    /// Per-leg order size.
    pub fn order_size(&self) -> Quantity {
        Quantity::new(self.base_order_size)
    }

    /// Validate configuration values.
    ///
    /// Returns Err if:
    /// - max_position_abs or base_order_size is zero
    /// - position_buffer is outside (0, 1]
    /// - any money amount is negative
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.max_position_abs == 0 {
            return Err(CoreError::InvalidConfig(
                "max_position_abs must be greater than 0".to_string(),
            ));
        }

        if self.position_buffer <= Decimal::ZERO || self.position_buffer > Decimal::ONE {
            return Err(CoreError::InvalidConfig(format!(
                "position_buffer ({}) must be in (0, 1]",
                self.position_buffer
            )));
        }

        if self.base_order_size == 0 {
            return Err(CoreError::InvalidConfig(
                "base_order_size must be greater than 0".to_string(),
            ));
        }

        for (name, value) in [
            ("base_spread_threshold", self.base_spread_threshold),
            ("fee_per_share", self.fee_per_share),
            ("rebate_per_share", self.rebate_per_share),
            ("over_limit_fine", self.over_limit_fine),
        ] {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(CoreError::InvalidConfig(format!(
                    "{name} ({value}) must be non-negative"
                )));
            }
        }

        Ok(())
    }
}

fn default_max_position_abs() -> u64 {
    24_000
}
fn default_position_buffer() -> Decimal {
    Decimal::new(9, 1) // 0.9
}
fn default_base_order_size() -> u64 {
    2_100
}
fn default_base_spread_threshold() -> Decimal {
    Decimal::new(3, 2) // 0.03
}
fn default_fee_per_share() -> Decimal {
    Decimal::new(1, 2) // 0.01
}
fn default_rebate_per_share() -> Decimal {
    Decimal::new(15, 3) // 0.015
}
fn default_over_limit_fine() -> Decimal {
    Decimal::from(500)
}
