//! Order-related types.
//!
//! Provides order side, order type, and the transient quote request
//! handed to the order sink.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Price, Quantity};

/// Order side: buy or sell.
///
/// Serialises as RIT's `action` parameter (`BUY` / `SELL`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    /// Lowercase label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order type. Only passive limit orders are ever sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    #[default]
    Limit,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Limit => write!(f, "LIMIT"),
        }
    }
}

/// A single passive order leg, ready for the order sink.
///
/// Built per cycle and dropped once the sink has answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub ticker: String,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub quantity: Quantity,
    pub price: Price,
    #[serde(rename = "action")]
    pub side: OrderSide,
}

impl QuoteRequest {
    /// Create a limit order leg.
    pub fn limit(
        ticker: impl Into<String>,
        side: OrderSide,
        price: Price,
        quantity: Quantity,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            order_type: OrderType::Limit,
            quantity,
            price,
            side,
        }
    }
}

impl fmt::Display for QuoteRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} @ {}",
            self.side, self.order_type, self.quantity, self.ticker, self.price
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_order_side_labels() {
        assert_eq!(OrderSide::Buy.as_str(), "buy");
        assert_eq!(OrderSide::Sell.to_string(), "sell");
    }

    #[test]
    fn test_limit_request() {
        let req = QuoteRequest::limit(
            "ALGO",
            OrderSide::Buy,
            Price::new(dec!(10.00)),
            Quantity::new(2100),
        );

        assert_eq!(req.order_type, OrderType::Limit);
        assert_eq!(req.quantity.shares(), 2100);
        assert_eq!(req.to_string(), "buy LIMIT 2100 ALGO @ 10.00");
    }
}
