//! RIT REST API payloads.
//!
//! Only the fields the market maker reads are modelled; everything else in
//! the responses is ignored.

use rust_decimal::Decimal;
use serde::Deserialize;

/// `GET /case`.
#[derive(Debug, Clone, Deserialize)]
pub struct CaseResponse {
    pub tick: i64,
    #[serde(default)]
    pub period: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
}

/// One price level of `GET /securities/book`.
#[derive(Debug, Clone, Deserialize)]
pub struct BookLevel {
    pub price: Decimal,
    #[serde(default)]
    pub quantity: Option<Decimal>,
}

/// `GET /securities/book?ticker=...`. Levels arrive best-first.
#[derive(Debug, Clone, Deserialize)]
pub struct BookResponse {
    #[serde(default)]
    pub bids: Vec<BookLevel>,
    #[serde(default)]
    pub asks: Vec<BookLevel>,
}

/// One entry of `GET /securities?ticker=...`.
#[derive(Debug, Clone, Deserialize)]
pub struct SecurityResponse {
    #[serde(default)]
    pub ticker: Option<String>,
    /// Net position; RIT reports it as a JSON number (possibly `2100.0`).
    pub position: Decimal,
}

/// Success body of `POST /orders`.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderResponse {
    #[serde(default)]
    pub order_id: Option<u64>,
}

/// Error body RIT returns alongside non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorResponse {
    /// Human-readable reason, preferring `message` over `code`.
    pub fn reason(&self) -> Option<String> {
        self.message.clone().or_else(|| self.code.clone())
    }
}
