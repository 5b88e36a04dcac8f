//! HTTP client for the RIT client REST API.
//!
//! Reads the case tick, top of book and net position for one ticker, and
//! submits limit orders. Implements both [`SnapshotSource`] and [`OrderSink`]
//! so the bot can hand the same client to the quoting engine.

use crate::error::{ClientError, ClientResult};
use crate::types::{ApiErrorResponse, BookResponse, CaseResponse, OrderResponse, SecurityResponse};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use rit_core::{
    BoxFuture, MarketSnapshot, OrderSink, Price, QuoteRequest, SnapshotSource, SubmitResult,
    VenueError, VenueResult,
};
use rust_decimal::prelude::ToPrimitive;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, trace};

/// Default timeout for API requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// `X-API-key`, lowercased for `HeaderMap`.
const API_KEY_HEADER: &str = "x-api-key";

/// Client bound to one RIT instance and one ticker.
#[derive(Debug, Clone)]
pub struct RitClient {
    client: Client,
    base_url: String,
    ticker: String,
}

impl RitClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `base_url` - API root, e.g. `http://localhost:9999/v1`
    /// * `api_key` - sent as `X-API-key` on every request
    /// * `ticker` - the instrument this client reads and trades
    /// * `timeout` - per-request timeout
    pub fn new(
        base_url: impl Into<String>,
        api_key: &str,
        ticker: impl Into<String>,
        timeout: Duration,
    ) -> ClientResult<Self> {
        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(api_key)
            .map_err(|e| ClientError::InvalidApiKey(e.to_string()))?;
        key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key);

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let base_url: String = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            ticker: ticker.into(),
        })
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> ClientResult<T> {
        let response = self
            .client
            .get(self.url(endpoint))
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response.json::<T>().await.map_err(|e| ClientError::Decode {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })
    }

    /// Current case tick (`GET /case`).
    pub async fn fetch_tick(&self) -> ClientResult<i64> {
        let case: CaseResponse = self.get_json("case", &[]).await?;
        trace!(tick = case.tick, status = ?case.status, "Case fetched");
        Ok(case.tick)
    }

    /// Best bid and best ask (`GET /securities/book`).
    ///
    /// A book with no level on either side is reported as
    /// [`ClientError::EmptyBook`].
    pub async fn fetch_top_of_book(&self) -> ClientResult<(Price, Price)> {
        let book: BookResponse = self
            .get_json("securities/book", &[("ticker", self.ticker.as_str())])
            .await?;

        let bid = book.bids.first().ok_or_else(|| ClientError::EmptyBook {
            ticker: self.ticker.clone(),
            side: "bid",
        })?;
        let ask = book.asks.first().ok_or_else(|| ClientError::EmptyBook {
            ticker: self.ticker.clone(),
            side: "ask",
        })?;

        Ok((Price::new(bid.price), Price::new(ask.price)))
    }

    /// Net signed position in the ticker (`GET /securities`).
    pub async fn fetch_position(&self) -> ClientResult<i64> {
        let securities: Vec<SecurityResponse> = self
            .get_json("securities", &[("ticker", self.ticker.as_str())])
            .await?;

        let security = securities
            .iter()
            .find(|s| s.ticker.as_deref() == Some(self.ticker.as_str()))
            .or_else(|| securities.first())
            .ok_or_else(|| ClientError::Decode {
                endpoint: "securities".to_string(),
                reason: format!("no entry for {}", self.ticker),
            })?;

        security
            .position
            .trunc()
            .to_i64()
            .ok_or_else(|| ClientError::Decode {
                endpoint: "securities".to_string(),
                reason: format!("position {} out of range", security.position),
            })
    }

    /// Read tick, top of book and position into one snapshot.
    pub async fn fetch_snapshot(&self) -> ClientResult<MarketSnapshot> {
        let tick = self.fetch_tick().await?;
        let (best_bid, best_ask) = self.fetch_top_of_book().await?;
        let position = self.fetch_position().await?;

        debug!(
            tick,
            bid = %best_bid,
            ask = %best_ask,
            position,
            "Snapshot fetched"
        );

        Ok(MarketSnapshot::new(best_bid, best_ask, position, tick))
    }

    /// Submit a limit order (`POST /orders`).
    ///
    /// Never fails: a non-2xx reply is [`SubmitResult::Rejected`] with the
    /// venue's reason, and a failed request is [`SubmitResult::TransportError`].
    pub async fn place_order(&self, request: &QuoteRequest) -> SubmitResult {
        let response = match self
            .client
            .post(self.url("orders"))
            .query(request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return SubmitResult::TransportError(e.to_string()),
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) if status.is_success() => {
                debug!(error = %e, "Order accepted but body unreadable");
                String::new()
            }
            Err(e) => return SubmitResult::Rejected(format!("HTTP {status}: {e}")),
        };

        if status.is_success() {
            let order_id = serde_json::from_str::<OrderResponse>(&body)
                .ok()
                .and_then(|r| r.order_id);
            SubmitResult::Accepted { order_id }
        } else {
            let reason = serde_json::from_str::<ApiErrorResponse>(&body)
                .ok()
                .and_then(|e| e.reason())
                .unwrap_or(body);
            SubmitResult::Rejected(format!("HTTP {}: {}", status.as_u16(), reason))
        }
    }
}

impl SnapshotSource for RitClient {
    fn snapshot(&self) -> BoxFuture<'_, VenueResult<MarketSnapshot>> {
        Box::pin(async move { self.fetch_snapshot().await.map_err(VenueError::from) })
    }
}

impl OrderSink for RitClient {
    fn submit_order(&self, request: QuoteRequest) -> BoxFuture<'_, SubmitResult> {
        Box::pin(async move { self.place_order(&request).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client =
            RitClient::new("http://localhost:9999/v1/", "KEY", "ALGO", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9999/v1");
        assert_eq!(client.url("case"), "http://localhost:9999/v1/case");
        assert_eq!(client.ticker(), "ALGO");
    }

    #[test]
    fn test_invalid_api_key_rejected() {
        let result = RitClient::new(
            "http://localhost:9999/v1",
            "bad\nkey",
            "ALGO",
            DEFAULT_TIMEOUT,
        );
        assert!(matches!(result, Err(ClientError::InvalidApiKey(_))));
    }
}
