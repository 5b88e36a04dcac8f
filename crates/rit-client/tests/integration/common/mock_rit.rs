//! Mock RIT REST server for integration tests.
//!
//! Serves the subset of the client API the market maker uses:
//! - `GET /v1/case`
//! - `GET /v1/securities/book`
//! - `GET /v1/securities`
//! - `POST /v1/orders` (records query parameters)

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::{mpsc, Mutex};

pub const MOCK_API_KEY: &str = "TESTKEY";

/// Market state the mock serves.
#[derive(Debug, Clone)]
pub struct MockMarket {
    pub tick: i64,
    pub bids: Vec<f64>,
    pub asks: Vec<f64>,
    pub position: f64,
    /// Reject every order whose `action` matches.
    pub reject_action: Option<String>,
}

impl Default for MockMarket {
    fn default() -> Self {
        Self {
            tick: 1,
            bids: vec![10.0],
            asks: vec![10.5],
            position: 0.0,
            reject_action: None,
        }
    }
}

#[derive(Debug, Default)]
struct MockState {
    market: MockMarket,
    orders: Vec<HashMap<String, String>>,
    next_order_id: u64,
}

type Shared = Arc<Mutex<MockState>>;

/// A mock RIT server for testing.
pub struct MockRitServer {
    addr: SocketAddr,
    shutdown_tx: mpsc::Sender<()>,
    state: Shared,
}

impl MockRitServer {
    /// Start a new mock server on an available port.
    pub async fn start(market: MockMarket) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state: Shared = Arc::new(Mutex::new(MockState {
            market,
            ..Default::default()
        }));
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        let app = Router::new()
            .route("/v1/case", get(case))
            .route("/v1/securities/book", get(book))
            .route("/v1/securities", get(securities))
            .route("/v1/orders", post(orders))
            .with_state(state.clone());

        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.recv().await;
                })
                .await;
        });

        Self {
            addr,
            shutdown_tx,
            state,
        }
    }

    /// API root for `RitClient::new`.
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Query parameters of every order received, in arrival order.
    pub async fn received_orders(&self) -> Vec<HashMap<String, String>> {
        self.state.lock().await.orders.clone()
    }

    /// Shutdown the server.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers.get("x-api-key").and_then(|v| v.to_str().ok()) == Some(MOCK_API_KEY)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"code": "UNAUTHORIZED", "message": "API key is invalid"})),
    )
        .into_response()
}

async fn case(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let state = state.lock().await;
    Json(json!({
        "name": "ALGO1",
        "period": 1,
        "tick": state.market.tick,
        "ticks_per_period": 300,
        "total_periods": 1,
        "status": "ACTIVE",
        "is_enforce_trading_limits": true
    }))
    .into_response()
}

async fn book(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let state = state.lock().await;
    let ticker = params.get("ticker").cloned().unwrap_or_default();
    let level = |price: &f64| json!({"ticker": ticker, "price": price, "quantity": 1000});
    Json(json!({
        "bids": state.market.bids.iter().map(level).collect::<Vec<_>>(),
        "asks": state.market.asks.iter().map(level).collect::<Vec<_>>()
    }))
    .into_response()
}

async fn securities(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let state = state.lock().await;
    let ticker = params.get("ticker").cloned().unwrap_or_default();
    Json(json!([{
        "ticker": ticker,
        "type": "STOCK",
        "position": state.market.position,
        "last": 10.25
    }]))
    .into_response()
}

async fn orders(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut state = state.lock().await;
    state.orders.push(params.clone());

    let action = params.get("action").cloned().unwrap_or_default();
    if state.market.reject_action.as_deref() == Some(action.as_str()) {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({"code": "TOO_MANY_REQUESTS", "message": "Order rejected by mock"})),
        )
            .into_response();
    }

    state.next_order_id += 1;
    Json(json!({
        "order_id": state.next_order_id,
        "ticker": params.get("ticker"),
        "type": params.get("type"),
        "quantity": params.get("quantity"),
        "price": params.get("price"),
        "action": action,
        "status": "OPEN"
    }))
    .into_response()
}
