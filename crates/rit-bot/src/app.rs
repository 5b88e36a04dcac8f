//! Main application orchestration.
//!
//! Drives the quoting loop:
//! - read a snapshot (tick, top of book, position)
//! - run the decision engine and submit allowed legs
//! - record metrics, sleep, repeat until shutdown
//!
//! Shutdown is only observed while sleeping between cycles, so a cycle in
//! flight always finishes its submissions.

use crate::config::{AppConfig, OperatingMode};
use crate::error::AppResult;
use crate::metrics_server;
use crate::sink::ObservationSink;
use rit_client::RitClient;
use rit_core::{CycleOutcome, DynOrderSink, DynSnapshotSource};
use rit_mm::{CycleReport, QuoteSubmitter};
use rit_telemetry::{Metrics, SessionReporter};
use rust_decimal::prelude::ToPrimitive;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Main application.
pub struct Application {
    config: AppConfig,
    source: DynSnapshotSource,
    submitter: QuoteSubmitter,
    session: SessionReporter,
    cycle_count: u64,
}

impl Application {
    /// Create the application against the configured RIT endpoint.
    ///
    /// In observation mode snapshots still come from RIT but orders go to an
    /// [`ObservationSink`].
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let client = Arc::new(RitClient::new(
            config.base_url.clone(),
            &config.api_key,
            config.ticker.clone(),
            config.request_timeout(),
        )?);

        let sink: DynOrderSink = match config.mode {
            OperatingMode::Observation => Arc::new(ObservationSink::new()),
            OperatingMode::Trading => client.clone(),
        };

        Ok(Self::with_venue(config, client, sink))
    }

    /// Create the application with explicit collaborators.
    pub fn with_venue(config: AppConfig, source: DynSnapshotSource, sink: DynOrderSink) -> Self {
        let submitter = QuoteSubmitter::new(config.ticker.clone(), config.quoting.clone(), sink);
        let session = SessionReporter::new(config.ticker.clone());
        Self {
            config,
            source,
            submitter,
            session,
            cycle_count: 0,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Cycles run so far, including skipped ones.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    /// Run one cycle. A failed snapshot read skips the cycle.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let started = Instant::now();
        self.cycle_count += 1;

        let snapshot = match self.source.snapshot().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(
                    cycle = self.cycle_count,
                    kind = e.kind(),
                    error = %e,
                    "Snapshot read failed, skipping cycle"
                );
                Metrics::snapshot_error(e.kind());
                Metrics::cycle(CycleOutcome::SnapshotFailed);
                return CycleOutcome::SnapshotFailed;
            }
        };

        Metrics::position(snapshot.position);
        Metrics::spread(snapshot.spread().inner().to_f64().unwrap_or_default());

        let report = self.submitter.submit_quotes(&snapshot).await;
        record_report(&report);

        let outcome = report.outcome();
        let latency_ms = started.elapsed().as_secs_f64() * 1000.0;
        Metrics::cycle(outcome);
        Metrics::cycle_latency(latency_ms);

        debug!(
            cycle = self.cycle_count,
            tick = report.tick,
            outcome = %outcome,
            legs = report.legs.len(),
            latency_ms,
            "Cycle complete"
        );

        outcome
    }

    /// Run cycles until `shutdown` resolves, then log the session summary.
    pub async fn run_until<F>(mut self, shutdown: F) -> AppResult<()>
    where
        F: Future<Output = ()>,
    {
        info!(
            mode = ?self.config.mode,
            ticker = %self.config.ticker,
            base_url = %self.config.base_url,
            cycle_delay_ms = self.config.cycle_delay_ms,
            "Starting quoting loop"
        );

        let delay: Duration = self.config.cycle_delay();
        tokio::pin!(shutdown);

        loop {
            self.run_cycle().await;

            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = &mut shutdown => {
                    info!("Shutdown signal received");
                    break;
                }
            }
        }

        info!(cycles = self.cycle_count, "Shutting down");
        self.session.output_summary();
        Ok(())
    }

    /// Run until Ctrl-C, serving metrics if enabled.
    pub async fn run(self) -> AppResult<()> {
        let metrics_handle = if self.config.telemetry.metrics_enabled {
            let listener = metrics_server::bind(self.config.telemetry.metrics_port).await?;
            Some(tokio::spawn(async move {
                if let Err(e) = metrics_server::serve(listener).await {
                    warn!(error = %e, "Metrics endpoint stopped");
                }
            }))
        } else {
            None
        };

        let result = self
            .run_until(async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    warn!(error = %e, "Failed to listen for Ctrl-C, stopping");
                }
            })
            .await;

        if let Some(handle) = metrics_handle {
            handle.abort();
        }

        result
    }
}

fn record_report(report: &CycleReport) {
    if report.guard.over_limit {
        Metrics::over_limit();
    }
    for leg in &report.legs {
        Metrics::quote_leg(leg.request.side, &leg.result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rit_core::{MarketSnapshot, MockVenue, OrderSide, Price, SubmitResult};
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn app_with(venue: Arc<MockVenue>) -> Application {
        let config = AppConfig {
            cycle_delay_ms: 5,
            ..Default::default()
        };
        Application::with_venue(config, venue.clone(), venue)
    }

    fn snapshot(position: i64) -> MarketSnapshot {
        MarketSnapshot::new(Price::new(dec!(10.00)), Price::new(dec!(10.05)), position, 7)
    }

    #[tokio::test]
    async fn test_cycle_quotes_both_sides_when_flat() {
        let venue = Arc::new(MockVenue::with_snapshot(snapshot(0)));
        let mut app = app_with(venue.clone());

        let outcome = app.run_cycle().await;

        assert_eq!(outcome, CycleOutcome::Quoted);
        let sent = venue.submissions();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].side, OrderSide::Buy);
        assert_eq!(sent[1].side, OrderSide::Sell);
        assert_eq!(app.cycle_count(), 1);
    }

    #[tokio::test]
    async fn test_snapshot_failure_skips_cycle() {
        let venue = Arc::new(MockVenue::new());
        let mut app = app_with(venue.clone());

        let outcome = app.run_cycle().await;

        assert_eq!(outcome, CycleOutcome::SnapshotFailed);
        assert!(venue.submissions().is_empty());
        assert_eq!(app.cycle_count(), 1);
    }

    #[tokio::test]
    async fn test_recovers_after_snapshot_failure() {
        let venue = Arc::new(MockVenue::new());
        let mut app = app_with(venue.clone());

        assert_eq!(app.run_cycle().await, CycleOutcome::SnapshotFailed);
        venue.set_snapshot(Some(snapshot(0)));
        assert_eq!(app.run_cycle().await, CycleOutcome::Quoted);
        assert_eq!(venue.submissions().len(), 2);
    }

    #[tokio::test]
    async fn test_over_limit_cycle_is_unprofitable() {
        let venue = Arc::new(MockVenue::with_snapshot(snapshot(22_000)));
        let mut app = app_with(venue.clone());

        assert_eq!(app.run_cycle().await, CycleOutcome::Unprofitable);
        assert!(venue.submissions().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_leg_does_not_stop_loop() {
        let venue = Arc::new(MockVenue::with_snapshot(snapshot(0)));
        venue.push_result(SubmitResult::Rejected("rate limited".to_string()));
        let mut app = app_with(venue.clone());

        assert_eq!(app.run_cycle().await, CycleOutcome::Quoted);
        assert_eq!(app.run_cycle().await, CycleOutcome::Quoted);
        assert_eq!(venue.submissions().len(), 4);
    }

    #[tokio::test]
    async fn test_run_until_stops_on_shutdown() {
        let venue = Arc::new(MockVenue::with_snapshot(snapshot(0)));
        let app = app_with(venue.clone());
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();

        let handle = tokio::spawn(app.run_until(async {
            let _ = rx.await;
        }));

        tokio::time::sleep(Duration::from_millis(50)).await;
        tx.send(()).unwrap();

        let result = tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .expect("loop should stop")
            .unwrap();
        assert!(result.is_ok());
        assert!(venue.snapshot_calls() >= 1);
        // Every cycle that started finished both legs
        assert_eq!(venue.submissions().len() as u64, venue.snapshot_calls() * 2);
    }

    #[tokio::test]
    async fn test_shutdown_before_start_still_runs_one_cycle() {
        let venue = Arc::new(MockVenue::with_snapshot(snapshot(0)));
        let app = app_with(venue.clone());

        app.run_until(async {}).await.unwrap();

        assert_eq!(venue.snapshot_calls(), 1);
        assert_eq!(venue.submissions().len(), 2);
    }

    #[tokio::test]
    async fn test_observation_mode_never_touches_venue_orders() {
        let venue = Arc::new(MockVenue::with_snapshot(snapshot(0)));
        let sink = Arc::new(ObservationSink::new());
        let config = AppConfig::default();
        let mut app = Application::with_venue(config, venue.clone(), sink.clone());

        assert_eq!(app.run_cycle().await, CycleOutcome::Quoted);
        assert!(venue.submissions().is_empty());
        assert_eq!(sink.observed().len(), 2);
    }

    /// Minimal RIT endpoint: flat position, 10.00/10.05 book, counts orders.
    async fn start_rit_stub(orders: Arc<AtomicUsize>) -> (String, tokio::task::JoinHandle<()>) {
        use axum::extract::State;
        use axum::http::header;
        use axum::routing::{get, post};
        use axum::Router;

        const JSON: [(header::HeaderName, &str); 1] =
            [(header::CONTENT_TYPE, "application/json")];

        async fn place(
            State(orders): State<Arc<AtomicUsize>>,
        ) -> impl axum::response::IntoResponse {
            let id = orders.fetch_add(1, Ordering::SeqCst) + 1;
            (JSON, format!(r#"{{"order_id":{id}}}"#))
        }

        let router = Router::new()
            .route("/v1/case", get(|| async { (JSON, r#"{"tick":3,"status":"ACTIVE"}"#) }))
            .route(
                "/v1/securities/book",
                get(|| async {
                    (
                        JSON,
                        r#"{"bids":[{"price":10.00,"quantity":1000}],"asks":[{"price":10.05,"quantity":1000}]}"#,
                    )
                }),
            )
            .route(
                "/v1/securities",
                get(|| async { (JSON, r#"[{"ticker":"ALGO","position":0}]"#) }),
            )
            .route("/v1/orders", post(place))
            .with_state(orders);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        (format!("http://{addr}/v1"), handle)
    }

    #[tokio::test]
    async fn test_trading_mode_sends_orders_to_rit() {
        let orders = Arc::new(AtomicUsize::new(0));
        let (base_url, server) = start_rit_stub(orders.clone()).await;
        let config = AppConfig {
            mode: OperatingMode::Trading,
            base_url,
            api_key: "KEY".to_string(),
            ..Default::default()
        };
        let mut app = Application::new(config).unwrap();

        assert_eq!(app.run_cycle().await, CycleOutcome::Quoted);
        assert_eq!(orders.load(Ordering::SeqCst), 2);

        server.abort();
    }

    #[tokio::test]
    async fn test_observation_mode_reads_rit_but_sends_nothing() {
        let orders = Arc::new(AtomicUsize::new(0));
        let (base_url, server) = start_rit_stub(orders.clone()).await;
        let config = AppConfig {
            base_url,
            ..Default::default()
        };
        let mut app = Application::new(config).unwrap();
        assert!(app.config().is_observation_mode());

        assert_eq!(app.run_cycle().await, CycleOutcome::Quoted);
        assert_eq!(orders.load(Ordering::SeqCst), 0);

        server.abort();
    }
}
