//! End-of-session statistics.
//!
//! Reads the process-wide counters back out of the Prometheus registry and
//! logs a summary when the bot stops:
//! - cycles by outcome
//! - quote legs accepted/failed per side
//! - cycle latency distribution (P50/P95/P99)
//! - last observed position and spread

use crate::error::{TelemetryError, TelemetryResult};
use crate::metrics::{
    CYCLES_TOTAL, CYCLE_LATENCY_MS, OVER_LIMIT_TOTAL, POSITION, QUOTE_LEGS_TOTAL, SPREAD,
};
use chrono::{DateTime, Utc};
use prometheus::core::Collector;
use rit_core::{CycleOutcome, OrderSide};
use serde::Serialize;
use tracing::info;

/// Leg counts for one side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LegStats {
    pub accepted: u64,
    pub rejected: u64,
    pub transport_errors: u64,
}

impl LegStats {
    pub fn failed(&self) -> u64 {
        self.rejected + self.transport_errors
    }
}

/// Session statistics snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStats {
    pub ticker: String,
    pub started_at: DateTime<Utc>,
    pub duration_secs: i64,
    pub cycles_quoted: u64,
    pub cycles_unprofitable: u64,
    pub cycles_halted: u64,
    pub cycles_snapshot_failed: u64,
    pub over_limit_cycles: u64,
    pub buy_legs: LegStats,
    pub sell_legs: LegStats,
    pub cycle_latency_p50_ms: f64,
    pub cycle_latency_p95_ms: f64,
    pub cycle_latency_p99_ms: f64,
    pub last_position: i64,
    pub last_spread: f64,
}

impl SessionStats {
    pub fn total_cycles(&self) -> u64 {
        self.cycles_quoted
            + self.cycles_unprofitable
            + self.cycles_halted
            + self.cycles_snapshot_failed
    }
}

/// Session statistics reporter.
pub struct SessionReporter {
    ticker: String,
    start_time: DateTime<Utc>,
}

impl SessionReporter {
    /// Create a reporter; the session starts now.
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            start_time: Utc::now(),
        }
    }

    /// Read current statistics from the registry.
    pub fn get_stats(&self) -> SessionStats {
        let cycles = |outcome: CycleOutcome| counter_value(&CYCLES_TOTAL, &[outcome.as_str()]);
        let (p50, p95, p99) = latency_percentiles();

        SessionStats {
            ticker: self.ticker.clone(),
            started_at: self.start_time,
            duration_secs: (Utc::now() - self.start_time).num_seconds(),
            cycles_quoted: cycles(CycleOutcome::Quoted),
            cycles_unprofitable: cycles(CycleOutcome::Unprofitable),
            cycles_halted: cycles(CycleOutcome::Halted),
            cycles_snapshot_failed: cycles(CycleOutcome::SnapshotFailed),
            over_limit_cycles: OVER_LIMIT_TOTAL.get() as u64,
            buy_legs: leg_stats(OrderSide::Buy),
            sell_legs: leg_stats(OrderSide::Sell),
            cycle_latency_p50_ms: p50,
            cycle_latency_p95_ms: p95,
            cycle_latency_p99_ms: p99,
            last_position: POSITION.get(),
            last_spread: SPREAD.get(),
        }
    }

    /// Output session statistics to logs.
    pub fn output_summary(&self) {
        let s = self.get_stats();
        let minutes = s.duration_secs / 60;
        let seconds = s.duration_secs % 60;

        info!("========== Session Summary ==========");
        info!(
            "Ticker: {} since {} ({}m {}s)",
            s.ticker,
            s.started_at.format("%Y-%m-%d %H:%M:%S UTC"),
            minutes,
            seconds
        );
        info!(
            "  Cycles: {} (quoted: {}, unprofitable: {}, halted: {}, snapshot failed: {})",
            s.total_cycles(),
            s.cycles_quoted,
            s.cycles_unprofitable,
            s.cycles_halted,
            s.cycles_snapshot_failed
        );
        info!("  Over-limit cycles: {}", s.over_limit_cycles);
        info!(
            "  BUY legs: {} accepted, {} failed",
            s.buy_legs.accepted,
            s.buy_legs.failed()
        );
        info!(
            "  SELL legs: {} accepted, {} failed",
            s.sell_legs.accepted,
            s.sell_legs.failed()
        );
        info!(
            "  Cycle latency (ms): P50={:.1}, P95={:.1}, P99={:.1}",
            s.cycle_latency_p50_ms, s.cycle_latency_p95_ms, s.cycle_latency_p99_ms
        );
        info!(
            "  Last position: {}, last spread: {:.4}",
            s.last_position, s.last_spread
        );
        info!("=====================================");
    }

    /// JSON-formatted statistics.
    pub fn to_json(&self) -> TelemetryResult<String> {
        let stats = self.get_stats();
        serde_json::to_string(&stats).map_err(|e| TelemetryError::Metrics(e.to_string()))
    }
}

fn counter_value(counter: &prometheus::CounterVec, labels: &[&str]) -> u64 {
    counter.with_label_values(labels).get() as u64
}

fn leg_stats(side: OrderSide) -> LegStats {
    let side = side.as_str();
    LegStats {
        accepted: counter_value(&QUOTE_LEGS_TOTAL, &[side, "accepted"]),
        rejected: counter_value(&QUOTE_LEGS_TOTAL, &[side, "rejected"]),
        transport_errors: counter_value(&QUOTE_LEGS_TOTAL, &[side, "transport_error"]),
    }
}

/// (p50, p95, p99) of cycle latency.
fn latency_percentiles() -> (f64, f64, f64) {
    for mf in CYCLE_LATENCY_MS.collect() {
        if let Some(m) = mf.get_metric().first() {
            let h = m.get_histogram();
            let count = h.get_sample_count();
            if count == 0 {
                return (0.0, 0.0, 0.0);
            }
            let buckets = h.get_bucket();
            return (
                percentile_from_buckets(buckets, count, 0.50),
                percentile_from_buckets(buckets, count, 0.95),
                percentile_from_buckets(buckets, count, 0.99),
            );
        }
    }
    (0.0, 0.0, 0.0)
}

/// Linear interpolation within the first bucket reaching the target rank.
///
/// The rank is rounded up and never below 1, so a percentile always lands in
/// a bucket that holds at least one sample.
fn percentile_from_buckets(
    buckets: &[prometheus::proto::Bucket],
    total_count: u64,
    percentile: f64,
) -> f64 {
    let target = ((total_count as f64 * percentile).ceil() as u64).max(1);
    let mut prev_bound = 0.0;
    let mut prev_count = 0u64;

    for bucket in buckets {
        let upper_bound = bucket.get_upper_bound();
        let cumulative_count = bucket.get_cumulative_count();

        if cumulative_count >= target {
            let bucket_count = cumulative_count - prev_count;
            if bucket_count == 0 {
                return upper_bound;
            }
            let position = (target - prev_count) as f64 / bucket_count as f64;
            return prev_bound + position * (upper_bound - prev_bound);
        }

        prev_bound = upper_bound;
        prev_count = cumulative_count;
    }

    // Target beyond the last finite bucket
    buckets.last().map(|b| b.get_upper_bound()).unwrap_or(0.0)
}
