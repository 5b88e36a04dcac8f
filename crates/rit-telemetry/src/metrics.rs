//! Prometheus metrics for the RIT market maker.
//!
//! Provides observability for:
//! - Cycle outcomes and cycle latency
//! - Quote legs by side and venue answer
//! - Snapshot read failures
//! - Position and spread gauges
//!
//! # Panics
//!
//! Metric registration uses `unwrap()` intentionally. If registration fails,
//! it indicates a fatal configuration error (e.g., duplicate metric names)
//! that should cause an immediate crash at startup rather than silent failure.
//! These panics only occur during static initialization, never at runtime.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter, register_counter_vec, register_gauge, register_histogram,
    register_int_gauge, Counter, CounterVec, Encoder, Gauge, Histogram, IntGauge, TextEncoder,
};
use rit_core::{CycleOutcome, OrderSide, SubmitResult};

use crate::error::{TelemetryError, TelemetryResult};

/// Total cycles by outcome.
/// Labels: outcome (quoted/unprofitable/halted/snapshot_failed)
pub static CYCLES_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "rit_cycles_total",
        "Total quoting cycles by outcome",
        &["outcome"]
    )
    .unwrap()
});

/// Total quote legs by side and venue answer.
/// Labels: side (buy/sell), outcome (accepted/rejected/transport_error)
pub static QUOTE_LEGS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "rit_quote_legs_total",
        "Total quote legs submitted",
        &["side", "outcome"]
    )
    .unwrap()
});

/// Snapshot read failures.
/// Labels: kind (transport/status/decode)
pub static SNAPSHOT_ERRORS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "rit_snapshot_errors_total",
        "Total snapshot read failures",
        &["kind"]
    )
    .unwrap()
});

/// Cycles in which |position| plus the larger leg exceeded the buffered cap.
pub static OVER_LIMIT_TOTAL: Lazy<Counter> = Lazy::new(|| {
    register_counter!(
        "rit_over_limit_total",
        "Cycles in which the larger leg could breach the soft cap"
    )
    .unwrap()
});

/// Last observed net position in shares.
pub static POSITION: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!("rit_position", "Last observed net position in shares").unwrap()
});

/// Last observed spread (ask - bid).
pub static SPREAD: Lazy<Gauge> =
    Lazy::new(|| register_gauge!("rit_spread", "Last observed spread (ask - bid)").unwrap());

/// Cycle latency in milliseconds (snapshot read through last leg answer).
pub static CYCLE_LATENCY_MS: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "rit_cycle_latency_ms",
        "Cycle latency in milliseconds",
        vec![1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0, 200.0, 500.0, 1000.0, 2000.0]
    )
    .unwrap()
});

/// Metrics helper for recording.
pub struct Metrics;

impl Metrics {
    /// Record how a cycle ended.
    pub fn cycle(outcome: CycleOutcome) {
        CYCLES_TOTAL.with_label_values(&[outcome.as_str()]).inc();
    }

    /// Record the venue's answer for one leg.
    pub fn quote_leg(side: OrderSide, result: &SubmitResult) {
        QUOTE_LEGS_TOTAL
            .with_label_values(&[side.as_str(), result.label()])
            .inc();
    }

    /// Record a failed snapshot read.
    pub fn snapshot_error(kind: &str) {
        SNAPSHOT_ERRORS_TOTAL.with_label_values(&[kind]).inc();
    }

    /// Record a cycle in which a fill could breach the buffered cap.
    pub fn over_limit() {
        OVER_LIMIT_TOTAL.inc();
    }

    /// Update the position gauge.
    pub fn position(shares: i64) {
        POSITION.set(shares);
    }

    /// Update the spread gauge.
    pub fn spread(spread: f64) {
        SPREAD.set(spread);
    }

    /// Record cycle latency.
    pub fn cycle_latency(latency_ms: f64) {
        CYCLE_LATENCY_MS.observe(latency_ms);
    }

    /// Render the default registry in Prometheus text format.
    pub fn render() -> TelemetryResult<String> {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&prometheus::gather(), &mut buffer)
            .map_err(|e| TelemetryError::Metrics(e.to_string()))?;
        String::from_utf8(buffer).map_err(|e| TelemetryError::Metrics(e.to_string()))
    }
}
