//! Observation-mode order sink.

use parking_lot::Mutex;
use rit_core::{BoxFuture, OrderSink, QuoteRequest, SubmitResult};
use tracing::info;

/// Logs every leg instead of sending it, and reports it as accepted.
///
/// Lets the full decision loop run against live snapshots without ever
/// placing an order.
#[derive(Debug, Default)]
pub struct ObservationSink {
    observed: Mutex<Vec<QuoteRequest>>,
}

impl ObservationSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Legs seen so far.
    pub fn observed(&self) -> Vec<QuoteRequest> {
        self.observed.lock().clone()
    }
}

impl OrderSink for ObservationSink {
    fn submit_order(&self, request: QuoteRequest) -> BoxFuture<'_, SubmitResult> {
        Box::pin(async move {
            info!(
                side = %request.side,
                price = %request.price,
                quantity = %request.quantity,
                "[observation] would place {}",
                request
            );
            self.observed.lock().push(request);
            SubmitResult::Accepted { order_id: None }
        })
    }
}
