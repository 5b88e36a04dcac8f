//! Quote submission.
//!
//! Runs one decision cycle against a market snapshot:
//! 1. Position guard with `base_order_size` on both legs
//! 2. Profitability check on `ask - bid`
//! 3. One passive limit leg per allowed side, at that side's top of book
//!
//! Leg failures are logged and never retried; a failed BUY leg does not
//! stop the SELL leg. Nothing is carried over between cycles.

use rit_core::{
    CycleOutcome, DynOrderSink, MarketSnapshot, OrderSide, Price, QuoteRequest, SubmitResult,
};
use tracing::{debug, error, info, warn};

use crate::config::QuotingConfig;
use crate::guard::{GuardDecision, PositionGuard};
use crate::profitability::{ProfitabilityAssessment, ProfitabilityEvaluator};

/// Decision for one snapshot, before any I/O.
#[derive(Debug, Clone)]
pub struct QuotePlan {
    pub guard: GuardDecision,
    pub assessment: ProfitabilityAssessment,
    /// Legs to submit, BUY first. Empty when unprofitable or fully guarded.
    pub requests: Vec<QuoteRequest>,
}

/// Outcome of one submitted leg.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegReport {
    pub request: QuoteRequest,
    pub result: SubmitResult,
}

/// Everything that happened in one cycle.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub tick: i64,
    pub position: i64,
    pub guard: GuardDecision,
    pub assessment: ProfitabilityAssessment,
    pub legs: Vec<LegReport>,
}

impl CycleReport {
    /// At least one leg was attempted.
    pub fn quoted(&self) -> bool {
        !self.legs.is_empty()
    }

    pub fn accepted_count(&self) -> usize {
        self.legs.iter().filter(|l| l.result.is_accepted()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.legs.len() - self.accepted_count()
    }

    /// Metrics classification of this cycle.
    pub fn outcome(&self) -> CycleOutcome {
        if self.quoted() {
            CycleOutcome::Quoted
        } else if self.assessment.profitable {
            CycleOutcome::Halted
        } else {
            CycleOutcome::Unprofitable
        }
    }

    /// Result for `side`, if that leg was attempted.
    pub fn leg(&self, side: OrderSide) -> Option<&LegReport> {
        self.legs.iter().find(|l| l.request.side == side)
    }
}

/// Orchestrates guard, evaluator and order sink for a single instrument.
pub struct QuoteSubmitter {
    ticker: String,
    config: QuotingConfig,
    guard: PositionGuard,
    evaluator: ProfitabilityEvaluator,
    sink: DynOrderSink,
}

impl QuoteSubmitter {
    /// Create a submitter. `config` is expected to be validated already.
    pub fn new(ticker: impl Into<String>, config: QuotingConfig, sink: DynOrderSink) -> Self {
        let guard = PositionGuard::new(&config);
        let evaluator = ProfitabilityEvaluator::new(&config);
        Self {
            ticker: ticker.into(),
            config,
            guard,
            evaluator,
            sink,
        }
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn config(&self) -> &QuotingConfig {
        &self.config
    }

    /// Decide what to quote for `snapshot` without touching the venue.
    pub fn plan(&self, snapshot: &MarketSnapshot) -> QuotePlan {
        let size = self.config.order_size();
        let guard = self.guard.evaluate(snapshot.position, size);
        let spread = snapshot.spread().inner();
        let assessment = self.evaluator.assess(spread, size, size, guard.over_limit);

        let mut requests = Vec::with_capacity(2);
        if assessment.profitable {
            for (side, price) in [
                (OrderSide::Buy, snapshot.best_bid),
                (OrderSide::Sell, snapshot.best_ask),
            ] {
                if guard.allows(side) {
                    requests.push(self.build_request(side, price));
                }
            }
        }

        QuotePlan {
            guard,
            assessment,
            requests,
        }
    }

    /// Run one cycle: plan, then submit each planned leg exactly once.
    pub async fn submit_quotes(&self, snapshot: &MarketSnapshot) -> CycleReport {
        let plan = self.plan(snapshot);
        self.log_decision(snapshot, &plan);

        let mut legs = Vec::with_capacity(plan.requests.len());
        for request in plan.requests {
            let result = self.sink.submit_order(request.clone()).await;
            log_leg(&request, &result);
            legs.push(LegReport { request, result });
        }

        CycleReport {
            tick: snapshot.tick,
            position: snapshot.position,
            guard: plan.guard,
            assessment: plan.assessment,
            legs,
        }
    }

    fn build_request(&self, side: OrderSide, price: Price) -> QuoteRequest {
        QuoteRequest::limit(self.ticker.clone(), side, price, self.config.order_size())
    }

    fn log_decision(&self, snapshot: &MarketSnapshot, plan: &QuotePlan) {
        let a = &plan.assessment;
        info!(
            ticker = %self.ticker,
            tick = snapshot.tick,
            bid = %snapshot.best_bid,
            ask = %snapshot.best_ask,
            book = %snapshot.book_state(),
            spread = %a.spread,
            required = %a.required_spread,
            margin = %a.margin(),
            net_cost = %a.net_cost,
            position = snapshot.position,
            over_limit = plan.guard.over_limit,
            profitable = a.profitable,
            "Profitability decision"
        );

        if a.profitable && plan.guard.is_halted() {
            warn!(
                position = snapshot.position,
                effective_cap = %plan.guard.effective_cap,
                "Profitable but both sides blocked by position guard"
            );
        } else if a.profitable {
            debug!(
                legs = plan.requests.len(),
                allow_buy = plan.guard.allow_buy,
                allow_sell = plan.guard.allow_sell,
                "Submitting quote legs"
            );
        }
    }
}

fn log_leg(request: &QuoteRequest, result: &SubmitResult) {
    match result {
        SubmitResult::Accepted { order_id } => info!(
            side = %request.side,
            price = %request.price,
            quantity = %request.quantity,
            order_id = ?order_id,
            "Placed {} at {} for {} shares",
            request.side,
            request.price,
            request.quantity
        ),
        SubmitResult::Rejected(reason) => error!(
            side = %request.side,
            price = %request.price,
            quantity = %request.quantity,
            reason = %reason,
            "Order rejected"
        ),
        SubmitResult::TransportError(e) => warn!(
            side = %request.side,
            price = %request.price,
            error = %e,
            "Order submission failed, venue unreachable"
        ),
    }
}
