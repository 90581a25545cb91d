//! Deadline orchestration for one quotation request.
//!
//! # States
//! ```text
//! Start → Fetching ─┬─ caller gone      → ClientCancelled
//!                   ├─ response deadline → TimedOut (504)
//!                   ├─ fetch failed      → RelayError
//!                   └─ quotation         → Responded
//!                                              └─ spawn → Persisting ─┬─ Stored
//!                                                                     ├─ TimedOut (logged)
//!                                                                     └─ Failed (reported)
//! ```
//!
//! The first three branches race; whichever is ready first wins and no
//! further tie-break is applied. Persistence is spawned only after the reply
//! has been handed to the caller, under its own shorter deadline, and is never
//! awaited by the response path.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::config::DeadlineConfig;
use crate::observability::metrics;
use crate::quotation::Quotation;
use crate::relay::outcome::{Outcome, PersistOutcome, RelayError, Reply};
use crate::relay::report::{FaultReporter, LogReporter};
use crate::resilience::Deadline;
use crate::store::{PersistError, QuoteSink};
use crate::upstream::QuoteSource;

/// Relays quotations from a source to the caller and, best-effort, to a sink.
///
/// Cheap to clone; clones share the same collaborators.
#[derive(Clone)]
pub struct Relay {
    source: Arc<dyn QuoteSource>,
    sink: Arc<dyn QuoteSink>,
    reporter: Arc<dyn FaultReporter>,
    response_budget: Duration,
    persist_budget: Duration,
}

impl Relay {
    pub fn new(
        source: Arc<dyn QuoteSource>,
        sink: Arc<dyn QuoteSink>,
        deadlines: &DeadlineConfig,
    ) -> Self {
        Self {
            source,
            sink,
            reporter: Arc::new(LogReporter),
            response_budget: deadlines.response(),
            persist_budget: deadlines.persist(),
        }
    }

    /// Replace the fault reporter.
    pub fn with_reporter(mut self, reporter: Arc<dyn FaultReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Handle one request.
    ///
    /// `caller_gone` resolves when the caller disconnects. The reply, if any,
    /// is sent on `reply`; a closed `reply` also counts as a departed caller.
    pub async fn handle<C>(
        &self,
        caller_gone: C,
        reply: oneshot::Sender<Reply>,
    ) -> Result<Outcome, RelayError>
    where
        C: Future<Output = ()>,
    {
        let deadline = Deadline::after(self.response_budget);

        let fetched = tokio::select! {
            _ = caller_gone => {
                tracing::info!("Request terminated by caller");
                metrics::record_request("client_cancelled");
                return Ok(Outcome::ClientCancelled);
            }
            _ = deadline.expired() => None,
            result = self.source.fetch(deadline) => match result {
                Ok(quotation) => Some(quotation),
                Err(e) if e.is_deadline() => None,
                Err(e) => {
                    tracing::error!(error = %e, "Quotation fetch failed");
                    metrics::record_request("fetch_failed");
                    return Err(e.into());
                }
            },
        };

        let Some(quotation) = fetched else {
            tracing::warn!(
                budget_ms = self.response_budget.as_millis() as u64,
                "Response deadline exceeded"
            );
            metrics::record_request("deadline_exceeded");
            let _ = reply.send(Reply::DeadlineExceeded);
            return Ok(Outcome::TimedOut);
        };

        if reply.send(Reply::Quote(quotation.bid_text())).is_err() {
            tracing::info!("Caller left before the response was written");
            metrics::record_request("client_cancelled");
            return Ok(Outcome::ClientCancelled);
        }
        tracing::info!(bid = quotation.bid(), "Quotation sent");
        metrics::record_request("responded");

        Ok(Outcome::Responded {
            persistence: self.spawn_persist(quotation),
        })
    }

    fn spawn_persist(&self, quotation: Quotation) -> JoinHandle<PersistOutcome> {
        let sink = Arc::clone(&self.sink);
        let reporter = Arc::clone(&self.reporter);
        let budget = self.persist_budget;

        tokio::spawn(
            async move { persist(sink.as_ref(), reporter.as_ref(), &quotation, budget).await }
                .in_current_span(),
        )
    }
}

/// Insert `quotation` within `budget`, starting the clock now.
///
/// The deadline is enforced here as well as handed to the sink, so a sink
/// that ignores it still cannot run over.
pub async fn persist(
    sink: &dyn QuoteSink,
    reporter: &dyn FaultReporter,
    quotation: &Quotation,
    budget: Duration,
) -> PersistOutcome {
    let deadline = Deadline::after(budget);
    let result = match deadline.run(sink.insert(quotation, deadline)).await {
        Ok(result) => result,
        Err(_) => Err(PersistError::DeadlineExceeded),
    };

    let outcome = match result {
        Ok(()) => {
            tracing::info!("Quotation stored");
            PersistOutcome::Stored
        }
        Err(PersistError::DeadlineExceeded) => {
            tracing::warn!(
                budget_ms = budget.as_millis() as u64,
                "Persistence deadline exceeded, quotation dropped"
            );
            PersistOutcome::TimedOut
        }
        Err(e) => {
            reporter.report(&e, quotation);
            PersistOutcome::Failed
        }
    };
    metrics::record_persist(outcome.as_str());
    outcome
}
