//! Quotation relay: the per-request deadline orchestration.
//!
//! # Data Flow
//! ```text
//! request → Relay::handle
//!     → race(caller gone, response deadline, QuoteSource::fetch)
//!     → Reply to the caller
//!     → spawn persist(QuoteSink::insert) under the persistence deadline
//! ```
//!
//! # Design Decisions
//! - Two independent deadlines; the persistence one starts after the reply
//! - Persistence owns its own handles and may outlive the request
//! - No state is shared between requests

pub mod orchestrator;
pub mod outcome;
pub mod report;

pub use orchestrator::{persist, Relay};
pub use outcome::{Outcome, PersistOutcome, RelayError, Reply};
pub use report::{FaultReporter, LogReporter};
