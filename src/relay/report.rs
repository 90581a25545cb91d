//! Process-level reporting of unexpected persistence faults.
//!
//! The caller already has its response when persistence fails, so faults go
//! here instead: to the process log by default.

use crate::quotation::Quotation;
use crate::store::PersistError;

pub trait FaultReporter: Send + Sync {
    fn report(&self, fault: &PersistError, quotation: &Quotation);
}

/// Reports faults as error-level log events.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl FaultReporter for LogReporter {
    fn report(&self, fault: &PersistError, quotation: &Quotation) {
        tracing::error!(
            error = %fault,
            base = %quotation.base(),
            quote = %quotation.quote(),
            bid = quotation.bid(),
            observed_at = quotation.observed_epoch_secs(),
            "Unexpected store failure, quotation not recorded"
        );
    }
}
