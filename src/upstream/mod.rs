//! Upstream quote provider.

pub mod client;

use async_trait::async_trait;
use thiserror::Error;

use crate::quotation::{Quotation, QuotationError};
use crate::resilience::Deadline;

pub use client::UpstreamClient;

/// Errors from a single upstream fetch.
///
/// Everything except `DeadlineExceeded` is a fetch failure.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The caller's deadline passed before the fetch completed.
    #[error("upstream deadline exceeded")]
    DeadlineExceeded,

    /// The provider could not be reached or answered with an error status.
    #[error("upstream request failed: {0}")]
    Unreachable(String),

    /// The provider answered with a payload that is not a valid quotation.
    #[error("malformed upstream payload: {0}")]
    Malformed(#[from] QuotationError),
}

impl FetchError {
    pub fn is_deadline(&self) -> bool {
        matches!(self, FetchError::DeadlineExceeded)
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::DeadlineExceeded
        } else {
            FetchError::Unreachable(e.to_string())
        }
    }
}

/// Source of the latest quotation.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch one quotation, bounded by `deadline`.
    async fn fetch(&self, deadline: Deadline) -> Result<Quotation, FetchError>;
}
