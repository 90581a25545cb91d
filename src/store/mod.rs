//! Persistent store for fetched quotations.

pub mod writer;

use async_trait::async_trait;
use thiserror::Error;

use crate::quotation::Quotation;
use crate::resilience::Deadline;

pub use writer::PostgresStore;

/// Errors from a single store insert.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The persistence deadline passed before the insert completed.
    #[error("store deadline exceeded")]
    DeadlineExceeded,

    /// Connection or statement failure.
    #[error("store write failed: {0}")]
    WriteFailed(String),
}

impl From<tokio_postgres::Error> for PersistError {
    fn from(e: tokio_postgres::Error) -> Self {
        PersistError::WriteFailed(e.to_string())
    }
}

/// Sink receiving one row per successfully fetched quotation.
///
/// Implementations perform the mechanical insert only; the quotation has
/// already been validated.
#[async_trait]
pub trait QuoteSink: Send + Sync {
    async fn insert(&self, quotation: &Quotation, deadline: Deadline) -> Result<(), PersistError>;
}
