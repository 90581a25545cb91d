//! Outcome types of one relayed request.

use thiserror::Error;
use tokio::task::JoinHandle;

use crate::upstream::FetchError;

/// What the caller is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// The bid, canonically formatted; this is the whole response body.
    Quote(String),
    /// The response deadline passed before a quotation was available.
    DeadlineExceeded,
}

/// How the response race ended.
#[derive(Debug)]
pub enum Outcome {
    /// The bid was handed to the caller; persistence runs detached.
    Responded {
        persistence: JoinHandle<PersistOutcome>,
    },
    /// The caller went away first. Nothing was written or persisted.
    ClientCancelled,
    /// The response deadline fired first. Nothing was persisted.
    TimedOut,
}

/// Result of the detached persistence attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    Stored,
    TimedOut,
    Failed,
}

impl PersistOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            PersistOutcome::Stored => "ok",
            PersistOutcome::TimedOut => "timeout",
            PersistOutcome::Failed => "failed",
        }
    }
}

/// Unrecoverable failure of the current request.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("quotation fetch failed: {0}")]
    Fetch(#[from] FetchError),
}
