//! Timeout enforcement.
//!
//! # Responsibilities
//! - Carry an absolute deadline across calls (the request's time budget)
//! - Bound a future by that deadline, cancelling it cleanly on expiry
//!
//! # Design Decisions
//! - Uses Tokio's timer facilities
//! - Deadlines are absolute: nested calls share one budget instead of
//!   stacking relative timeouts
//! - Expiry is reported as a distinct `Expired` error

use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;

/// The deadline elapsed before the operation finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("deadline exceeded")]
pub struct Expired;

/// An absolute point in time after which work is abandoned.
///
/// Deadlines are `Copy`; every holder observes the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    /// A deadline `budget` from now.
    pub fn after(budget: Duration) -> Self {
        Self {
            at: Instant::now() + budget,
        }
    }

    /// Time left before expiry, zero once expired.
    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.at
    }

    /// Resolves when the deadline passes.
    pub async fn expired(&self) {
        tokio::time::sleep_until(self.at).await
    }

    /// Run `fut` to completion unless the deadline passes first.
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output, Expired> {
        tokio::time::timeout_at(self.at, fut)
            .await
            .map_err(|_| Expired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_completes_within_deadline() {
        let deadline = Deadline::after(Duration::from_millis(500));
        let out = deadline.run(async { 42 }).await;
        assert_eq!(out, Ok(42));
        assert!(!deadline.is_expired());
    }

    #[tokio::test]
    async fn test_run_expires() {
        let deadline = Deadline::after(Duration::from_millis(20));
        let out = deadline
            .run(tokio::time::sleep(Duration::from_secs(5)))
            .await;
        assert_eq!(out, Err(Expired));
        assert!(deadline.is_expired());
        assert_eq!(deadline.remaining(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_expired_resolves() {
        let deadline = Deadline::after(Duration::from_millis(10));
        let start = Instant::now();
        deadline.expired().await;
        assert!(start.elapsed() >= Duration::from_millis(10));
    }
}
