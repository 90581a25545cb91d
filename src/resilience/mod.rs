//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request arrives:
//!     → Deadline::after(response budget) bounds the upstream fetch
//! Response sent:
//!     → Deadline::after(persist budget) bounds the store insert
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - No retries: a slow upstream is answered with 504, a slow store loses the row

pub mod timeouts;

pub use timeouts::{Deadline, Expired};
