//! Bounded-latency quotation relay.
//!
//! Fetches the latest quotation from a slow upstream provider, answers the
//! caller within a strict deadline and records the quotation in a store on a
//! best-effort basis, without letting the store affect response latency.

// Core subsystems
pub mod config;
pub mod http;
pub mod relay;

// Collaborators
pub mod quotation;
pub mod store;
pub mod upstream;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;
pub mod resilience;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use relay::Relay;
