//! Configuration validation.
//!
//! Serde handles syntax; this module checks values. All errors are
//! collected so a bad config file is reported in one pass.

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::RelayConfig;
use crate::quotation::CurrencyCode;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }
    if !config.listener.path.starts_with('/') {
        errors.push(ValidationError::new("listener.path", "must start with '/'"));
    }

    match url::Url::parse(&config.upstream.url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError::new(
            "upstream.url",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new("upstream.url", e.to_string())),
    }
    if let Err(e) = CurrencyCode::new(&config.upstream.base) {
        errors.push(ValidationError::new("upstream.base", e.to_string()));
    }
    if let Err(e) = CurrencyCode::new(&config.upstream.quote) {
        errors.push(ValidationError::new("upstream.quote", e.to_string()));
    }

    if config.store.url.trim().is_empty() {
        errors.push(ValidationError::new("store.url", "must not be empty"));
    }

    let deadlines = &config.deadlines;
    if deadlines.response_ms == 0 {
        errors.push(ValidationError::new("deadlines.response_ms", "must be greater than zero"));
    }
    if deadlines.persist_ms == 0 {
        errors.push(ValidationError::new("deadlines.persist_ms", "must be greater than zero"));
    }
    if deadlines.persist_ms >= deadlines.response_ms {
        errors.push(ValidationError::new(
            "deadlines.persist_ms",
            format!(
                "must be shorter than deadlines.response_ms ({} >= {})",
                deadlines.persist_ms, deadlines.response_ms
            ),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
