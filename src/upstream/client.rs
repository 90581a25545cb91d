//! HTTP client for the upstream quote provider.
//!
//! # Responsibilities
//! - Issue one GET for the latest quotation of the configured pair
//! - Decode and validate the payload into a `Quotation`
//! - Stay within the caller's deadline; no timeout or retry of its own

use async_trait::async_trait;
use std::time::Instant;

use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::quotation::{decode_quotation, CurrencyCode, Quotation, QuotationError};
use crate::resilience::Deadline;
use crate::upstream::{FetchError, QuoteSource};

/// Upstream client backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    url: String,
    base: CurrencyCode,
    quote: CurrencyCode,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, QuotationError> {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Use a preconfigured `reqwest` client (proxies, TLS roots).
    pub fn with_client(http: reqwest::Client, config: &UpstreamConfig) -> Result<Self, QuotationError> {
        Ok(Self {
            http,
            url: config.url.clone(),
            base: CurrencyCode::new(&config.base)?,
            quote: CurrencyCode::new(&config.quote)?,
        })
    }

    async fn request(&self) -> Result<Quotation, FetchError> {
        let response = self.http.get(&self.url).send().await?.error_for_status()?;
        let body = response.bytes().await?;
        let quotation = decode_quotation(&body, &self.base, &self.quote)?;
        Ok(quotation)
    }
}

#[async_trait]
impl QuoteSource for UpstreamClient {
    async fn fetch(&self, deadline: Deadline) -> Result<Quotation, FetchError> {
        tracing::debug!(url = %self.url, budget = ?deadline.remaining(), "Upstream request started");
        let started = Instant::now();

        let result = match deadline.run(self.request()).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::DeadlineExceeded),
        };
        metrics::record_fetch(started);

        match &result {
            Ok(q) => tracing::debug!(
                base = %q.base(),
                quote = %q.quote(),
                bid = q.bid(),
                observed_at = %q.observed_at(),
                "Upstream request finished"
            ),
            Err(e) => tracing::debug!(error = %e, "Upstream request failed"),
        }
        result
    }
}
