//! Quotation value types.

use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;

/// Reasons a quotation cannot be constructed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuotationError {
    #[error("invalid currency code '{0}'")]
    InvalidCurrency(String),

    #[error("bid '{0}' is not a decimal number")]
    InvalidBid(String),

    #[error("bid must be positive, got {0}")]
    NonPositiveBid(f32),

    #[error("timestamp '{0}' is not a valid epoch in seconds")]
    InvalidTimestamp(String),

    #[error("payload has no entry for pair {0}")]
    MissingPair(String),

    #[error("payload could not be decoded: {0}")]
    Decode(String),
}

/// A short uppercase currency code such as `USD` or `BRL`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: &str) -> Result<Self, QuotationError> {
        let valid = (2..=8).contains(&code.len())
            && code
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit());
        if valid {
            Ok(Self(code.to_string()))
        } else {
            Err(QuotationError::InvalidCurrency(code.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The latest bid for a currency pair, as observed by the upstream provider.
///
/// Fields are private; a `Quotation` only exists once its invariants hold
/// (positive finite bid, representable observation time) and cannot be
/// changed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Quotation {
    base: CurrencyCode,
    quote: CurrencyCode,
    bid: f32,
    observed_at: DateTime<Utc>,
}

impl Quotation {
    pub fn new(
        base: CurrencyCode,
        quote: CurrencyCode,
        bid: f32,
        observed_at: DateTime<Utc>,
    ) -> Result<Self, QuotationError> {
        if !bid.is_finite() {
            return Err(QuotationError::InvalidBid(bid.to_string()));
        }
        if bid <= 0.0 {
            return Err(QuotationError::NonPositiveBid(bid));
        }
        Ok(Self {
            base,
            quote,
            bid,
            observed_at,
        })
    }

    /// Build a quotation from the upstream's textual encoding: a decimal bid
    /// and an integer count of seconds since the Unix epoch.
    pub fn from_text(
        base: CurrencyCode,
        quote: CurrencyCode,
        bid: &str,
        epoch_secs: &str,
    ) -> Result<Self, QuotationError> {
        let parsed_bid: f32 = bid
            .trim()
            .parse()
            .map_err(|_| QuotationError::InvalidBid(bid.to_string()))?;
        let secs: i64 = epoch_secs
            .trim()
            .parse()
            .map_err(|_| QuotationError::InvalidTimestamp(epoch_secs.to_string()))?;
        let observed_at = DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| QuotationError::InvalidTimestamp(epoch_secs.to_string()))?;

        Self::new(base, quote, parsed_bid, observed_at)
    }

    pub fn base(&self) -> &CurrencyCode {
        &self.base
    }

    pub fn quote(&self) -> &CurrencyCode {
        &self.quote
    }

    pub fn bid(&self) -> f32 {
        self.bid
    }

    pub fn observed_at(&self) -> DateTime<Utc> {
        self.observed_at
    }

    pub fn observed_epoch_secs(&self) -> i64 {
        self.observed_at.timestamp()
    }

    /// Canonical decimal rendering of the bid: the shortest plain decimal
    /// that parses back to the same `f32`, never in exponent form.
    pub fn bid_text(&self) -> String {
        self.bid.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd() -> CurrencyCode {
        CurrencyCode::new("USD").unwrap()
    }

    fn brl() -> CurrencyCode {
        CurrencyCode::new("BRL").unwrap()
    }

    #[test]
    fn test_bid_text_matches_upstream_text() {
        let q = Quotation::from_text(usd(), brl(), "5.432", "1700000000").unwrap();
        assert_eq!(q.bid_text(), "5.432");
        assert_eq!(q.observed_epoch_secs(), 1_700_000_000);

        for text in ["4.9871", "0.0001", "1", "123456.7"] {
            let q = Quotation::from_text(usd(), brl(), text, "0").unwrap();
            assert_eq!(q.bid_text().parse::<f32>().unwrap(), text.parse::<f32>().unwrap());
            assert!(!q.bid_text().contains('e'));
        }
    }

    #[test]
    fn test_rejects_malformed_bid() {
        for bid in ["abc", "", "5,43", "NaN", "inf"] {
            assert!(
                matches!(
                    Quotation::from_text(usd(), brl(), bid, "1700000000"),
                    Err(QuotationError::InvalidBid(_))
                ),
                "bid {:?} should be rejected",
                bid
            );
        }
    }

    #[test]
    fn test_rejects_non_positive_bid() {
        assert_eq!(
            Quotation::from_text(usd(), brl(), "0", "1700000000"),
            Err(QuotationError::NonPositiveBid(0.0))
        );
        assert!(matches!(
            Quotation::from_text(usd(), brl(), "-1.5", "1700000000"),
            Err(QuotationError::NonPositiveBid(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_timestamp() {
        for ts in ["", "17e8", "1700000000.5", "yesterday", "99999999999999999999"] {
            assert!(matches!(
                Quotation::from_text(usd(), brl(), "5.1", ts),
                Err(QuotationError::InvalidTimestamp(_))
            ));
        }
    }

    #[test]
    fn test_currency_codes() {
        assert!(CurrencyCode::new("USDT").is_ok());
        assert!(CurrencyCode::new("usd").is_err());
        assert!(CurrencyCode::new("U").is_err());
        assert!(CurrencyCode::new("US D").is_err());
        assert_eq!(brl().to_string(), "BRL");
    }
}
