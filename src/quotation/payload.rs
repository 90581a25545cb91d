//! Decoding of the upstream provider's JSON payload.
//!
//! The provider answers with an object keyed by the concatenated pair:
//!
//! ```text
//! {"USDBRL": {"code": "USD", "codein": "BRL", "bid": "5.432", "timestamp": "1700000000", ...}}
//! ```
//!
//! Numeric fields arrive as text. Fields other than the four below are ignored.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::quotation::types::{CurrencyCode, Quotation, QuotationError};

#[derive(Debug, Deserialize)]
struct PairEntry {
    code: String,
    codein: String,
    bid: String,
    timestamp: String,
}

/// Decode a payload into the quotation for `base`/`quote`.
pub fn decode_quotation(
    body: &[u8],
    base: &CurrencyCode,
    quote: &CurrencyCode,
) -> Result<Quotation, QuotationError> {
    let mut entries: Map<String, Value> =
        serde_json::from_slice(body).map_err(|e| QuotationError::Decode(e.to_string()))?;

    let key = format!("{}{}", base, quote);
    let entry = entries
        .remove(&key)
        .ok_or(QuotationError::MissingPair(key))?;
    let entry: PairEntry =
        serde_json::from_value(entry).map_err(|e| QuotationError::Decode(e.to_string()))?;

    let code = CurrencyCode::new(&entry.code)?;
    let codein = CurrencyCode::new(&entry.codein)?;
    if &code != base || &codein != quote {
        return Err(QuotationError::Decode(format!(
            "expected {}/{}, payload carries {}/{}",
            base, quote, code, codein
        )));
    }

    Quotation::from_text(code, codein, &entry.bid, &entry.timestamp)
}
