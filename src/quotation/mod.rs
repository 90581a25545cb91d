//! Quotation domain model.

pub mod payload;
pub mod types;

pub use payload::decode_quotation;
pub use types::{CurrencyCode, Quotation, QuotationError};
