//! Validation pipeline for supplier shipment-notice documents.
//!
//! Raw bytes are tokenized into segments, grouped into a document model,
//! and checked by a fixed, ordered set of independent validators
//! (structure, tax identifier, product codes, submission timing,
//! transmission certificate). The result is one immutable
//! [`report::ValidationReport`].
//!
//! # Examples
//! ```rust
//! use asnval_core::catalog::ProductCatalog;
//! use asnval_core::config::{Jurisdiction, ValidationConfig};
//! use asnval_core::document::parse::FormatHint;
//! use asnval_core::pipeline::validate_document;
//! use chrono::NaiveDate;
//!
//! let config = ValidationConfig::new("WMTIN-REL100", "SHP-1", Jurisdiction::Gujarat);
//! let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
//! let (_document, report) =
//!     validate_document(b"", FormatHint::Auto, &config, &ProductCatalog::sample(), today)?;
//! # let _ = report;
//! # Ok::<(), asnval_core::Error>(())
//! ```
pub mod catalog;
pub mod config;
pub mod document;
pub mod pipeline;
pub mod report;
pub mod validators;

use thiserror::Error;

/// Top-level error wrapper for pipeline operations.
///
/// Only two things fail a run outright: configuration the pipeline must
/// not start with, and a byte stream it cannot read. Everything else is
/// a finding in the report.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Parse(#[from] document::parse::ParseError),
}

#[cfg(test)]
mod tests {
    use super::Error;
    use crate::config::ConfigError;

    #[test]
    fn error_conversions_cover_variants() {
        let err: Error = ConfigError::BlankField { field: "vendor_id" }.into();
        assert!(matches!(err, Error::Config(_)));

        let encoding = std::str::from_utf8(&[0xff, 0xfe]).expect_err("invalid utf8");
        let err: Error = crate::document::parse::ParseError::Encoding(encoding).into();
        assert!(matches!(err, Error::Parse(_)));
    }
}
