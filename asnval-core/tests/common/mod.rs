#![allow(dead_code)]
use asnval_core::catalog::ProductCatalog;
use asnval_core::config::{Jurisdiction, ValidationConfig};
use asnval_core::document::parse::{parse, FormatHint};
use asnval_core::document::ParsedDocument;
use chrono::NaiveDate;

/// Reference date all fixtures are written against.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid date")
}

pub fn config() -> ValidationConfig {
    ValidationConfig::new("WMTIN-REL100", "SHP20240315", Jurisdiction::Maharashtra)
}

pub fn catalog() -> ProductCatalog {
    ProductCatalog::sample()
}

/// A shipment notice that passes every checker: full envelope, matching
/// control numbers, Maharashtra GSTIN, catalog product with a valid
/// check digit, submission 10h before shipping, certificate expiring in
/// 30 days.
pub fn valid_notice() -> String {
    [
        "ISA*00*          *00*          *ZZ*WMTIN-REL100  *ZZ*WALMARTIN     *240314*2200*U*00401*000000905*0*P*>",
        "GS*SH*WMTIN-REL100*WALMARTIN*20240314*2200*905*X*004010",
        "ST*856*0001",
        "BSN*00*SHP20240315*20240314*2200",
        "DTM*137*20240314*2200",
        "DTM*011*20240315*0800",
        "HL*1**S",
        "REF*TJ*27AAPFU0939F1ZV",
        "LIN*1*UP*12345678901231",
        "SN1*1*10*EA",
        "CERT*VENDOR_SIGNING*20240414",
        "SE*10*0001",
        "GE*1*905",
        "IEA*1*000000905",
    ]
    .join("\n")
}

pub fn parse_notice(text: &str) -> ParsedDocument {
    parse(text.as_bytes(), FormatHint::SegmentLines).expect("parse fixture")
}
