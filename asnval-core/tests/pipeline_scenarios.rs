mod common;

use asnval_core::config::{Jurisdiction, ValidationConfig, ValidatorSet};
use asnval_core::document::parse::FormatHint;
use asnval_core::pipeline::validate_document;
use asnval_core::report::{DetailCode, ReportStatus, ValidationReport, ValidatorName};
use asnval_core::Error;

fn run(text: &str, config: &ValidationConfig) -> ValidationReport {
    let (_, report) = validate_document(
        text.as_bytes(),
        FormatHint::Auto,
        config,
        &common::catalog(),
        common::today(),
    )
    .expect("pipeline runs");
    report
}

/// One defect per checker plus a truncated envelope: three missing
/// trailer segments, a short tax identifier, a flipped product check
/// digit, a 40h submission advance, and an expired certificate.
fn broken_notice() -> String {
    common::valid_notice()
        .replace("27AAPFU0939F1ZV", "27AAPFU0939F1Z")
        .replace("12345678901231", "12345678901234")
        .replace("DTM*011*20240315*0800", "DTM*011*20240316*1400")
        .replace("CERT*VENDOR_SIGNING*20240414", "CERT*VENDOR_SIGNING*20240301")
        .replace("\nSE*10*0001", "")
        .replace("\nGE*1*905", "")
        .replace("\nIEA*1*000000905", "")
}

#[test]
fn clean_document_is_ready_with_no_findings() {
    let report = run(&common::valid_notice(), &common::config());
    assert_eq!(report.status(), ReportStatus::Ready);
    assert_eq!(report.error_count(), 0);
    assert_eq!(report.warning_count(), 0);
    assert!(report.findings().is_empty());
}

#[test]
fn broken_document_accumulates_findings_from_every_checker() {
    let report = run(&broken_notice(), &common::config());
    assert_eq!(report.status(), ReportStatus::NotReady);
    assert_eq!(report.error_count(), 6);
    assert_eq!(report.warning_count(), 1);

    let codes: Vec<_> = report.findings().iter().map(|f| f.code()).collect();
    assert_eq!(
        codes
            .iter()
            .filter(|c| **c == DetailCode::SegmentMissing)
            .count(),
        3
    );
    assert!(codes.contains(&DetailCode::TaxIdLength));
    assert!(codes.contains(&DetailCode::ProductCheckDigit));
    assert!(codes.contains(&DetailCode::SubmittedEarly));
    assert!(codes.contains(&DetailCode::CertificateExpired));
}

#[test]
fn findings_are_grouped_in_checker_registration_order() {
    let report = run(&broken_notice(), &common::config());
    let validators: Vec<ValidatorName> =
        report.findings().iter().map(|f| f.validator()).collect();
    let mut sorted = validators.clone();
    sorted.sort();
    assert_eq!(validators, sorted);
    assert_eq!(validators.first(), Some(&ValidatorName::Structure));
    assert_eq!(validators.last(), Some(&ValidatorName::Certificate));
}

#[test]
fn expiring_certificate_warns_without_blocking() {
    let text = common::valid_notice()
        .replace("CERT*VENDOR_SIGNING*20240414", "CERT*VENDOR_SIGNING*20240320");
    let report = run(&text, &common::config());
    assert!(report.is_ready());
    assert_eq!(report.error_count(), 0);
    assert_eq!(report.warning_count(), 1);
    assert_eq!(
        report.findings()[0].code(),
        DetailCode::CertificateExpiringSoon
    );
}

#[test]
fn disabling_a_checker_removes_only_its_findings() {
    let config = common::config()
        .with_enabled(ValidatorSet::all() - ValidatorSet::CERTIFICATE);
    let report = run(&broken_notice(), &config);
    assert_eq!(report.error_count(), 5);
    assert!(report
        .findings()
        .iter()
        .all(|f| f.validator() != ValidatorName::Certificate));

    let only_structure = common::config().with_enabled(ValidatorSet::STRUCTURE);
    let report = run(&broken_notice(), &only_structure);
    assert_eq!(report.error_count(), 3);
    assert!(report
        .findings()
        .iter()
        .all(|f| f.validator() == ValidatorName::Structure));
}

#[test]
fn disabling_every_checker_yields_a_ready_empty_report() {
    let config = common::config().with_enabled(ValidatorSet::empty());
    let report = run(&broken_notice(), &config);
    assert!(report.is_ready());
    assert!(report.findings().is_empty());
}

#[test]
fn repeated_runs_serialize_identically() {
    let first = serde_json::to_string(&run(&broken_notice(), &common::config()))
        .expect("serialize");
    let second = serde_json::to_string(&run(&broken_notice(), &common::config()))
        .expect("serialize");
    assert_eq!(first, second);
}

#[test]
fn report_json_carries_stable_codes_and_status() {
    let report = run(&broken_notice(), &common::config());
    let json = serde_json::to_value(&report).expect("serialize");
    assert_eq!(json["status"], "not_ready");
    assert_eq!(json["error_count"], 6);
    let codes: Vec<&str> = json["findings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["code"].as_str().unwrap())
        .collect();
    assert!(codes.contains(&"TAX_ID_LENGTH"));
    assert!(codes.contains(&"CERT_EXPIRED"));
}

#[test]
fn blank_vendor_id_fails_before_parsing() {
    let config = ValidationConfig::new("", "SHP-1", Jurisdiction::Maharashtra);
    let err = validate_document(
        b"not even a document",
        FormatHint::Auto,
        &config,
        &common::catalog(),
        common::today(),
    )
    .expect_err("config rejected");
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn undecodable_input_fails_as_a_parse_error() {
    let err = validate_document(
        &[0xff, 0xfe],
        FormatHint::Auto,
        &common::config(),
        &common::catalog(),
        common::today(),
    )
    .expect_err("parse rejected");
    assert!(matches!(err, Error::Parse(_)));
}

#[test]
fn terminated_stream_and_line_shapes_agree() {
    let lines = run(&common::valid_notice(), &common::config());
    let stream = run(&common::valid_notice().replace('\n', "~"), &common::config());
    assert_eq!(
        serde_json::to_string(&lines).unwrap(),
        serde_json::to_string(&stream).unwrap()
    );
}
