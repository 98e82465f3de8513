mod common;

use asnval_core::report::{DetailCode, Severity, ValidatorName};
use asnval_core::validators::{RunContext, StructureValidator, Validator};

fn run(text: &str) -> Vec<asnval_core::report::Finding> {
    let config = common::config();
    let catalog = common::catalog();
    let ctx = RunContext::new(&config, &catalog, common::today());
    StructureValidator.run(&common::parse_notice(text), &ctx)
}

#[test]
fn clean_notice_produces_no_findings() {
    assert!(run(&common::valid_notice()).is_empty());
}

#[test]
fn empty_document_reports_every_required_segment() {
    let findings = run("");
    let missing: Vec<_> = findings
        .iter()
        .filter(|f| f.code() == DetailCode::SegmentMissing)
        .filter_map(|f| f.segment().map(|s| s.tag.clone()))
        .collect();
    assert_eq!(
        missing,
        vec!["ISA", "GS", "ST", "BSN", "HL", "SE", "GE", "IEA"]
    );
    assert!(findings.iter().all(|f| f.severity() == Severity::Error));
    assert!(findings
        .iter()
        .all(|f| f.validator() == ValidatorName::Structure));
}

#[test]
fn missing_trailer_is_one_finding_not_a_halt() {
    let text = common::valid_notice().replace("IEA*1*000000905", "");
    let findings = run(&text);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].code(), DetailCode::SegmentMissing);
    assert_eq!(findings[0].segment().map(|s| s.tag.as_str()), Some("IEA"));
    assert!(findings[0].segment().unwrap().position.is_none());
}

#[test]
fn control_number_mismatch_is_an_error_at_the_trailer() {
    let text = common::valid_notice().replace("IEA*1*000000905", "IEA*1*000000999");
    let findings = run(&text);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].code(), DetailCode::ControlNumberMismatch);
    assert_eq!(findings[0].severity(), Severity::Error);
    let segment = findings[0].segment().expect("trailer reference");
    assert_eq!(segment.tag, "IEA");
    assert_eq!(segment.position, Some(13));
}

#[test]
fn short_envelope_header_is_flagged() {
    let text = common::valid_notice().replace(
        "ISA*00*          *00*          *ZZ*WMTIN-REL100  *ZZ*WALMARTIN     *240314*2200*U*00401*000000905*0*P*>",
        "ISA*00*WMTIN-REL100*000000905",
    );
    let findings = run(&text);
    assert!(findings
        .iter()
        .any(|f| f.code() == DetailCode::EnvelopeFieldCount));
}

#[test]
fn wrong_transaction_type_is_flagged() {
    let text = common::valid_notice().replace("ST*856*0001", "ST*850*0001");
    let findings = run(&text);
    // The SE control number still matches because the ST kept its number.
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].code(), DetailCode::TransactionTypeInvalid);
}

#[test]
fn line_item_defects_point_at_their_segments() {
    let text = common::valid_notice()
        .replace("LIN*1*UP*12345678901231", "LIN*1*UP*")
        .replace("SN1*1*10*EA", "SN1*1**EA");
    let findings = run(&text);
    let codes: Vec<_> = findings.iter().map(|f| f.code()).collect();
    assert!(codes.contains(&DetailCode::LineItemIdentifierMissing));
    assert!(codes.contains(&DetailCode::LineItemQuantityMissing));

    let identifier = findings
        .iter()
        .find(|f| f.code() == DetailCode::LineItemIdentifierMissing)
        .unwrap();
    assert_eq!(identifier.segment().unwrap().position, Some(8));
    let quantity = findings
        .iter()
        .find(|f| f.code() == DetailCode::LineItemQuantityMissing)
        .unwrap();
    assert_eq!(quantity.segment().unwrap().tag, "SN1");
    assert_eq!(quantity.segment().unwrap().position, Some(9));
}

#[test]
fn unprefixed_vendor_id_is_a_warning_only() {
    let config = asnval_core::config::ValidationConfig::new(
        "ACME-1",
        "SHP20240315",
        asnval_core::config::Jurisdiction::Maharashtra,
    );
    let catalog = common::catalog();
    let ctx = RunContext::new(&config, &catalog, common::today());
    let findings =
        StructureValidator.run(&common::parse_notice(&common::valid_notice()), &ctx);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].code(), DetailCode::VendorIdFormat);
    assert_eq!(findings[0].severity(), Severity::Warning);
}
