//! Structural integrity of the shipment-notice envelope and line items.
use crate::document::ParsedDocument;
use crate::report::{DetailCode, Finding, SegmentRef, ValidatorName};
use crate::validators::{RunContext, Validator};

/// Segment tags a shipment-notice (856) document must carry, in order.
const REQUIRED_TAGS: [&str; 8] = ["ISA", "GS", "ST", "BSN", "HL", "SE", "GE", "IEA"];

/// Transaction-set type for advance shipment notices.
const SHIPMENT_NOTICE_TYPE: &str = "856";

/// Fields an interchange header carries, counting the tag.
const ISA_FIELD_COUNT: usize = 16;

/// Partner-assigned vendor identifiers start with this prefix.
const VENDOR_ID_PREFIX: &str = "WMTIN-";

#[derive(Debug, Clone, Copy)]
pub struct StructureValidator;

impl Validator for StructureValidator {
    fn name(&self) -> ValidatorName {
        ValidatorName::Structure
    }

    fn run(&self, document: &ParsedDocument, ctx: &RunContext<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();

        for tag in REQUIRED_TAGS {
            if document.first(tag).is_none() {
                findings.push(
                    Finding::error(
                        self.name(),
                        DetailCode::SegmentMissing,
                        format!("missing required segment: {tag}"),
                        format!("add the {tag} segment to the document"),
                    )
                    .with_segment(SegmentRef::expected(tag)),
                );
            }
        }

        if let Some(isa) = document.envelope_header() {
            let field_count = isa.elements().len() + 1;
            if field_count < ISA_FIELD_COUNT {
                findings.push(
                    Finding::error(
                        self.name(),
                        DetailCode::EnvelopeFieldCount,
                        format!(
                            "ISA segment has {field_count} fields, requires {ISA_FIELD_COUNT}"
                        ),
                        "pad the interchange header to the full X12 field layout",
                    )
                    .with_segment(SegmentRef::at("ISA", isa.position())),
                );
            }
        }

        if let Some(st) = document.first("ST") {
            match st.element(0) {
                Some(SHIPMENT_NOTICE_TYPE) => {}
                Some(other) => findings.push(
                    Finding::error(
                        self.name(),
                        DetailCode::TransactionTypeInvalid,
                        format!(
                            "transaction set type is {other}, expected {SHIPMENT_NOTICE_TYPE}"
                        ),
                        format!("declare the transaction set as ST*{SHIPMENT_NOTICE_TYPE}"),
                    )
                    .with_segment(SegmentRef::at("ST", st.position())),
                ),
                None => findings.push(
                    Finding::error(
                        self.name(),
                        DetailCode::TransactionTypeInvalid,
                        "transaction set type is missing from the ST segment",
                        format!("declare the transaction set as ST*{SHIPMENT_NOTICE_TYPE}"),
                    )
                    .with_segment(SegmentRef::at("ST", st.position())),
                ),
            }
        }

        for pair in document.control_numbers() {
            let (Some(header), Some(trailer)) = (&pair.header, &pair.trailer) else {
                // A missing side is already reported as a missing segment.
                continue;
            };
            if header.value != trailer.value {
                findings.push(
                    Finding::error(
                        self.name(),
                        DetailCode::ControlNumberMismatch,
                        format!(
                            "control number mismatch: {} declares {} but {} carries {}",
                            pair.header_tag, header.value, pair.trailer_tag, trailer.value
                        ),
                        format!(
                            "make the {} control number match the {} header",
                            pair.trailer_tag, pair.header_tag
                        ),
                    )
                    .with_segment(SegmentRef {
                        tag: pair.trailer_tag.to_string(),
                        position: Some(trailer.position),
                    }),
                );
            }
        }

        for item in document.line_items() {
            if item.identifier().is_none() {
                findings.push(
                    Finding::error(
                        self.name(),
                        DetailCode::LineItemIdentifierMissing,
                        "line item is missing its product identifier",
                        "supply the identifier in the third LIN element",
                    )
                    .with_segment(SegmentRef::at("LIN", item.position())),
                );
            }
            if item.quantity().is_none() {
                let (tag, position) = match item.sn1() {
                    Some(sn1) => ("SN1", sn1.position()),
                    None => ("LIN", item.position()),
                };
                findings.push(
                    Finding::error(
                        self.name(),
                        DetailCode::LineItemQuantityMissing,
                        "line item is missing its shipped quantity",
                        "pair the LIN with an SN1 segment carrying the quantity",
                    )
                    .with_segment(SegmentRef::at(tag, position)),
                );
            }
        }

        let vendor_id = ctx.config().vendor_id();
        if !vendor_id.trim().is_empty() && !vendor_id.starts_with(VENDOR_ID_PREFIX) {
            findings.push(Finding::warning(
                self.name(),
                DetailCode::VendorIdFormat,
                format!("vendor id {vendor_id:?} does not start with {VENDOR_ID_PREFIX}"),
                "verify the vendor identifier against the trading-partner standard",
            ));
        }

        findings
    }
}
