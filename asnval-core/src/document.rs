//! Parsed document model: segments and derived read-only views.
//!
//! The model only *addresses* the document; judging correctness is the
//! checkers' job. Accessors return `None` or empty collections for
//! anything absent, so an empty document is a valid value here.
pub mod parse;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

/// Qualifier of the ship timestamp in `DTM` segments.
pub const DTM_SHIP: &str = "011";
/// Qualifier of the document-creation (submission) timestamp.
pub const DTM_CREATION: &str = "137";

const REF_TAX_QUALIFIER: &str = "TJ";

/// One parsed segment: sequence position, tag, and ordered elements.
/// Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    position: usize,
    tag: String,
    elements: Vec<String>,
}

impl Segment {
    pub(crate) fn new(position: usize, tag: String, elements: Vec<String>) -> Self {
        Segment {
            position,
            tag,
            elements,
        }
    }

    /// Zero-based index of this segment in the parsed sequence.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    /// Element at `index`, `None` when the segment is too short.
    pub fn element(&self, index: usize) -> Option<&str> {
        self.elements.get(index).map(String::as_str)
    }

    fn element_non_empty(&self, index: usize) -> Option<&str> {
        self.element(index)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

/// Header/trailer control-number pairing for one envelope level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlNumberPair {
    pub header_tag: &'static str,
    pub trailer_tag: &'static str,
    pub header: Option<ControlNumber>,
    pub trailer: Option<ControlNumber>,
}

/// A control-number value together with the segment it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlNumber {
    pub position: usize,
    pub value: String,
}

/// One logical line item: a `LIN` segment plus its companion `SN1`
/// quantity segment, when present.
#[derive(Debug, Clone, Copy)]
pub struct LineItem<'a> {
    lin: &'a Segment,
    sn1: Option<&'a Segment>,
}

impl<'a> LineItem<'a> {
    /// Position of the `LIN` segment this item is anchored at.
    pub fn position(&self) -> usize {
        self.lin.position()
    }

    pub fn lin(&self) -> &'a Segment {
        self.lin
    }

    pub fn sn1(&self) -> Option<&'a Segment> {
        self.sn1
    }

    /// Identifier qualifier (`UP`, `IN`, ...) declared on the `LIN`.
    pub fn identifier_qualifier(&self) -> Option<&'a str> {
        self.lin.element_non_empty(1)
    }

    /// Declared product identifier, `None` when absent or blank.
    pub fn identifier(&self) -> Option<&'a str> {
        self.lin.element_non_empty(2)
    }

    /// Declared quantity from the companion `SN1`, `None` when absent.
    pub fn quantity(&self) -> Option<&'a str> {
        self.sn1.and_then(|sn1| sn1.element_non_empty(1))
    }

    pub fn unit(&self) -> Option<&'a str> {
        self.sn1.and_then(|sn1| sn1.element_non_empty(2))
    }
}

/// Tax identifier extracted from a `REF*TJ` segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxIdRef<'a> {
    pub position: usize,
    pub value: &'a str,
}

/// A declared timestamp (`DTM` segment) before any format judgment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentTimestamp<'a> {
    pub position: usize,
    pub date: &'a str,
    pub time: Option<&'a str>,
}

impl DocumentTimestamp<'_> {
    /// Interpret the raw fields as `YYYYMMDD` + optional `HHMM`.
    /// A missing time defaults to noon; an unparseable value is `None`,
    /// which the timing checker reports as a finding.
    pub fn to_datetime(&self) -> Option<NaiveDateTime> {
        let date = NaiveDate::parse_from_str(self.date, "%Y%m%d").ok()?;
        let time = match self.time {
            Some(raw) => NaiveTime::parse_from_str(raw, "%H%M").ok()?,
            None => NaiveTime::from_hms_opt(12, 0, 0)?,
        };
        Some(NaiveDateTime::new(date, time))
    }
}

/// A transmission-certificate declaration (`CERT` segment).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateRef<'a> {
    pub position: usize,
    pub name: &'a str,
    pub expiry_raw: &'a str,
}

impl CertificateRef<'_> {
    /// Expiry parsed as `YYYYMMDD`, `None` when malformed.
    pub fn expiry(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.expiry_raw, "%Y%m%d").ok()
    }
}

/// Ownership of all parsed segments plus derived views.
///
/// A document with zero segments is a valid value: the structure checker
/// reports the absent envelope as findings rather than the parser
/// failing.
///
/// # Examples
/// ```rust
/// use asnval_core::document::parse::{parse, FormatHint};
///
/// let doc = parse(b"ISA*00*ACME*000000905\nIEA*1*000000905\n", FormatHint::SegmentLines)?;
/// assert_eq!(doc.segments().len(), 2);
/// assert_eq!(doc.envelope_header().map(|s| s.tag()), Some("ISA"));
/// # Ok::<(), asnval_core::document::parse::ParseError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedDocument {
    segments: Vec<Segment>,
}

impl ParsedDocument {
    pub(crate) fn new(segments: Vec<Segment>) -> Self {
        ParsedDocument { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// First segment with the given tag, in document order.
    pub fn first(&self, tag: &str) -> Option<&Segment> {
        self.segments.iter().find(|segment| segment.tag == tag)
    }

    /// All segments with the given tag, in document order.
    pub fn all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Segment> {
        self.segments.iter().filter(move |segment| segment.tag == tag)
    }

    /// Interchange envelope header (`ISA`).
    pub fn envelope_header(&self) -> Option<&Segment> {
        self.first("ISA")
    }

    /// Interchange envelope trailer (`IEA`).
    pub fn envelope_trailer(&self) -> Option<&Segment> {
        self.first("IEA")
    }

    /// Control numbers for the three envelope levels, pairing each header
    /// with its trailer. Absent sides are `None`; comparing the values is
    /// left to the structure checker.
    pub fn control_numbers(&self) -> [ControlNumberPair; 3] {
        [
            self.control_pair("ISA", 12, "IEA", 1),
            self.control_pair("GS", 5, "GE", 1),
            self.control_pair("ST", 1, "SE", 1),
        ]
    }

    fn control_pair(
        &self,
        header_tag: &'static str,
        header_index: usize,
        trailer_tag: &'static str,
        trailer_index: usize,
    ) -> ControlNumberPair {
        let pick = |tag: &str, index: usize| {
            self.first(tag).and_then(|segment| {
                segment.element_non_empty(index).map(|value| ControlNumber {
                    position: segment.position(),
                    value: value.to_string(),
                })
            })
        };
        ControlNumberPair {
            header_tag,
            trailer_tag,
            header: pick(header_tag, header_index),
            trailer: pick(trailer_tag, trailer_index),
        }
    }

    /// Ordered line items: each `LIN` paired with the next `SN1` that
    /// follows it before another `LIN`.
    pub fn line_items(&self) -> Vec<LineItem<'_>> {
        let mut items: Vec<LineItem<'_>> = Vec::new();
        for segment in &self.segments {
            match segment.tag() {
                "LIN" => items.push(LineItem {
                    lin: segment,
                    sn1: None,
                }),
                "SN1" => {
                    if let Some(last) = items.last_mut() {
                        if last.sn1.is_none() {
                            last.sn1 = Some(segment);
                        }
                    }
                }
                _ => {}
            }
        }
        items
    }

    /// Tax identifier from the first `REF*TJ` segment, untrimmed blank
    /// values excluded.
    pub fn tax_id(&self) -> Option<TaxIdRef<'_>> {
        self.all("REF")
            .find(|segment| segment.element(0) == Some(REF_TAX_QUALIFIER))
            .and_then(|segment| {
                segment.element_non_empty(1).map(|value| TaxIdRef {
                    position: segment.position(),
                    value,
                })
            })
    }

    /// First `DTM` timestamp with the given qualifier.
    pub fn timestamp(&self, qualifier: &str) -> Option<DocumentTimestamp<'_>> {
        self.all("DTM")
            .find(|segment| segment.element(0) == Some(qualifier))
            .and_then(|segment| {
                segment.element_non_empty(1).map(|date| DocumentTimestamp {
                    position: segment.position(),
                    date,
                    time: segment.element_non_empty(2),
                })
            })
    }

    /// All transmission-certificate declarations, in document order.
    pub fn certificates(&self) -> Vec<CertificateRef<'_>> {
        self.all("CERT")
            .filter_map(|segment| {
                let name = segment.element_non_empty(0)?;
                let expiry_raw = segment.element_non_empty(1)?;
                Some(CertificateRef {
                    position: segment.position(),
                    name,
                    expiry_raw,
                })
            })
            .collect()
    }
}
