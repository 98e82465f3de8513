//! Findings and the aggregated validation report.
use serde::Serialize;

/// Severity of a single finding.
///
/// Warnings never block submission; the overall status is driven by
/// errors alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Identifies the checker a finding originated from.
///
/// Declaration order is the fixed reporting order of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidatorName {
    Structure,
    TaxId,
    Product,
    Timing,
    Certificate,
}

impl ValidatorName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidatorName::Structure => "structure",
            ValidatorName::TaxId => "tax_id",
            ValidatorName::Product => "product",
            ValidatorName::Timing => "timing",
            ValidatorName::Certificate => "certificate",
        }
    }
}

/// Machine-readable classification of a finding.
///
/// The `as_str` codes are a stable contract for downstream renderers;
/// messages and suggestions are free-form text and may change. The same
/// codes appear in serialized reports.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailCode {
    SegmentMissing,
    EnvelopeFieldCount,
    TransactionTypeInvalid,
    ControlNumberMismatch,
    LineItemIdentifierMissing,
    LineItemQuantityMissing,
    VendorIdFormat,
    TaxIdAbsent,
    TaxIdLength,
    TaxIdPattern,
    StateCodeUnknown,
    StateCodeMismatch,
    TaxIdChecksum,
    ProductCodeFormat,
    ProductCheckDigit,
    ProductNotInCatalog,
    ProductCategoryConflict,
    ProductDuplicate,
    TimingDateAbsent,
    TimingDateInvalid,
    SubmittedAfterShip,
    SubmittedEarly,
    SubmittedTooEarly,
    CertificateAbsent,
    CertificateDateInvalid,
    CertificateExpired,
    CertificateExpiringSoon,
}

impl DetailCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetailCode::SegmentMissing => "STRUCT_SEGMENT_MISSING",
            DetailCode::EnvelopeFieldCount => "STRUCT_ENVELOPE_FIELD_COUNT",
            DetailCode::TransactionTypeInvalid => "STRUCT_TRANSACTION_TYPE",
            DetailCode::ControlNumberMismatch => "STRUCT_CONTROL_NUMBER_MISMATCH",
            DetailCode::LineItemIdentifierMissing => "STRUCT_ITEM_IDENTIFIER_MISSING",
            DetailCode::LineItemQuantityMissing => "STRUCT_ITEM_QUANTITY_MISSING",
            DetailCode::VendorIdFormat => "STRUCT_VENDOR_ID_FORMAT",
            DetailCode::TaxIdAbsent => "TAX_ID_ABSENT",
            DetailCode::TaxIdLength => "TAX_ID_LENGTH",
            DetailCode::TaxIdPattern => "TAX_ID_PATTERN",
            DetailCode::StateCodeUnknown => "TAX_STATE_CODE_UNKNOWN",
            DetailCode::StateCodeMismatch => "TAX_STATE_CODE_MISMATCH",
            DetailCode::TaxIdChecksum => "TAX_ID_CHECKSUM",
            DetailCode::ProductCodeFormat => "PRODUCT_CODE_FORMAT",
            DetailCode::ProductCheckDigit => "PRODUCT_CHECK_DIGIT",
            DetailCode::ProductNotInCatalog => "PRODUCT_NOT_IN_CATALOG",
            DetailCode::ProductCategoryConflict => "PRODUCT_CATEGORY_CONFLICT",
            DetailCode::ProductDuplicate => "PRODUCT_DUPLICATE",
            DetailCode::TimingDateAbsent => "TIMING_DATE_ABSENT",
            DetailCode::TimingDateInvalid => "TIMING_DATE_INVALID",
            DetailCode::SubmittedAfterShip => "TIMING_SUBMITTED_AFTER_SHIP",
            DetailCode::SubmittedEarly => "TIMING_SUBMITTED_EARLY",
            DetailCode::SubmittedTooEarly => "TIMING_SUBMITTED_TOO_EARLY",
            DetailCode::CertificateAbsent => "CERT_ABSENT",
            DetailCode::CertificateDateInvalid => "CERT_DATE_INVALID",
            DetailCode::CertificateExpired => "CERT_EXPIRED",
            DetailCode::CertificateExpiringSoon => "CERT_EXPIRING_SOON",
        }
    }
}

impl Serialize for DetailCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Location of a finding within the document.
///
/// `position` is the zero-based sequence index of the segment. Findings
/// about a segment that *should* exist carry the expected tag with no
/// position; document-level findings carry no reference at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentRef {
    pub tag: String,
    pub position: Option<usize>,
}

impl SegmentRef {
    pub fn at(tag: impl Into<String>, position: usize) -> Self {
        SegmentRef {
            tag: tag.into(),
            position: Some(position),
        }
    }

    pub fn expected(tag: impl Into<String>) -> Self {
        SegmentRef {
            tag: tag.into(),
            position: None,
        }
    }
}

/// One reported defect or advisory.
///
/// Findings are created once by a checker and never mutated afterwards.
///
/// # Examples
/// ```rust
/// use asnval_core::report::{DetailCode, Finding, Severity, ValidatorName};
///
/// let finding = Finding::error(
///     ValidatorName::Structure,
///     DetailCode::SegmentMissing,
///     "missing required segment: BSN",
///     "add the BSN segment with shipment identification details",
/// );
/// assert_eq!(finding.severity(), Severity::Error);
/// assert_eq!(finding.code().as_str(), "STRUCT_SEGMENT_MISSING");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    severity: Severity,
    validator: ValidatorName,
    segment: Option<SegmentRef>,
    message: String,
    code: DetailCode,
    suggestion: String,
}

impl Finding {
    pub fn error(
        validator: ValidatorName,
        code: DetailCode,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Finding {
            severity: Severity::Error,
            validator,
            segment: None,
            message: message.into(),
            code,
            suggestion: suggestion.into(),
        }
    }

    pub fn warning(
        validator: ValidatorName,
        code: DetailCode,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Finding {
            severity: Severity::Warning,
            validator,
            segment: None,
            message: message.into(),
            code,
            suggestion: suggestion.into(),
        }
    }

    pub fn with_segment(mut self, segment: SegmentRef) -> Self {
        self.segment = Some(segment);
        self
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn validator(&self) -> ValidatorName {
        self.validator
    }

    pub fn segment(&self) -> Option<&SegmentRef> {
        self.segment.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> DetailCode {
        self.code
    }

    pub fn suggestion(&self) -> &str {
        &self.suggestion
    }
}

/// Overall outcome of a validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Ready,
    NotReady,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Ready => "ready",
            ReportStatus::NotReady => "not_ready",
        }
    }
}

/// The single artifact returned to callers of the pipeline.
///
/// Findings are kept in validator run order, then segment order; counts
/// and the status are derived once at construction and never change.
///
/// # Examples
/// ```rust
/// use asnval_core::report::{
///     DetailCode, Finding, ReportStatus, ValidationReport, ValidatorName,
/// };
///
/// let report = ValidationReport::from_findings(vec![Finding::warning(
///     ValidatorName::Certificate,
///     DetailCode::CertificateExpiringSoon,
///     "certificate expires in 5 days",
///     "plan certificate renewal",
/// )]);
/// assert_eq!(report.status(), ReportStatus::Ready);
/// assert_eq!(report.warning_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    findings: Vec<Finding>,
    error_count: usize,
    warning_count: usize,
    status: ReportStatus,
}

impl ValidationReport {
    pub fn from_findings(findings: Vec<Finding>) -> Self {
        let error_count = findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .count();
        let warning_count = findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
            .count();
        let status = if error_count == 0 {
            ReportStatus::Ready
        } else {
            ReportStatus::NotReady
        };
        ValidationReport {
            findings,
            error_count,
            warning_count,
            status,
        }
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    pub fn status(&self) -> ReportStatus {
        self.status
    }

    pub fn is_ready(&self) -> bool {
        self.status == ReportStatus::Ready
    }
}
