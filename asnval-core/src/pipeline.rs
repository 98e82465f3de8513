//! Orchestrates one validation run end to end.
use crate::catalog::ProductCatalog;
use crate::config::ValidationConfig;
use crate::document::parse::{parse, FormatHint};
use crate::document::ParsedDocument;
use crate::report::ValidationReport;
use crate::validators::{registry, RunContext};
use crate::Error;
use chrono::NaiveDate;

/// Run the whole pipeline: validate configuration, parse, run the
/// enabled checkers, and aggregate one immutable report.
///
/// A pure function of its arguments: the catalog and the reference date
/// are injected, and neither the document nor the report carries state
/// across calls.
///
/// # Examples
/// ```rust
/// use asnval_core::catalog::ProductCatalog;
/// use asnval_core::config::{Jurisdiction, ValidationConfig};
/// use asnval_core::document::parse::FormatHint;
/// use asnval_core::pipeline::validate_document;
/// use chrono::NaiveDate;
///
/// let config = ValidationConfig::new("WMTIN-REL100", "SHP-1", Jurisdiction::Maharashtra);
/// let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let (document, report) = validate_document(
///     b"",
///     FormatHint::Auto,
///     &config,
///     &ProductCatalog::sample(),
///     today,
/// )?;
/// assert!(document.is_empty());
/// assert!(!report.is_ready());
/// # Ok::<(), asnval_core::Error>(())
/// ```
///
/// # Errors
/// Returns [`Error`] for invalid configuration or an unreadable byte
/// stream; every defect discoverable from the document's *content*
/// becomes a finding instead.
pub fn validate_document(
    raw: &[u8],
    hint: FormatHint,
    config: &ValidationConfig,
    catalog: &ProductCatalog,
    today: NaiveDate,
) -> Result<(ParsedDocument, ValidationReport), Error> {
    config.validate()?;
    let document = parse(raw, hint)?;
    let ctx = RunContext::new(config, catalog, today);
    let report = run_validators(&document, &ctx);
    Ok((document, report))
}

/// Run the enabled checkers against an already-parsed document.
///
/// Checkers execute in registry order and never observe each other's
/// findings. Each checker's batch is ordered by segment position before
/// aggregation, so the report order stays fixed even if a caller fans
/// the checkers out concurrently and joins the batches.
pub fn run_validators(document: &ParsedDocument, ctx: &RunContext<'_>) -> ValidationReport {
    let enabled = ctx.config().enabled();
    let mut findings = Vec::new();

    for validator in registry() {
        if !enabled.contains_validator(validator.name()) {
            continue;
        }
        let span = tracing::debug_span!("checker", name = validator.name().as_str());
        let _entered = span.enter();
        let mut batch = validator.run(document, ctx);
        batch.sort_by_key(|finding| finding.segment().and_then(|segment| segment.position));
        tracing::debug!(findings = batch.len(), "checker finished");
        findings.extend(batch);
    }

    let report = ValidationReport::from_findings(findings);
    tracing::debug!(
        errors = report.error_count(),
        warnings = report.warning_count(),
        status = report.status().as_str(),
        "validation run complete"
    );
    report
}
