//! Submission-time vs ship-time window.
use crate::document::{ParsedDocument, DTM_CREATION, DTM_SHIP};
use crate::report::{DetailCode, Finding, SegmentRef, ValidatorName};
use crate::validators::{RunContext, Validator};
use chrono::{Duration, NaiveDateTime};

#[derive(Debug, Clone, Copy)]
pub struct TimingValidator;

impl Validator for TimingValidator {
    fn name(&self) -> ValidatorName {
        ValidatorName::Timing
    }

    fn run(&self, document: &ParsedDocument, ctx: &RunContext<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();

        let submission = self.resolve(document, DTM_CREATION, "submission", &mut findings);
        let ship = self.resolve(document, DTM_SHIP, "ship", &mut findings);
        let (Some((submission, _)), Some((ship, ship_position))) = (submission, ship) else {
            // Date defects already reported; only the window check is
            // short-circuited.
            return findings;
        };

        let policy = ctx.config().timing();
        let advance = ship - submission;
        let segment = SegmentRef::at("DTM", ship_position);

        if advance < Duration::zero() {
            findings.push(
                Finding::error(
                    self.name(),
                    DetailCode::SubmittedAfterShip,
                    format!(
                        "notice submitted {} after the ship time",
                        format_hours(-advance)
                    ),
                    "submit the shipment notice before shipping, or correct the ship date",
                )
                .with_segment(segment),
            );
        } else if advance > Duration::hours(policy.hard_ceiling_hours) {
            findings.push(
                Finding::error(
                    self.name(),
                    DetailCode::SubmittedTooEarly,
                    format!(
                        "notice submitted {} before the ship time, beyond the {}h ceiling",
                        format_hours(advance),
                        policy.hard_ceiling_hours
                    ),
                    format!(
                        "submit within {}h of the ship time",
                        policy.window_hours
                    ),
                )
                .with_segment(segment),
            );
        } else if advance > Duration::hours(policy.window_hours) {
            findings.push(
                Finding::warning(
                    self.name(),
                    DetailCode::SubmittedEarly,
                    format!(
                        "notice submitted {} before the ship time, outside the {}h window",
                        format_hours(advance),
                        policy.window_hours
                    ),
                    format!("submit closer to the ship time, within {}h", policy.window_hours),
                )
                .with_segment(segment),
            );
        }

        findings
    }
}

impl TimingValidator {
    fn resolve(
        &self,
        document: &ParsedDocument,
        qualifier: &str,
        label: &str,
        findings: &mut Vec<Finding>,
    ) -> Option<(NaiveDateTime, usize)> {
        let Some(timestamp) = document.timestamp(qualifier) else {
            findings.push(
                Finding::error(
                    self.name(),
                    DetailCode::TimingDateAbsent,
                    format!("{label} date absent from the document"),
                    format!("add a DTM*{qualifier} segment with the {label} date"),
                )
                .with_segment(SegmentRef::expected("DTM")),
            );
            return None;
        };
        match timestamp.to_datetime() {
            Some(datetime) => Some((datetime, timestamp.position)),
            None => {
                findings.push(
                    Finding::error(
                        self.name(),
                        DetailCode::TimingDateInvalid,
                        format!(
                            "invalid {label} date format: {}{}",
                            timestamp.date,
                            timestamp
                                .time
                                .map(|t| format!(" {t}"))
                                .unwrap_or_default()
                        ),
                        "use YYYYMMDD with an optional HHMM time element",
                    )
                    .with_segment(SegmentRef::at("DTM", timestamp.position)),
                );
                None
            }
        }
    }
}

fn format_hours(duration: Duration) -> String {
    let minutes = duration.num_minutes();
    format!("{:.1}h", minutes as f64 / 60.0)
}
