//! Transmission-certificate expiry window.
use crate::document::ParsedDocument;
use crate::report::{DetailCode, Finding, SegmentRef, ValidatorName};
use crate::validators::{RunContext, Validator};

#[derive(Debug, Clone, Copy)]
pub struct CertificateValidator;

impl Validator for CertificateValidator {
    fn name(&self) -> ValidatorName {
        ValidatorName::Certificate
    }

    fn run(&self, document: &ParsedDocument, ctx: &RunContext<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();

        let certificates = document.certificates();
        if certificates.is_empty() {
            findings.push(
                Finding::error(
                    self.name(),
                    DetailCode::CertificateAbsent,
                    "certificate data absent while certificate validation is enabled",
                    "declare the transmission certificate in a CERT segment with its expiry date",
                )
                .with_segment(SegmentRef::expected("CERT")),
            );
            return findings;
        }

        let horizon = ctx.config().certificate().warning_horizon_days;
        for certificate in certificates {
            let segment = SegmentRef::at("CERT", certificate.position);
            let Some(expiry) = certificate.expiry() else {
                findings.push(
                    Finding::error(
                        self.name(),
                        DetailCode::CertificateDateInvalid,
                        format!(
                            "certificate {} declares an unreadable expiry date {:?}",
                            certificate.name, certificate.expiry_raw
                        ),
                        "declare the expiry as YYYYMMDD",
                    )
                    .with_segment(segment),
                );
                continue;
            };

            let days_left = (expiry - ctx.today()).num_days();
            if days_left < 0 {
                findings.push(
                    Finding::error(
                        self.name(),
                        DetailCode::CertificateExpired,
                        format!(
                            "certificate {} expired {} days ago",
                            certificate.name, -days_left
                        ),
                        "renew the certificate before transmitting",
                    )
                    .with_segment(segment),
                );
            } else if days_left <= horizon {
                findings.push(
                    Finding::warning(
                        self.name(),
                        DetailCode::CertificateExpiringSoon,
                        format!(
                            "certificate {} expires in {days_left} days",
                            certificate.name
                        ),
                        "plan certificate renewal to avoid a transmission outage",
                    )
                    .with_segment(segment),
                );
            }
        }

        findings
    }
}
