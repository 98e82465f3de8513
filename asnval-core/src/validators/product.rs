//! Product identifiers: format, check digit, and catalog presence.
use crate::document::ParsedDocument;
use crate::report::{DetailCode, Finding, SegmentRef, ValidatorName};
use crate::validators::{RunContext, Validator};
use std::collections::BTreeMap;

const PRODUCT_CODE_LEN: usize = 14;

#[derive(Debug, Clone, Copy)]
pub struct ProductValidator;

impl Validator for ProductValidator {
    fn name(&self) -> ValidatorName {
        ValidatorName::Product
    }

    fn run(&self, document: &ParsedDocument, ctx: &RunContext<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();
        let mut seen: BTreeMap<&str, usize> = BTreeMap::new();

        for item in document.line_items() {
            // Absent identifiers are the structure checker's finding.
            let Some(identifier) = item.identifier() else {
                continue;
            };
            *seen.entry(identifier).or_insert(0) += 1;
            let segment = SegmentRef::at("LIN", item.position());

            if identifier.len() != PRODUCT_CODE_LEN
                || !identifier.bytes().all(|b| b.is_ascii_digit())
            {
                findings.push(
                    Finding::error(
                        self.name(),
                        DetailCode::ProductCodeFormat,
                        format!(
                            "product identifier {identifier:?} is not a {PRODUCT_CODE_LEN}-digit item code"
                        ),
                        format!("use a {PRODUCT_CODE_LEN}-digit identifier with a trailing check digit"),
                    )
                    .with_segment(segment),
                );
                continue;
            }

            if !check_digit_valid(identifier) {
                findings.push(
                    Finding::error(
                        self.name(),
                        DetailCode::ProductCheckDigit,
                        format!("check digit of product identifier {identifier} does not match"),
                        "recompute the trailing check digit for the identifier",
                    )
                    .with_segment(segment),
                );
                continue;
            }

            match ctx.catalog().get(identifier) {
                None => findings.push(
                    Finding::error(
                        self.name(),
                        DetailCode::ProductNotInCatalog,
                        format!("product identifier {identifier} not found in catalog"),
                        "register the product in the partner catalog or correct the identifier",
                    )
                    .with_segment(segment),
                ),
                Some(entry) => {
                    if let Some(expected) = ctx.config().expected_category() {
                        if !entry.category().eq_ignore_ascii_case(expected) {
                            findings.push(
                                Finding::warning(
                                    self.name(),
                                    DetailCode::ProductCategoryConflict,
                                    format!(
                                        "catalog lists {identifier} as {} but the shipment declares {expected}",
                                        entry.category()
                                    ),
                                    "verify the shipment category against the catalog entry",
                                )
                                .with_segment(segment),
                            );
                        }
                    }
                }
            }
        }

        let duplicates: Vec<&str> = seen
            .iter()
            .filter(|(_, count)| **count > 1)
            .map(|(identifier, _)| *identifier)
            .collect();
        if !duplicates.is_empty() {
            findings.push(Finding::warning(
                self.name(),
                DetailCode::ProductDuplicate,
                format!("duplicate product identifiers: {}", duplicates.join(", ")),
                "verify quantities and collapse repeated line items",
            ));
        }

        findings
    }
}

/// Weighted mod-10 check over the leading digits: weights alternate 3, 1
/// starting from the leftmost digit.
fn check_digit_valid(code: &str) -> bool {
    let digits: Vec<u32> = code.bytes().map(|b| u32::from(b - b'0')).collect();
    let declared = digits[PRODUCT_CODE_LEN - 1];
    let weighted_sum: u32 = digits[..PRODUCT_CODE_LEN - 1]
        .iter()
        .enumerate()
        .map(|(index, digit)| digit * if index % 2 == 0 { 3 } else { 1 })
        .sum();
    declared == (10 - weighted_sum % 10) % 10
}

#[cfg(test)]
mod tests {
    use super::check_digit_valid;

    #[test]
    fn accepts_valid_check_digits() {
        for code in ["12345678901231", "98765432109879", "03600029145224"] {
            assert!(check_digit_valid(code), "code {code}");
        }
    }

    #[test]
    fn rejects_a_flipped_check_digit() {
        assert!(!check_digit_valid("12345678901234"));
    }
}
