//! GSTIN-style tax identifier: format, jurisdiction, and checksum.
use crate::config::state_name;
use crate::document::ParsedDocument;
use crate::report::{DetailCode, Finding, SegmentRef, ValidatorName};
use crate::validators::{RunContext, Validator};

/// Symbol table of the mod-36 checksum. A character's value is its index.
const ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

const TAX_ID_LEN: usize = 15;

#[derive(Debug, Clone, Copy)]
pub struct TaxIdValidator;

impl Validator for TaxIdValidator {
    fn name(&self) -> ValidatorName {
        ValidatorName::TaxId
    }

    fn run(&self, document: &ParsedDocument, ctx: &RunContext<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();

        let Some(tax_id) = document.tax_id() else {
            findings.push(
                Finding::error(
                    self.name(),
                    DetailCode::TaxIdAbsent,
                    "tax identifier absent from the document",
                    "carry the GSTIN in a REF segment with qualifier TJ",
                )
                .with_segment(SegmentRef::expected("REF")),
            );
            return findings;
        };

        let segment = SegmentRef::at("REF", tax_id.position);
        let value = tax_id.value;

        let char_count = value.chars().count();
        if char_count != TAX_ID_LEN {
            findings.push(
                Finding::error(
                    self.name(),
                    DetailCode::TaxIdLength,
                    format!(
                        "tax identifier {value:?} has {char_count} characters, expected {TAX_ID_LEN}"
                    ),
                    "supply the full 15-character GSTIN",
                )
                .with_segment(segment),
            );
            return findings;
        }

        let chars: Vec<char> = value.chars().collect();
        let pattern_defects = pattern_defects(&chars);
        for (position, expected) in &pattern_defects {
            findings.push(
                Finding::error(
                    self.name(),
                    DetailCode::TaxIdPattern,
                    format!(
                        "character {:?} at position {position} must be {expected}",
                        chars[*position]
                    ),
                    "correct the GSTIN to the 2-digit state / PAN / entity / Z / checksum layout",
                )
                .with_segment(segment.clone()),
            );
        }

        // The state code is meaningful whenever the leading digits held.
        if chars[0].is_ascii_digit() && chars[1].is_ascii_digit() {
            let code = &value[..2];
            match state_name(code) {
                None => findings.push(
                    Finding::error(
                        self.name(),
                        DetailCode::StateCodeUnknown,
                        format!("state code {code} is not a recognized GST state code"),
                        "use a valid state code in the 01-38 range",
                    )
                    .with_segment(segment.clone()),
                ),
                Some(name) => {
                    let jurisdiction = ctx.config().jurisdiction();
                    if code != jurisdiction.code() {
                        findings.push(
                            Finding::error(
                                self.name(),
                                DetailCode::StateCodeMismatch,
                                format!(
                                    "GSTIN state code {code} ({name}) does not match the configured jurisdiction {} ({})",
                                    jurisdiction.code(),
                                    jurisdiction.as_str()
                                ),
                                format!(
                                    "update the GSTIN to state code {} or change the jurisdiction selection",
                                    jurisdiction.code()
                                ),
                            )
                            .with_segment(segment.clone()),
                        );
                    }
                }
            }
        }

        if pattern_defects.is_empty() {
            let expected = checksum_char(&chars[..TAX_ID_LEN - 1]);
            if Some(chars[TAX_ID_LEN - 1]) != expected {
                findings.push(
                    Finding::error(
                        self.name(),
                        DetailCode::TaxIdChecksum,
                        format!("GSTIN check character does not match the computed value for {value}"),
                        "verify the GSTIN with the tax authority or recompute the check character",
                    )
                    .with_segment(segment),
                );
            }
        }

        findings
    }
}

/// Character-class layout of a 15-character GSTIN:
/// 2 digits, 5 letters, 4 digits, 1 letter, 1 entity digit, the literal
/// `Z`, and one alphanumeric check character.
fn pattern_defects(chars: &[char]) -> Vec<(usize, &'static str)> {
    let mut defects = Vec::new();
    for (position, ch) in chars.iter().enumerate() {
        let (ok, expected) = match position {
            0..=1 => (ch.is_ascii_digit(), "a digit (state code)"),
            2..=6 => (ch.is_ascii_uppercase(), "an uppercase letter (PAN)"),
            7..=10 => (ch.is_ascii_digit(), "a digit (PAN)"),
            11 => (ch.is_ascii_uppercase(), "an uppercase letter (PAN)"),
            12 => (ch.is_ascii_digit(), "a digit (entity number)"),
            13 => (*ch == 'Z', "the literal letter Z"),
            _ => (ch.is_ascii_alphanumeric(), "an alphanumeric check character"),
        };
        if !ok {
            defects.push((position, expected));
        }
    }
    defects
}

/// Recompute the trailing check character: alternate 1/2 weights over the
/// 36-symbol alphabet, folding each product as quotient + remainder, then
/// map `(36 - sum) mod 36` back to a symbol.
fn checksum_char(body: &[char]) -> Option<char> {
    let mut total: u32 = 0;
    for (index, ch) in body.iter().enumerate() {
        let value = ALPHABET.iter().position(|&symbol| symbol as char == *ch)? as u32;
        let factor = if index % 2 == 0 { 1 } else { 2 };
        let product = value * factor;
        total += product / 36 + product % 36;
    }
    let check = (36 - total % 36) % 36;
    Some(ALPHABET[check as usize] as char)
}
