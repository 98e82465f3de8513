//! Tokenizer for the three supported document shapes.
use crate::document::{ParsedDocument, Segment};
use std::str::FromStr;
use thiserror::Error;

const ENVELOPE_TAGS: [&str; 8] = ["ISA", "GS", "ST", "BSN", "HL", "SE", "GE", "IEA"];

/// Declared (or auto-detected) textual shape of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatHint {
    /// Pick a shape by inspecting the content.
    Auto,
    /// One segment per line, elements split on `*` (or `|`).
    SegmentLines,
    /// Classic stream with `~` segment terminators.
    TerminatedStream,
    /// Comma-delimited rows, first cell is the tag.
    DelimitedColumns,
}

/// Error returned when parsing a [`FormatHint`] from a string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatHintParseError {
    #[error("unknown document format: {input}")]
    Unknown { input: String },
}

impl FromStr for FormatHint {
    type Err = FormatHintParseError;
    fn from_str(s: &str) -> Result<FormatHint, FormatHintParseError> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(FormatHint::Auto),
            "lines" | "segment_lines" => Ok(FormatHint::SegmentLines),
            "stream" | "terminated" => Ok(FormatHint::TerminatedStream),
            "csv" | "delimited" => Ok(FormatHint::DelimitedColumns),
            _ => Err(FormatHintParseError::Unknown {
                input: s.to_string(),
            }),
        }
    }
}

/// Genuinely unreadable input. Anything short of this degrades to an
/// empty or partial document plus downstream findings.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("input is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
}

/// Split raw bytes into an ordered segment sequence.
///
/// Empty or unrecognized content yields a document with zero segments,
/// not an error; the structure checker reports what is missing.
///
/// # Examples
/// ```rust
/// use asnval_core::document::parse::{parse, FormatHint};
///
/// let doc = parse(b"LIN*1*UP*12345678901231~SN1*1*10*EA~", FormatHint::Auto)?;
/// assert_eq!(doc.segments().len(), 2);
/// assert_eq!(doc.segments()[1].tag(), "SN1");
/// # Ok::<(), asnval_core::document::parse::ParseError>(())
/// ```
///
/// # Errors
/// Returns [`ParseError::Encoding`] for non-UTF-8 input.
pub fn parse(raw: &[u8], hint: FormatHint) -> Result<ParsedDocument, ParseError> {
    let text = std::str::from_utf8(raw)?;
    let shape = match hint {
        FormatHint::Auto => detect(text),
        declared => declared,
    };
    tracing::debug!(?shape, bytes = raw.len(), "tokenizing document");

    let segments = match shape {
        FormatHint::SegmentLines => parse_segment_lines(text),
        FormatHint::TerminatedStream => parse_terminated_stream(text),
        FormatHint::DelimitedColumns => parse_delimited_columns(text),
        FormatHint::Auto => unreachable!("auto resolved above"),
    };
    Ok(ParsedDocument::new(segments))
}

/// Shape detection for callers that do not declare one.
///
/// Three or more envelope tags followed by `*` mark segment format; a
/// `~`-terminated one-liner is the classic stream. Consistent comma
/// counts across the leading rows mark the tabular fallback.
pub fn detect(text: &str) -> FormatHint {
    let tag_hits = ENVELOPE_TAGS
        .iter()
        .filter(|tag| text.contains(&format!("{tag}*")))
        .count();
    if tag_hits >= 3 {
        let newline_count = text.lines().filter(|line| !line.trim().is_empty()).count();
        if text.contains('~') && newline_count <= 1 {
            return FormatHint::TerminatedStream;
        }
        return FormatHint::SegmentLines;
    }

    if looks_delimited(text) {
        return FormatHint::DelimitedColumns;
    }
    FormatHint::SegmentLines
}

fn looks_delimited(text: &str) -> bool {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());
    let first_commas = match lines.next() {
        Some(line) => line.matches(',').count(),
        None => return false,
    };
    if first_commas < 2 {
        return false;
    }
    lines
        .take(4)
        .any(|line| line.matches(',').count() == first_commas)
}

fn parse_segment_lines(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        segments.push(split_segment(segments.len(), line));
    }
    segments
}

fn parse_terminated_stream(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    for chunk in text.split('~') {
        let chunk = chunk.trim();
        if chunk.is_empty() {
            continue;
        }
        segments.push(split_segment(segments.len(), chunk));
    }
    segments
}

fn parse_delimited_columns(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut cells = line.split(',').map(|cell| cell.trim().to_string());
        let tag = cells.next().unwrap_or_default();
        if tag.is_empty() {
            continue;
        }
        segments.push(Segment::new(segments.len(), tag, cells.collect()));
    }
    segments
}

fn split_segment(position: usize, raw: &str) -> Segment {
    let (tag, elements) = if raw.contains('*') {
        split_on(raw, '*')
    } else if raw.contains('|') {
        split_on(raw, '|')
    } else {
        // No delimiter at all: first three characters act as the tag.
        let split_at = raw
            .char_indices()
            .nth(3)
            .map(|(index, _)| index)
            .unwrap_or(raw.len());
        let tag = raw[..split_at].to_string();
        let rest = raw[split_at..].trim();
        let elements = if rest.is_empty() {
            Vec::new()
        } else {
            vec![rest.to_string()]
        };
        (tag, elements)
    };
    Segment::new(position, tag, elements)
}

fn split_on(raw: &str, delimiter: char) -> (String, Vec<String>) {
    let mut parts = raw.split(delimiter).map(str::to_string);
    let tag = parts.next().unwrap_or_default();
    (tag, parts.collect())
}
