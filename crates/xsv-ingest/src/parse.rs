//! Structural parsing of a sample into header and rows.

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;
use xsv_model::{Header, Row};

use crate::error::{IngestError, Result};

/// Header and rows parsed from a sample.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSample {
    /// Column names from the first record.
    pub header: Header,
    /// Remaining records keyed by column name.
    pub rows: Vec<Row>,
}

/// Parses `sample` as delimited text with standard double-quote rules.
///
/// The first record is the header. Each later record becomes a [`Row`];
/// fields missing at the end of a record are stored as `""`. Blank lines
/// are skipped.
///
/// # Errors
///
/// - [`IngestError::InvalidDelimiter`] if `delimiter` is not one byte
/// - [`IngestError::Parse`] for malformed quoting or a record with more
///   fields than the header
pub fn parse_sample(sample: &str, delimiter: char) -> Result<ParsedSample> {
    let delimiter_byte = delimiter_byte(delimiter)?;
    validate_quoting(sample, delimiter)?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter_byte)
        .flexible(true)
        .from_reader(sample.as_bytes());

    let header: Header = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.len() > header.len() {
            return Err(record_too_long(&record, header.len()));
        }
        rows.push(build_row(&header, &record));
    }

    debug!(columns = header.len(), rows = rows.len(), "parsed sample");
    Ok(ParsedSample { header, rows })
}

fn delimiter_byte(delimiter: char) -> Result<u8> {
    u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or(IngestError::InvalidDelimiter { delimiter })
}

/// Maps header names onto record fields. A repeated name keeps the value
/// of its last occurrence.
fn build_row(header: &[String], record: &StringRecord) -> Row {
    header
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.clone(), record.get(idx).unwrap_or_default().to_string()))
        .collect()
}

fn record_too_long(record: &StringRecord, expected: usize) -> IngestError {
    let line = record.position().map_or(0, csv::Position::line);
    IngestError::Parse {
        reason: format!(
            "record on line {line} has {} fields but the header has {expected}",
            record.len()
        ),
        source: None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    FieldStart,
    Unquoted,
    Quoted,
    /// Just saw a `"` inside a quoted field: either an escape or the close.
    QuoteInQuoted,
}

/// Rejects quoting the CSV reader would silently accept: a quote inside an
/// unquoted field, text after a closing quote, or an unterminated quote.
fn validate_quoting(sample: &str, delimiter: char) -> Result<()> {
    let mut state = QuoteState::FieldStart;
    let mut line = 1u64;
    let mut quote_line = 1u64;

    for c in sample.chars() {
        state = match (state, c) {
            (QuoteState::FieldStart, '"') => {
                quote_line = line;
                QuoteState::Quoted
            }
            (QuoteState::FieldStart | QuoteState::Unquoted, c) if c == delimiter => {
                QuoteState::FieldStart
            }
            (QuoteState::FieldStart | QuoteState::Unquoted, '\n') => {
                line += 1;
                QuoteState::FieldStart
            }
            (QuoteState::Unquoted, '"') => {
                return Err(quoting_error(line, "quote inside an unquoted field"));
            }
            (QuoteState::FieldStart | QuoteState::Unquoted, _) => QuoteState::Unquoted,
            (QuoteState::Quoted, '"') => QuoteState::QuoteInQuoted,
            (QuoteState::Quoted, c) => {
                if c == '\n' {
                    line += 1;
                }
                QuoteState::Quoted
            }
            (QuoteState::QuoteInQuoted, '"') => QuoteState::Quoted,
            (QuoteState::QuoteInQuoted, c) if c == delimiter => QuoteState::FieldStart,
            (QuoteState::QuoteInQuoted, '\n') => {
                line += 1;
                QuoteState::FieldStart
            }
            (QuoteState::QuoteInQuoted, '\r') => QuoteState::QuoteInQuoted,
            (QuoteState::QuoteInQuoted, _) => {
                return Err(quoting_error(line, "unexpected character after closing quote"));
            }
        };
    }

    if state == QuoteState::Quoted {
        return Err(quoting_error(quote_line, "quoted field is not closed"));
    }
    Ok(())
}

fn quoting_error(line: u64, what: &str) -> IngestError {
    IngestError::Parse {
        reason: format!("line {line}: {what}"),
        source: None,
    }
}
