//! Delimiter names accepted on the command line and shown in output.

use xsv_ingest::{RECORD_SEPARATOR, UNIT_SEPARATOR};

/// Parses a `--delimiter` value: a single character or a well-known name.
pub fn parse_delimiter(value: &str) -> Result<char, String> {
    match value.to_lowercase().as_str() {
        "comma" => return Ok(','),
        "tab" | "\\t" => return Ok('\t'),
        "pipe" => return Ok('|'),
        "semicolon" => return Ok(';'),
        "rs" => return Ok(RECORD_SEPARATOR),
        "us" => return Ok(UNIT_SEPARATOR),
        _ => {}
    }

    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c),
        (Some(c), None) => Err(format!("delimiter {c:?} is not a single-byte character")),
        _ => Err(format!("unknown delimiter: {value}")),
    }
}

/// Printable name for a delimiter.
pub fn delimiter_label(delimiter: char) -> String {
    match delimiter {
        ',' => "comma (,)".to_string(),
        '\t' => "tab (\\t)".to_string(),
        '|' => "pipe (|)".to_string(),
        ';' => "semicolon (;)".to_string(),
        RECORD_SEPARATOR => "record separator (0x1E)".to_string(),
        UNIT_SEPARATOR => "unit separator (0x1F)".to_string(),
        c if c.is_control() => format!("control (0x{:02X})", u32::from(c)),
        c => format!("'{c}'"),
    }
}
