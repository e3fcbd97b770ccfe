//! Column type inference from sampled values.
//!
//! Each column starts as `String` and is refined value by value in sample
//! order. Numeric types only ever widen (`Int` -> `Long`, integers ->
//! `Float` -> `Double`). The first value that is not numeric turns the
//! column into `String` for good and the rest of its values are ignored.
//!
//! `Float` vs `Double` is decided by a rough precision proxy rather than a
//! real precision analysis: the magnitude must be below 3.4e38 and the
//! canonical rendering of the number (see [`canonical_number`]) must have at
//! most seven characters, not counting the decimal point.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};
use xsv_model::{ColumnType, Row};

/// Largest magnitude (exclusive) still treated as `Float`.
pub const FLOAT_MAX_MAGNITUDE: f64 = 3.4e38;

/// Longest canonical rendering, without the decimal point, still treated as
/// `Float`.
pub const FLOAT_MAX_CHARS: usize = 7;

static INTEGER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]+$").expect("Invalid integer regex"));

static DECIMAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?[0-9]*\.?[0-9]+([eE][+-]?[0-9]+)?$").expect("Invalid decimal regex")
});

/// Shape of a single trimmed, non-empty value.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ValueShape {
    Integer { fits_i32: bool },
    Decimal { value: f64 },
    Text,
}

fn classify(value: &str) -> ValueShape {
    if INTEGER_REGEX.is_match(value) {
        // Digit strings too long for i32 all land outside its range.
        return ValueShape::Integer {
            fits_i32: value.parse::<i32>().is_ok(),
        };
    }
    if DECIMAL_REGEX.is_match(value)
        && let Ok(parsed) = value.parse::<f64>()
        && parsed.is_finite()
    {
        return ValueShape::Decimal { value: parsed };
    }
    ValueShape::Text
}

fn fits_float(value: f64) -> bool {
    value.abs() < FLOAT_MAX_MAGNITUDE && precision_chars(value) <= FLOAT_MAX_CHARS
}

fn precision_chars(value: f64) -> usize {
    canonical_number(value).chars().filter(|&c| c != '.').count()
}

/// Next type for `current` after seeing a value, or `None` once the column
/// has to fall back to `String`.
fn widen(current: ColumnType, shape: ValueShape) -> Option<ColumnType> {
    match shape {
        ValueShape::Integer { fits_i32 } => Some(match current {
            ColumnType::String if fits_i32 => ColumnType::Int,
            ColumnType::String => ColumnType::Long,
            ColumnType::Int if !fits_i32 => ColumnType::Long,
            other => other,
        }),
        ValueShape::Decimal { value } => Some(match current {
            ColumnType::String | ColumnType::Int | ColumnType::Long if fits_float(value) => {
                ColumnType::Float
            }
            ColumnType::String | ColumnType::Int | ColumnType::Long => ColumnType::Double,
            ColumnType::Float if !fits_float(value) => ColumnType::Double,
            other => other,
        }),
        ValueShape::Text => None,
    }
}

/// Infers the type of one column from its values in sample order.
///
/// Empty and whitespace-only values are skipped. A column without any
/// usable value is `String`.
pub fn infer_column_type<'a, I>(values: I) -> ColumnType
where
    I: IntoIterator<Item = &'a str>,
{
    let mut detected = ColumnType::String;

    for raw in values {
        let value = raw.trim();
        if value.is_empty() {
            continue;
        }
        match widen(detected, classify(value)) {
            Some(next) => detected = next,
            None => return ColumnType::String,
        }
    }

    detected
}

/// Infers a type for every header column.
///
/// Values are looked up by name, so repeated header names share one entry.
pub fn infer_column_types(header: &[String], rows: &[Row]) -> BTreeMap<String, ColumnType> {
    let mut types = BTreeMap::new();

    for name in header {
        let column_type = infer_column_type(
            rows.iter()
                .filter_map(|row| row.get(name).map(String::as_str)),
        );
        trace!(column = %name, column_type = %column_type, "inferred column type");
        types.insert(name.clone(), column_type);
    }

    debug!(columns = types.len(), rows = rows.len(), "inferred column types");
    types
}

/// Renders a finite number the way ECMAScript's `Number.prototype.toString`
/// does: shortest round-trip digits, plain notation for decimal exponents in
/// `-7..21`, otherwise `d.ddde±x`.
///
/// ```
/// use xsv_ingest::canonical_number;
///
/// assert_eq!(canonical_number(4.20), "4.2");
/// assert_eq!(canonical_number(0.000_001), "0.000001");
/// assert_eq!(canonical_number(1e-7), "1e-7");
/// assert_eq!(canonical_number(3e38), "3e+38");
/// ```
pub fn canonical_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let scientific = format!("{:e}", value.abs());
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let exponent: i32 = exponent.parse().unwrap_or(0);

    // Decimal point position relative to the start of `digits`.
    let point = exponent + 1;
    let count = digits.len() as i32;

    let body = if count <= point && point <= 21 {
        format!("{digits}{}", "0".repeat((point - count) as usize))
    } else if 0 < point && point <= 21 {
        let (int_part, frac_part) = digits.split_at(point as usize);
        format!("{int_part}.{frac_part}")
    } else if -6 < point && point <= 0 {
        format!("0.{}{digits}", "0".repeat((-point) as usize))
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        let (lead, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{lead}e{sign}{}", exponent.abs())
        } else {
            format!("{lead}.{rest}e{sign}{}", exponent.abs())
        }
    };

    if value < 0.0 { format!("-{body}") } else { body }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn infer(values: &[&str]) -> ColumnType {
        infer_column_type(values.iter().copied())
    }

    #[test]
    fn test_integer_bounds() {
        assert_eq!(infer(&["2147483647"]), ColumnType::Int);
        assert_eq!(infer(&["-2147483648"]), ColumnType::Int);
        assert_eq!(infer(&["2147483648"]), ColumnType::Long);
        assert_eq!(infer(&["-2147483649"]), ColumnType::Long);
        assert_eq!(infer(&["1", "2147483648"]), ColumnType::Long);
        assert_eq!(infer(&["2147483648", "1"]), ColumnType::Long);
        assert_eq!(infer(&["123456789012345678901234567890"]), ColumnType::Long);
    }

    #[test]
    fn test_float_double_boundary() {
        assert_eq!(infer(&["123.4567"]), ColumnType::Float);
        assert_eq!(infer(&["123.45678"]), ColumnType::Double);
        assert_eq!(infer(&["3.5e38"]), ColumnType::Double);
        assert_eq!(infer(&["3e38"]), ColumnType::Float);
        assert_eq!(infer(&["0.5"]), ColumnType::Float);
        assert_eq!(infer(&[".5"]), ColumnType::Float);
    }

    #[test]
    fn test_widening_is_monotonic() {
        assert_eq!(infer(&["1", "2.5"]), ColumnType::Float);
        assert_eq!(infer(&["2.5", "1"]), ColumnType::Float);
        assert_eq!(infer(&["1.5", "3.14159265", "2.5"]), ColumnType::Double);
        assert_eq!(infer(&["3.14159265", "1"]), ColumnType::Double);
        assert_eq!(infer(&["2147483648", "0.5"]), ColumnType::Float);
        assert_eq!(infer(&["1.5", "3.5e38"]), ColumnType::Double);
        assert_eq!(infer(&["3.5e38", "1.5"]), ColumnType::Double);
    }

    #[test]
    fn test_text_is_absorbing() {
        assert_eq!(infer(&["1", "x", "2"]), ColumnType::String);
        assert_eq!(infer(&["1.5", "2.5", "n/a"]), ColumnType::String);
        assert_eq!(infer(&["abc", "1"]), ColumnType::String);
        assert_eq!(infer(&["1e999"]), ColumnType::String);
        assert_eq!(infer(&["1."]), ColumnType::String);
    }

    #[test]
    fn test_empty_values_skipped() {
        assert_eq!(infer(&["", "  ", "42", ""]), ColumnType::Int);
        assert_eq!(infer(&[]), ColumnType::String);
        assert_eq!(infer(&["", " "]), ColumnType::String);
        assert_eq!(infer(&[" 7 "]), ColumnType::Int);
    }

    #[test]
    fn test_infer_column_types_by_header() {
        let header: Vec<String> = ["id", "len", "supp", "dose", "blank"]
            .iter()
            .map(ToString::to_string)
            .collect();
        let rows: Vec<Row> = [["1", "4.2", "VC", "0.5"], ["2", "11.5", "VC", "0.5"]]
            .iter()
            .map(|values| {
                header
                    .iter()
                    .zip(values.iter())
                    .map(|(k, v)| (k.clone(), (*v).to_string()))
                    .collect()
            })
            .collect();

        let types = infer_column_types(&header, &rows);
        assert_eq!(types["id"], ColumnType::Int);
        assert_eq!(types["len"], ColumnType::Float);
        assert_eq!(types["supp"], ColumnType::String);
        assert_eq!(types["dose"], ColumnType::Float);
        assert_eq!(types["blank"], ColumnType::String);
    }

    #[test]
    fn test_canonical_number() {
        assert_eq!(canonical_number(123.4567), "123.4567");
        assert_eq!(canonical_number(-1.5), "-1.5");
        assert_eq!(canonical_number(1e21), "1e+21");
        assert_eq!(canonical_number(1e20), "100000000000000000000");
        assert_eq!(canonical_number(1.5e-7), "1.5e-7");
        assert_eq!(canonical_number(0.0001234), "0.0001234");
        assert_eq!(canonical_number(-0.0), "0");
        assert_eq!(canonical_number(100.0), "100");
    }
}
