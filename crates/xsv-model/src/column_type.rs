//! Value types inferred for sampled columns.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Inferred value type of a delimited-file column.
///
/// Numeric types form a widening order: `Int` widens to `Long`, and
/// `Int`/`Long` widen to `Float`, which widens to `Double`.
///
/// `String` plays two roles. It is the type of a column with no usable
/// values yet, and it is the absorbing type reached as soon as a
/// non-numeric value is seen. Inference never leaves it in the second role.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ColumnType {
    /// Free text, or no evidence of anything narrower.
    #[default]
    String,
    /// Integer within the signed 32-bit range.
    Int,
    /// Integer outside the signed 32-bit range.
    Long,
    /// Decimal with a short rendering and magnitude below 3.4e38.
    Float,
    /// Any other finite decimal.
    Double,
}

impl ColumnType {
    /// All types, in declaration order.
    pub const ALL: [ColumnType; 5] = [
        ColumnType::String,
        ColumnType::Int,
        ColumnType::Long,
        ColumnType::Float,
        ColumnType::Double,
    ];

    /// Returns the canonical name used in import specs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::String => "String",
            ColumnType::Int => "Int",
            ColumnType::Long => "Long",
            ColumnType::Float => "Float",
            ColumnType::Double => "Double",
        }
    }

    /// Returns true for every type except `String`.
    pub fn is_numeric(&self) -> bool {
        !matches!(self, ColumnType::String)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = String;

    /// Parse a type name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();

        match normalized.as_str() {
            "STRING" => Ok(ColumnType::String),
            "INT" => Ok(ColumnType::Int),
            "LONG" => Ok(ColumnType::Long),
            "FLOAT" => Ok(ColumnType::Float),
            "DOUBLE" => Ok(ColumnType::Double),
            _ => Err(format!("Unknown column type: {s}")),
        }
    }
}
