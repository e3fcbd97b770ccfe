//! Detection results handed to the import form.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ColumnType;

/// Column names in file order. Duplicates are kept as they appear.
pub type Header = Vec<String>;

/// One sampled record keyed by column name.
///
/// Built by inserting header names in order, so when a header name repeats
/// the later column's value replaces the earlier one.
pub type Row = BTreeMap<String, String>;

/// Format of a delimited file as detected from a bounded prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XsvMetadata {
    /// Field separator, either supplied by the caller or detected.
    pub delimiter: char,
    /// Column names from the first record.
    pub header: Header,
    /// Inferred type per column name.
    pub types: BTreeMap<String, ColumnType>,
}

impl XsvMetadata {
    /// Returns the inferred type of a column, `String` if it is unknown.
    pub fn type_of(&self, column: &str) -> ColumnType {
        self.types.get(column).copied().unwrap_or_default()
    }

    /// Iterates `(name, type)` pairs in header order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, ColumnType)> + '_ {
        self.header
            .iter()
            .map(|name| (name.as_str(), self.type_of(name)))
    }

    /// Returns the number of header columns.
    pub fn len(&self) -> usize {
        self.header.len()
    }

    /// Returns true if no header was found.
    pub fn is_empty(&self) -> bool {
        self.header.is_empty()
    }
}
