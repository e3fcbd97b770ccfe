//! Data model for delimited-file format detection.
//!
//! - [`ColumnType`]: the value types a column can be inferred as
//! - [`XsvMetadata`]: delimiter, header and per-column types of a file
//! - [`Header`] / [`Row`]: the parsed shape of a sample

pub mod column_type;
pub mod metadata;

pub use column_type::ColumnType;
pub use metadata::{Header, Row, XsvMetadata};
