//! Format detection for delimited text files from a bounded prefix.
//!
//! This crate reads only the first lines of a file through a [`ByteSource`]
//! and reports its delimiter, header and per-column value types, so an
//! import form can suggest a format without loading the whole file.
//!
//! # Pipeline
//!
//! - **Sampling** ([`acquire`]): chunked reads, streaming UTF-8 decoding,
//!   stop after a line budget
//! - **Delimiter detection** ([`detect_delimiter`]): consistency of
//!   per-line column counts over a fixed candidate list
//! - **Parsing** ([`parse_sample`]): quote-aware split into header and rows
//! - **Type inference** ([`infer_column_types`]): monotonic widening from
//!   `Int` up to `Double`, `String` on anything non-numeric
//!
//! # Example
//!
//! ```ignore
//! use xsv_ingest::{FileSource, MetadataOptions, compute_metadata};
//!
//! let source = FileSource::open("samples/ToothGrowth.csv")?;
//! let metadata = compute_metadata(&source, &MetadataOptions::default())?;
//! println!("{:?} {:?}", metadata.delimiter, metadata.types);
//! ```

mod acquire;
mod cancel;
mod detect;
mod error;
mod infer;
mod metadata;
mod parse;
mod source;

// === Error Types ===
pub use error::{IngestError, Result};

// === Byte Sources ===
pub use cancel::CancellationToken;
pub use source::{ByteSource, FileSource, MemorySource};

// === Sampling ===
pub use acquire::{AcquireOptions, DEFAULT_CHUNK_SIZE, DEFAULT_LINE_LIMIT, acquire};

// === Delimiter Detection ===
pub use detect::{
    DEFAULT_DELIMITERS, DelimiterScore, RECORD_SEPARATOR, UNIT_SEPARATOR, detect_delimiter,
    detect_delimiter_with, part_counts, score_delimiter,
};

// === Parsing ===
pub use parse::{ParsedSample, parse_sample};

// === Type Inference ===
pub use infer::{
    FLOAT_MAX_CHARS, FLOAT_MAX_MAGNITUDE, canonical_number, infer_column_type,
    infer_column_types,
};

// === Pipeline ===
pub use metadata::{MetadataOptions, compute_metadata, compute_metadata_with_cancel};

// === Model ===
pub use xsv_model::{ColumnType, Header, Row, XsvMetadata};
