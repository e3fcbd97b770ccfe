//! Error types for delimited-file sampling.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while computing file metadata.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IngestError {
    // === Source Errors ===
    /// File could not be opened as a byte source.
    #[error("failed to open {path}: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A chunk read against the byte source failed.
    #[error("error while reading file content at offset {offset}: {source}")]
    Acquisition {
        offset: u64,
        #[source]
        source: std::io::Error,
    },

    // === Parsing Errors ===
    /// Sample is not valid delimited text for the chosen delimiter.
    #[error("error while parsing XSV: {reason}")]
    Parse {
        reason: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Delimiter cannot be used by the CSV reader.
    #[error("delimiter {delimiter:?} is not a single-byte character")]
    InvalidDelimiter { delimiter: char },

    // === Request Errors ===
    /// Options failed validation.
    #[error("invalid options: {reason}")]
    InvalidOptions { reason: String },

    /// Request was superseded before it finished.
    #[error("metadata request was cancelled")]
    Cancelled,
}

impl IngestError {
    /// Returns true if the request was cancelled rather than failed.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, IngestError::Cancelled)
    }
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        let reason = match err.position() {
            Some(position) => format!("line {}: {err}", position.line()),
            None => err.to_string(),
        };
        Self::Parse {
            reason,
            source: Some(err),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
