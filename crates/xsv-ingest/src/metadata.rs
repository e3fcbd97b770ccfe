//! End-to-end metadata computation: sample, detect, parse, infer.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};
use xsv_model::XsvMetadata;

use crate::acquire::{AcquireOptions, DEFAULT_CHUNK_SIZE, DEFAULT_LINE_LIMIT, acquire};
use crate::cancel::CancellationToken;
use crate::detect::detect_delimiter;
use crate::error::{IngestError, Result};
use crate::infer::infer_column_types;
use crate::parse::parse_sample;
use crate::source::ByteSource;

/// Options for a metadata request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataOptions {
    /// Delimiter to use. Detection is skipped when set.
    pub delimiter: Option<char>,

    /// Number of lines sampled, header included.
    /// Defaults to 30.
    pub line_limit: usize,

    /// Bytes requested per read.
    /// Defaults to 8192.
    pub chunk_size: usize,
}

impl Default for MetadataOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            line_limit: DEFAULT_LINE_LIMIT,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl MetadataOptions {
    /// Use a fixed delimiter instead of detecting one.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Option<char>) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the number of sampled lines.
    #[must_use]
    pub fn with_line_limit(mut self, lines: usize) -> Self {
        self.line_limit = lines;
        self
    }

    /// Set the read chunk size.
    #[must_use]
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Sampling part of these options.
    pub fn acquire_options(&self) -> AcquireOptions {
        AcquireOptions {
            line_limit: self.line_limit,
            chunk_size: self.chunk_size,
        }
    }

    /// Checks limits and, when given, that the delimiter is a single byte.
    pub fn validate(&self) -> Result<()> {
        self.acquire_options().validate()?;
        if let Some(delimiter) = self.delimiter
            && !delimiter.is_ascii()
        {
            return Err(IngestError::InvalidDelimiter { delimiter });
        }
        Ok(())
    }
}

/// Computes delimiter, header and column types from a bounded prefix of
/// `source`.
///
/// # Errors
///
/// See [`compute_metadata_with_cancel`].
pub fn compute_metadata<S>(source: &S, options: &MetadataOptions) -> Result<XsvMetadata>
where
    S: ByteSource + ?Sized,
{
    compute_metadata_with_cancel(source, options, &CancellationToken::new())
}

/// Like [`compute_metadata`], but gives up with [`IngestError::Cancelled`]
/// once `cancel` fires.
///
/// The token is checked before every read and again before parsing, so a
/// cancelled request never produces a result.
///
/// # Errors
///
/// - [`IngestError::InvalidOptions`] / [`IngestError::InvalidDelimiter`]
/// - [`IngestError::Acquisition`] if the source fails
/// - [`IngestError::Parse`] if the sample is not valid delimited text
/// - [`IngestError::Cancelled`]
pub fn compute_metadata_with_cancel<S>(
    source: &S,
    options: &MetadataOptions,
    cancel: &CancellationToken,
) -> Result<XsvMetadata>
where
    S: ByteSource + ?Sized,
{
    let span = info_span!(
        "compute_metadata",
        line_limit = options.line_limit,
        chunk_size = options.chunk_size
    );
    let _guard = span.enter();

    options.validate()?;

    let sample = acquire(source, &options.acquire_options(), cancel)?;
    if cancel.is_cancelled() {
        debug!("request cancelled after sampling");
        return Err(IngestError::Cancelled);
    }

    let delimiter = match options.delimiter {
        Some(delimiter) => delimiter,
        None => detect_delimiter(&sample),
    };

    let parsed = parse_sample(&sample, delimiter)?;
    let types = infer_column_types(&parsed.header, &parsed.rows);

    info!(
        delimiter = ?delimiter,
        detected = options.delimiter.is_none(),
        columns = parsed.header.len(),
        rows = parsed.rows.len(),
        "computed file metadata"
    );

    Ok(XsvMetadata {
        delimiter,
        header: parsed.header,
        types,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use xsv_model::ColumnType;

    #[test]
    fn test_supplied_delimiter_skips_detection() {
        // Detection would pick ';' here.
        let source = MemorySource::from("a;b;c,d\n1;2;3,4");
        assert_eq!(
            compute_metadata(&source, &MetadataOptions::default())
                .unwrap()
                .delimiter,
            ';'
        );

        let options = MetadataOptions::default().with_delimiter(Some(','));
        let metadata = compute_metadata(&source, &options).unwrap();
        assert_eq!(metadata.delimiter, ',');
        assert_eq!(metadata.header, vec!["a;b;c", "d"]);
        assert_eq!(metadata.types["d"], ColumnType::Int);
        assert_eq!(metadata.types["a;b;c"], ColumnType::String);
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let source = MemorySource::from("a,b");
        let options = MetadataOptions::default().with_delimiter(Some('→'));
        assert!(matches!(
            compute_metadata(&source, &options),
            Err(IngestError::InvalidDelimiter { .. })
        ));
    }

    #[test]
    fn test_defaults() {
        let options = MetadataOptions::default();
        assert_eq!(options.line_limit, 30);
        assert_eq!(options.chunk_size, 8192);
        assert!(options.delimiter.is_none());
    }

    #[test]
    fn test_builder_and_validation() {
        let options = MetadataOptions::default()
            .with_delimiter(Some('\t'))
            .with_line_limit(5)
            .with_chunk_size(16);
        assert_eq!(
            options.acquire_options(),
            AcquireOptions {
                line_limit: 5,
                chunk_size: 16
            }
        );
        assert!(options.validate().is_ok());
        assert!(options.with_line_limit(0).validate().is_err());
    }
}
