//! Bounded text sampling from a byte source.
//!
//! Bytes are pulled in fixed-size chunks and decoded with a streaming UTF-8
//! decoder, so a multi-byte character split across two chunks is decoded
//! as one character. Reading stops as soon as more than `line_limit`
//! newlines have been seen, or at end of input.

use encoding_rs::{CoderResult, Decoder, UTF_8};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cancel::CancellationToken;
use crate::error::{IngestError, Result};
use crate::source::ByteSource;

/// Default number of bytes requested per read.
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Default number of lines kept in a sample (header included).
pub const DEFAULT_LINE_LIMIT: usize = 30;

/// Options for bounded sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcquireOptions {
    /// Number of complete lines to keep.
    pub line_limit: usize,
    /// Number of bytes requested per read.
    pub chunk_size: usize,
}

impl Default for AcquireOptions {
    fn default() -> Self {
        Self {
            line_limit: DEFAULT_LINE_LIMIT,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl AcquireOptions {
    /// Set the number of lines to keep.
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

    /// Checks that both limits are positive.
    pub fn validate(&self) -> Result<()> {
        if self.line_limit == 0 {
            return Err(IngestError::InvalidOptions {
                reason: "line limit must be at least 1".to_string(),
            });
        }
        if self.chunk_size == 0 {
            return Err(IngestError::InvalidOptions {
                reason: "chunk size must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Reads a bounded text prefix from `source`.
///
/// The returned sample holds the first `line_limit` complete lines without
/// the trailing newline, or the whole input if it has no more than
/// `line_limit` newlines. A UTF-8 BOM is dropped and invalid byte sequences
/// are replaced with U+FFFD.
///
/// # Errors
///
/// - [`IngestError::InvalidOptions`] for a zero line limit or chunk size
/// - [`IngestError::Cancelled`] if `cancel` fires before a read
/// - [`IngestError::Acquisition`] if a read fails
pub fn acquire<S>(source: &S, options: &AcquireOptions, cancel: &CancellationToken) -> Result<String>
where
    S: ByteSource + ?Sized,
{
    options.validate()?;

    let mut decoder = UTF_8.new_decoder_with_bom_removal();
    let mut text = String::new();
    let mut offset = 0u64;
    let mut newlines = 0usize;
    let mut chunks = 0usize;
    let mut malformed = false;

    loop {
        if cancel.is_cancelled() {
            debug!(offset, chunks, "sampling cancelled");
            return Err(IngestError::Cancelled);
        }

        let chunk = source
            .read(offset, options.chunk_size)
            .map_err(|e| IngestError::Acquisition { offset, source: e })?;

        if chunk.is_empty() {
            malformed |= decode_into(&mut decoder, &[], &mut text, true);
            if malformed {
                warn!("sample contains invalid UTF-8; bad sequences were replaced");
            }
            debug!(
                chunks,
                bytes = offset,
                lines = newlines,
                "reached end of input while sampling"
            );
            return Ok(text);
        }

        chunks += 1;
        let appended_from = text.len();
        malformed |= decode_into(&mut decoder, &chunk, &mut text, false);
        offset += chunk.len() as u64;
        newlines += text[appended_from..].matches('\n').count();

        debug!(offset, bytes = chunk.len(), lines = newlines, "read sample chunk");

        if newlines > options.line_limit {
            let cut = text
                .match_indices('\n')
                .nth(options.line_limit - 1)
                .map_or(text.len(), |(idx, _)| idx);
            text.truncate(cut);
            if malformed {
                warn!("sample contains invalid UTF-8; bad sequences were replaced");
            }
            debug!(
                chunks,
                bytes = offset,
                sample_len = text.len(),
                "line limit reached"
            );
            return Ok(text);
        }
    }
}

/// Decodes `bytes` onto the end of `text`, returning true if any
/// replacement characters were produced.
fn decode_into(decoder: &mut Decoder, bytes: &[u8], text: &mut String, last: bool) -> bool {
    let mut remaining = bytes;
    let mut replaced = false;

    loop {
        let needed = decoder
            .max_utf8_buffer_length(remaining.len())
            .unwrap_or_else(|| remaining.len().saturating_add(4));
        text.reserve(needed);

        let (result, read, had_replacements) = decoder.decode_to_string(remaining, text, last);
        replaced |= had_replacements;
        remaining = &remaining[read..];

        match result {
            CoderResult::InputEmpty => return replaced,
            CoderResult::OutputFull => continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use std::cell::RefCell;
    use std::io;

    /// Records every requested offset.
    struct RecordingSource {
        inner: MemorySource,
        offsets: RefCell<Vec<u64>>,
    }

    impl RecordingSource {
        fn new(text: &str) -> Self {
            Self {
                inner: MemorySource::from(text),
                offsets: RefCell::new(Vec::new()),
            }
        }
    }

    impl ByteSource for RecordingSource {
        fn read(&self, offset: u64, length: usize) -> io::Result<Vec<u8>> {
            self.offsets.borrow_mut().push(offset);
            self.inner.read(offset, length)
        }
    }

    struct FailingSource;

    impl ByteSource for FailingSource {
        fn read(&self, _offset: u64, _length: usize) -> io::Result<Vec<u8>> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "no access"))
        }
    }

    fn sample(text: &str, lines: usize, chunk: usize) -> String {
        let options = AcquireOptions::default()
            .with_line_limit(lines)
            .with_chunk_size(chunk);
        acquire(&MemorySource::from(text), &options, &CancellationToken::new()).unwrap()
    }

    #[test]
    fn test_stops_at_line_limit() {
        assert_eq!(sample("l1\nl2\nl3\nl4\nl5\n", 2, 8192), "l1\nl2");
    }

    #[test]
    fn test_returns_everything_at_eof() {
        assert_eq!(sample("a,b\n1,2", 30, 8192), "a,b\n1,2");
        assert_eq!(sample("a,b\n1,2\n", 30, 8192), "a,b\n1,2\n");
        assert_eq!(sample("", 30, 8192), "");
    }

    #[test]
    fn test_multibyte_split_across_chunks() {
        let text = "név,város\nÁrpád,Győr\n";
        for chunk in 1..8 {
            assert_eq!(sample(text, 30, chunk), text, "chunk size {chunk}");
        }
    }

    #[test]
    fn test_bom_is_removed() {
        let options = AcquireOptions::default();
        let source = MemorySource::new(b"\xEF\xBB\xBFa,b\n1,2".to_vec());
        let text = acquire(&source, &options, &CancellationToken::new()).unwrap();
        assert_eq!(text, "a,b\n1,2");
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let options = AcquireOptions::default();
        let source = MemorySource::new(b"a,\xFF\n".to_vec());
        let text = acquire(&source, &options, &CancellationToken::new()).unwrap();
        assert_eq!(text, "a,\u{FFFD}\n");
    }

    #[test]
    fn test_offsets_increase_by_chunk_size() {
        let source = RecordingSource::new("aaaa\nbbbb\ncccc\n");
        let options = AcquireOptions::default()
            .with_line_limit(30)
            .with_chunk_size(4);
        acquire(&source, &options, &CancellationToken::new()).unwrap();
        assert_eq!(*source.offsets.borrow(), vec![0, 4, 8, 12, 15]);
    }

    #[test]
    fn test_no_reads_after_limit() {
        let source = RecordingSource::new("a\nb\nc\nd\ne\nf\n");
        let options = AcquireOptions::default()
            .with_line_limit(1)
            .with_chunk_size(4);
        let text = acquire(&source, &options, &CancellationToken::new()).unwrap();
        assert_eq!(text, "a");
        assert_eq!(*source.offsets.borrow(), vec![0]);
    }

    #[test]
    fn test_read_failure_is_wrapped() {
        let options = AcquireOptions::default();
        let result = acquire(&FailingSource, &options, &CancellationToken::new());
        match result {
            Err(IngestError::Acquisition { offset, source }) => {
                assert_eq!(offset, 0);
                assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
            }
            other => panic!("expected acquisition error, got {other:?}"),
        }
    }

    #[test]
    fn test_cancelled_before_first_read() {
        let source = RecordingSource::new("a,b\n1,2\n");
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = acquire(&source, &AcquireOptions::default(), &cancel);
        assert!(matches!(result, Err(IngestError::Cancelled)));
        assert!(source.offsets.borrow().is_empty());
    }

    #[test]
    fn test_zero_limits_rejected() {
        let source = MemorySource::from("a\n");
        let cancel = CancellationToken::new();
        let zero_lines = AcquireOptions::default().with_line_limit(0);
        let zero_chunk = AcquireOptions::default().with_chunk_size(0);
        assert!(matches!(
            acquire(&source, &zero_lines, &cancel),
            Err(IngestError::InvalidOptions { .. })
        ));
        assert!(matches!(
            acquire(&source, &zero_chunk, &cancel),
            Err(IngestError::InvalidOptions { .. })
        ));
    }
}
