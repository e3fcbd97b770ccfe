//! Random-access byte sources that samples are read from.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{IngestError, Result};

/// Capability to read a byte range of some file.
///
/// A read may return fewer bytes than requested. An empty result means the
/// offset is at or past the end of the input. Total length is never asked
/// for up front.
pub trait ByteSource {
    /// Reads up to `length` bytes starting at `offset`.
    fn read(&self, offset: u64, length: usize) -> io::Result<Vec<u8>>;
}

impl<T: ByteSource + ?Sized> ByteSource for &T {
    fn read(&self, offset: u64, length: usize) -> io::Result<Vec<u8>> {
        (**self).read(offset, length)
    }
}

/// Byte source over an owned in-memory buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    bytes: Vec<u8>,
}

impl MemorySource {
    /// Creates a source over the given bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

}

impl From<&str> for MemorySource {
    fn from(text: &str) -> Self {
        Self::new(text.as_bytes())
    }
}

impl ByteSource for MemorySource {
    fn read(&self, offset: u64, length: usize) -> io::Result<Vec<u8>> {
        let len = self.bytes.len();
        let start = usize::try_from(offset).map_or(len, |offset| offset.min(len));
        let end = start.saturating_add(length).min(len);
        Ok(self.bytes[start..end].to_vec())
    }
}

/// Byte source over a local file, read with seek + read under a lock.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileSource {
    /// Opens a file for sampling.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|e| IngestError::FileOpen {
            path: path.clone(),
            source: e,
        })?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    /// Returns the path this source was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ByteSource for FileSource {
    fn read(&self, offset: u64, length: usize) -> io::Result<Vec<u8>> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| io::Error::other("file source lock poisoned"))?;
        file.seek(SeekFrom::Start(offset))?;

        let mut buffer = Vec::new();
        (&mut *file).take(length as u64).read_to_end(&mut buffer)?;
        Ok(buffer)
    }
}
