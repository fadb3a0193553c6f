//! Streaming archive writer.

use std::io::Read;
use std::io::Write;
use std::io::{self};
use std::path::Path;
use std::path::PathBuf;

use super::key::Key;
use super::record::RecordHeader;
use crate::PackError;
use crate::Result;
use crate::copy::ChunkBuffer;
use crate::copy::CopyError;
use crate::copy::copy_obfuscated;
use crate::io::CountingWriter;
use crate::types::SafePath;

/// Appends obfuscated records to an output stream.
///
/// The writer tracks the byte length each record should occupy and, on
/// [`finish`](Self::finish), checks it against what actually reached the
/// stream.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use std::path::Path;
/// use xorpack_core::copy::ChunkBuffer;
/// use xorpack_core::format::Key;
/// use xorpack_core::format::writer::ArchiveWriter;
/// use xorpack_core::types::SafePath;
///
/// let mut writer = ArchiveWriter::new(Vec::new());
/// let mut buffer = ChunkBuffer::new(1024);
/// writer.write_record(
///     Key::new(7).unwrap(),
///     &SafePath::validate("a.txt")?,
///     &mut Cursor::new(b"hi"),
///     2,
///     Path::new("a.txt"),
///     &mut buffer,
/// )?;
/// let archive = writer.finish()?;
/// assert_eq!(archive.len(), 22 + 2);
/// # Ok::<(), xorpack_core::PackError>(())
/// ```
#[derive(Debug)]
pub struct ArchiveWriter<W: Write> {
    inner: CountingWriter<W>,
    path: PathBuf,
    records: usize,
    content_bytes: u64,
    expected_bytes: u64,
}

impl<W: Write> ArchiveWriter<W> {
    /// Wraps an in-memory or otherwise unnamed stream.
    pub fn new(inner: W) -> Self {
        Self::named(inner, "<stream>")
    }

    /// Wraps a stream; `path` names the archive in error messages.
    pub fn named(inner: W, path: impl Into<PathBuf>) -> Self {
        Self {
            inner: CountingWriter::new(inner),
            path: path.into(),
            records: 0,
            content_bytes: 0,
            expected_bytes: 0,
        }
    }

    /// Writes one record whose content is read from `content`.
    ///
    /// Exactly `content_len` bytes must be available from `content`; fewer
    /// or more is reported as a size change of `source`. Returns the record's
    /// length on the wire.
    ///
    /// # Errors
    ///
    /// Returns `PackError::Read` for a failing source, `PackError::Write` for
    /// a failing archive stream, and `PackError::SizeMismatch` if the source
    /// does not hold exactly `content_len` bytes.
    pub fn write_record<R: Read + ?Sized>(
        &mut self,
        key: Key,
        path: &SafePath,
        content: &mut R,
        content_len: u64,
        source: &Path,
        buffer: &mut ChunkBuffer,
    ) -> Result<u64> {
        let header = RecordHeader::new(key, path.clone(), content_len);
        let record_len = header.record_len().ok_or_else(|| PackError::InvalidPath {
            path: source.to_path_buf(),
            reason: "record length overflows a 64-bit counter".to_string(),
        })?;

        self.inner
            .write_all(&header.encode())
            .map_err(|source| self.write_error(source))?;

        let copied = copy_obfuscated(content, &mut self.inner, content_len, key, buffer)
            .map_err(|e| match e {
                CopyError::Read(e) => PackError::Read {
                    path: source.to_path_buf(),
                    source: e,
                },
                CopyError::Write(e) => self.write_error(e),
            })?;

        if copied < content_len {
            return Err(PackError::SizeMismatch {
                path: source.to_path_buf(),
                expected: content_len,
                actual: copied,
            });
        }

        let extra = io::copy(content, &mut io::sink()).map_err(|e| PackError::Read {
            path: source.to_path_buf(),
            source: e,
        })?;
        if extra > 0 {
            return Err(PackError::SizeMismatch {
                path: source.to_path_buf(),
                expected: content_len,
                actual: content_len.saturating_add(extra),
            });
        }

        self.records += 1;
        self.content_bytes += content_len;
        self.expected_bytes += record_len;
        Ok(record_len)
    }

    /// Number of records written.
    #[must_use]
    pub fn records(&self) -> usize {
        self.records
    }

    /// Sum of content lengths written.
    #[must_use]
    pub fn content_bytes(&self) -> u64 {
        self.content_bytes
    }

    /// Bytes that have reached the underlying stream.
    #[must_use]
    pub fn bytes_written(&self) -> u64 {
        self.inner.total_bytes()
    }

    /// Flushes the stream, checks byte accounting, and returns the stream.
    ///
    /// # Errors
    ///
    /// Returns `PackError::Write` if flushing fails and
    /// `PackError::Incomplete` if the bytes written differ from the sum of
    /// record lengths.
    pub fn finish(mut self) -> Result<W> {
        self.inner.flush().map_err(|source| self.write_error(source))?;

        let written = self.inner.total_bytes();
        if written != self.expected_bytes {
            return Err(PackError::Incomplete {
                path: self.path,
                accounted: written,
                total: self.expected_bytes,
            });
        }
        Ok(self.inner.into_inner())
    }

    fn write_error(&self, source: io::Error) -> PackError {
        PackError::Write {
            path: self.path.clone(),
            source,
        }
    }
}
