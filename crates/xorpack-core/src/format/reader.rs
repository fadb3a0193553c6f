//! Linear archive reader.

use std::io::ErrorKind;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::io::Write;
use std::io::{self};
use std::path::Path;
use std::path::PathBuf;

use super::key::Key;
use super::record::RecordMetadata;
use super::wire::LENGTH_FIELD_SIZE;
use super::wire::decode_u64;
use crate::PackError;
use crate::RecordField;
use crate::Result;
use crate::copy::ChunkBuffer;
use crate::copy::CopyError;
use crate::copy::copy_obfuscated;
use crate::types::SafePath;

/// Scans an archive one record at a time.
///
/// The reader measures the stream once up front and refuses any declared
/// length that runs past the end, so a corrupt or hostile length field can
/// neither force a large allocation nor make the scan wander off the end.
///
/// After [`next_header`](Self::next_header) returns a record, either
/// [`copy_content_to`](Self::copy_content_to) reads its content or the next
/// call to `next_header` skips it.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use xorpack_core::format::reader::ArchiveReader;
///
/// // Key 1, path "a" (length 1), content length 0.
/// let mut bytes = vec![1u8];
/// bytes.extend([0u8, 0, 0, 0, 0, 0, 0, 1].map(|b| b ^ 1));
/// bytes.push(b'a' ^ 1);
/// bytes.extend([0u8; 8].map(|b| b ^ 1));
///
/// let mut reader = ArchiveReader::new(Cursor::new(bytes))?;
/// let record = reader.next_header()?.unwrap();
/// assert_eq!(record.path.as_str(), "a");
/// assert_eq!(record.content_len, 0);
/// assert!(reader.next_header()?.is_none());
/// reader.finish()?;
/// # Ok::<(), xorpack_core::PackError>(())
/// ```
#[derive(Debug)]
pub struct ArchiveReader<R> {
    inner: R,
    path: PathBuf,
    len: u64,
    position: u64,
    next_index: usize,
    current_key: Option<Key>,
    pending: u64,
}

impl<R: Read + Seek> ArchiveReader<R> {
    /// Wraps an unnamed stream.
    ///
    /// # Errors
    ///
    /// Returns `PackError::Read` if the stream cannot be measured.
    pub fn new(inner: R) -> Result<Self> {
        Self::named(inner, "<stream>")
    }

    /// Wraps a stream; `path` names the archive in error messages.
    ///
    /// # Errors
    ///
    /// Returns `PackError::Read` if the stream cannot be measured.
    pub fn named(mut inner: R, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let measure = |inner: &mut R| -> io::Result<u64> {
            let len = inner.seek(SeekFrom::End(0))?;
            inner.seek(SeekFrom::Start(0))?;
            Ok(len)
        };
        let len = measure(&mut inner).map_err(|source| PackError::Read {
            path: path.clone(),
            source,
        })?;

        Ok(Self {
            inner,
            path,
            len,
            position: 0,
            next_index: 0,
            current_key: None,
            pending: 0,
        })
    }

    /// Total archive length in bytes.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Whether the archive holds no bytes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes consumed so far.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Bytes left after the current position.
    #[must_use]
    pub fn remaining(&self) -> u64 {
        self.len - self.position
    }

    /// The archive's name for error messages.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the next record header, skipping the previous record's unread
    /// content first. Returns `None` once the archive is exhausted.
    ///
    /// The relative path is validated before this returns, so nothing is
    /// written for a record with an unsafe path.
    ///
    /// # Errors
    ///
    /// - `PackError::ShortRead` if a field or a declared length runs past
    ///   the end of the archive
    /// - `PackError::InvalidKey` for key zero
    /// - `PackError::InvalidPath` for a path that is not UTF-8
    /// - `PackError::UnsafePath` for an unsafe path
    pub fn next_header(&mut self) -> Result<Option<RecordMetadata>> {
        self.skip_content()?;
        if self.remaining() == 0 {
            return Ok(None);
        }

        let offset = self.position;
        let mut key_byte = [0u8; 1];
        self.read_field(&mut key_byte, RecordField::Key)?;
        let key = Key::new(key_byte[0]).ok_or_else(|| PackError::InvalidKey {
            path: self.path.clone(),
            offset,
        })?;

        let path_len = self.read_length(key, RecordField::PathLength)?;
        self.ensure_available(path_len, RecordField::Path)?;
        let path_size =
            usize::try_from(path_len).map_err(|_| self.short(RecordField::Path, path_len))?;
        let mut raw = vec![0u8; path_size];
        self.read_field(&mut raw, RecordField::Path)?;
        key.apply(&mut raw);

        let text = String::from_utf8(raw).map_err(|_| PackError::InvalidPath {
            path: self.path.clone(),
            reason: format!("record at offset {offset} has a relative path that is not UTF-8"),
        })?;
        let path = SafePath::validate(&text)?;

        let content_len = self.read_length(key, RecordField::ContentLength)?;
        self.ensure_available(content_len, RecordField::Content)?;

        let index = self.next_index;
        self.next_index += 1;
        self.current_key = Some(key);
        self.pending = content_len;

        Ok(Some(RecordMetadata {
            index,
            offset,
            key,
            path_len,
            path,
            content_len,
        }))
    }

    /// Streams the current record's content, de-obfuscated, into `writer`.
    ///
    /// `target` names the destination in write errors. Returns the number of
    /// bytes written; calling it twice for one record writes nothing the
    /// second time.
    ///
    /// # Errors
    ///
    /// Returns `PackError::ShortRead` if the archive ends early,
    /// `PackError::Read` or `PackError::Write` for I/O failures.
    pub fn copy_content_to<W: Write + ?Sized>(
        &mut self,
        writer: &mut W,
        target: &Path,
        buffer: &mut ChunkBuffer,
    ) -> Result<u64> {
        let Some(key) = self.current_key else {
            return Ok(0);
        };
        let expected = self.pending;

        let copied = copy_obfuscated(&mut self.inner, writer, expected, key, buffer).map_err(
            |e| match e {
                CopyError::Read(source) => PackError::Read {
                    path: self.path.clone(),
                    source,
                },
                CopyError::Write(source) => PackError::Write {
                    path: target.to_path_buf(),
                    source,
                },
            },
        )?;

        self.position += copied;
        self.pending = 0;
        if copied < expected {
            return Err(PackError::ShortRead {
                field: RecordField::Content,
                path: self.path.clone(),
                expected,
                actual: copied,
            });
        }
        Ok(copied)
    }

    /// Checks that every byte of the archive was accounted for.
    ///
    /// # Errors
    ///
    /// Returns `PackError::Incomplete` if bytes remain unconsumed.
    pub fn finish(&mut self) -> Result<()> {
        self.skip_content()?;
        if self.position != self.len {
            return Err(PackError::Incomplete {
                path: self.path.clone(),
                accounted: self.position,
                total: self.len,
            });
        }
        Ok(())
    }

    /// Consumes the reader and returns the stream.
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn skip_content(&mut self) -> Result<()> {
        if self.pending == 0 {
            return Ok(());
        }
        let target = self.position + self.pending;
        self.inner
            .seek(SeekFrom::Start(target))
            .map_err(|source| PackError::Read {
                path: self.path.clone(),
                source,
            })?;
        self.position = target;
        self.pending = 0;
        Ok(())
    }

    fn read_length(&mut self, key: Key, field: RecordField) -> Result<u64> {
        let mut bytes = [0u8; LENGTH_FIELD_SIZE];
        self.read_field(&mut bytes, field)?;
        Ok(decode_u64(key.applied(bytes)))
    }

    fn ensure_available(&self, needed: u64, field: RecordField) -> Result<()> {
        if needed > self.remaining() {
            return Err(self.short(field, needed));
        }
        Ok(())
    }

    fn read_field(&mut self, buf: &mut [u8], field: RecordField) -> Result<()> {
        let needed = buf.len() as u64;
        self.ensure_available(needed, field)?;

        self.inner.read_exact(buf).map_err(|source| {
            if source.kind() == ErrorKind::UnexpectedEof {
                self.short(field, needed)
            } else {
                PackError::Read {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;
        self.position += needed;
        Ok(())
    }

    fn short(&self, field: RecordField, expected: u64) -> PackError {
        PackError::ShortRead {
            field,
            path: self.path.clone(),
            expected,
            actual: self.remaining(),
        }
    }
}
