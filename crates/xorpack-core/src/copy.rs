//! Fixed-length obfuscating copy with a reusable chunk buffer.
//!
//! Content is streamed in chunks no larger than the configured chunk size, so
//! memory use stays bounded no matter how large a file is. The same buffer is
//! reused for every record of an archive.

use std::io::ErrorKind;
use std::io::Read;
use std::io::Write;
use std::io::{self};

use crate::format::Key;

/// Default chunk size for streaming record content (1 MiB).
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// Heap buffer sized once per archive operation.
///
/// # Examples
///
/// ```
/// use xorpack_core::copy::ChunkBuffer;
///
/// let buffer = ChunkBuffer::new(4096);
/// assert_eq!(buffer.size(), 4096);
/// ```
#[derive(Debug)]
pub struct ChunkBuffer {
    buf: Vec<u8>,
}

impl ChunkBuffer {
    /// Allocates a zeroed buffer of `size` bytes (at least one).
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            buf: vec![0u8; size.max(1)],
        }
    }

    /// Returns the buffer size in bytes.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.buf.len()
    }
}

impl Default for ChunkBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

/// Which side of a copy failed.
#[derive(Debug)]
pub enum CopyError {
    /// Reading from the source failed.
    Read(io::Error),
    /// Writing to the destination failed.
    Write(io::Error),
}

/// Copies up to `len` bytes from `reader` to `writer`, XORing each chunk
/// with `key` on the way.
///
/// Stops early only at end of input; the returned count is then less than
/// `len` and the caller decides how to report the shortfall. Interrupted
/// reads are retried.
///
/// # Errors
///
/// Returns `CopyError::Read` or `CopyError::Write` for the side that failed.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use xorpack_core::copy::{ChunkBuffer, copy_obfuscated};
/// use xorpack_core::format::Key;
///
/// let key = Key::new(0x20).unwrap();
/// let mut buffer = ChunkBuffer::new(2);
/// let mut out = Vec::new();
///
/// let n = copy_obfuscated(&mut Cursor::new(b"abc"), &mut out, 3, key, &mut buffer).unwrap();
/// assert_eq!(n, 3);
/// assert_eq!(out, b"ABC");
/// ```
pub fn copy_obfuscated<R, W>(
    reader: &mut R,
    writer: &mut W,
    len: u64,
    key: Key,
    buffer: &mut ChunkBuffer,
) -> Result<u64, CopyError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut copied: u64 = 0;

    while copied < len {
        let want = usize::try_from(len - copied)
            .map_or(buffer.buf.len(), |remaining| remaining.min(buffer.buf.len()));
        let chunk = &mut buffer.buf[..want];

        let n = match reader.read(chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(CopyError::Read(e)),
        };

        key.apply(&mut chunk[..n]);
        writer.write_all(&chunk[..n]).map_err(CopyError::Write)?;
        copied += n as u64;
    }

    Ok(copied)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn key(k: u8) -> Key {
        Key::new(k).unwrap()
    }

    #[test]
    fn test_buffer_sizes() {
        assert_eq!(ChunkBuffer::default().size(), DEFAULT_CHUNK_SIZE);
        assert_eq!(ChunkBuffer::new(0).size(), 1);
    }

    #[test]
    fn test_copy_zero_length() {
        let mut buffer = ChunkBuffer::new(16);
        let mut out = Vec::new();
        let n = copy_obfuscated(&mut Cursor::new(b"ignored"), &mut out, 0, key(1), &mut buffer)
            .unwrap();
        assert_eq!(n, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_copy_stops_at_len() {
        let mut buffer = ChunkBuffer::new(16);
        let mut input = Cursor::new(b"abcdef".to_vec());
        let mut out = Vec::new();

        let n = copy_obfuscated(&mut input, &mut out, 4, key(0xFF), &mut buffer).unwrap();
        assert_eq!(n, 4);
        assert_eq!(input.position(), 4);
        assert_eq!(out, b"abcd".map(|b| b ^ 0xFF));
    }

    #[test]
    fn test_copy_short_input() {
        let mut buffer = ChunkBuffer::new(16);
        let mut out = Vec::new();
        let n = copy_obfuscated(&mut Cursor::new(b"ab"), &mut out, 10, key(7), &mut buffer)
            .unwrap();
        assert_eq!(n, 2);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_copy_across_chunk_boundaries() {
        let data: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        for chunk in [1, 7, 256, 999, 1000, 1001] {
            let mut buffer = ChunkBuffer::new(chunk);
            let mut out = Vec::new();
            let n = copy_obfuscated(&mut Cursor::new(&data), &mut out, 1000, key(0x5A), &mut buffer)
                .unwrap();
            assert_eq!(n, 1000);
            key(0x5A).apply(&mut out);
            assert_eq!(out, data, "chunk size {chunk}");
        }
    }

    #[test]
    fn test_copy_retries_interrupted_reads() {
        struct Interrupting {
            data: Cursor<Vec<u8>>,
            calls: usize,
        }

        impl Read for Interrupting {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                self.calls += 1;
                if !self.calls.is_multiple_of(2) {
                    return Err(io::Error::new(ErrorKind::Interrupted, "interrupted"));
                }
                self.data.read(buf)
            }
        }

        let mut reader = Interrupting {
            data: Cursor::new(vec![9u8; 100]),
            calls: 0,
        };
        let mut buffer = ChunkBuffer::new(10);
        let mut out = Vec::new();
        let n = copy_obfuscated(&mut reader, &mut out, 100, key(9), &mut buffer).unwrap();
        assert_eq!(n, 100);
        assert!(out.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_copy_reports_write_failure() {
        struct Failing;

        impl Write for Failing {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::other("disk full"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut buffer = ChunkBuffer::new(4);
        let result = copy_obfuscated(&mut Cursor::new(b"abcd"), &mut Failing, 4, key(1), &mut buffer);
        assert!(matches!(result, Err(CopyError::Write(_))));
    }
}
