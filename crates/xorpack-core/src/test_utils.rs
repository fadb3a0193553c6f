//! Helpers for building archives byte by byte in tests.
//!
//! Unlike [`ArchiveWriter`](crate::format::ArchiveWriter), the builder does
//! no validation, so it can produce the malformed and hostile archives the
//! reader must reject.

use crate::format::wire::encode_u64;

/// Assembles archive bytes record by record.
///
/// # Examples
///
/// ```
/// use xorpack_core::test_utils::ArchiveBuilder;
///
/// let bytes = ArchiveBuilder::new()
///     .file(0x2A, "a", b"")
///     .raw_path(0x2A, b"../../etc/passwd", b"root")
///     .build();
/// assert_eq!(bytes.len(), 18 + (17 + 16 + 4));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArchiveBuilder {
    bytes: Vec<u8>,
}

impl ArchiveBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a well-formed record.
    #[must_use]
    pub fn file(self, key: u8, path: &str, content: &[u8]) -> Self {
        self.raw_path(key, path.as_bytes(), content)
    }

    /// Appends a record with arbitrary path bytes and correct lengths.
    #[must_use]
    pub fn raw_path(self, key: u8, path: &[u8], content: &[u8]) -> Self {
        self.raw_record(key, path, content.len() as u64, content)
    }

    /// Appends a record whose declared content length may disagree with the
    /// content actually supplied.
    #[must_use]
    pub fn raw_record(mut self, key: u8, path: &[u8], content_len: u64, content: &[u8]) -> Self {
        let start = self.bytes.len();
        self.bytes.push(key);
        self.bytes.extend_from_slice(&encode_u64(path.len() as u64));
        self.bytes.extend_from_slice(path);
        self.bytes.extend_from_slice(&encode_u64(content_len));
        self.bytes.extend_from_slice(content);
        for b in &mut self.bytes[start + 1..] {
            *b ^= key;
        }
        self
    }

    /// Drops the last `n` bytes.
    #[must_use]
    pub fn truncate(mut self, n: usize) -> Self {
        let len = self.bytes.len().saturating_sub(n);
        self.bytes.truncate(len);
        self
    }

    /// Appends bytes verbatim.
    #[must_use]
    pub fn trailing(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    /// Returns the assembled archive.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}
