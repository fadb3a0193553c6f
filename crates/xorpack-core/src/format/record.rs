//! Record header layout.
//!
//! ```text
//! +-----+-----------------+------------------+--------------------+-----------------+
//! | key | path length (8) | path (path len)  | content length (8) | content (len)   |
//! +-----+-----------------+------------------+--------------------+-----------------+
//! ```
//!
//! Every byte after the key is XORed with the key. Length fields are
//! big-endian before obfuscation.

use super::key::Key;
use super::wire::LENGTH_FIELD_SIZE;
use super::wire::encode_u64;
use crate::types::SafePath;

/// Width of the key field.
pub const KEY_FIELD_SIZE: usize = 1;

/// Bytes in a record header that do not depend on the path.
pub const FIXED_HEADER_SIZE: u64 = (KEY_FIELD_SIZE + 2 * LENGTH_FIELD_SIZE) as u64;

/// Everything in a record except its content.
///
/// # Examples
///
/// ```
/// use xorpack_core::format::Key;
/// use xorpack_core::format::record::RecordHeader;
/// use xorpack_core::types::SafePath;
///
/// let header = RecordHeader::new(Key::new(1).unwrap(), SafePath::validate("a.txt")?, 0);
/// assert_eq!(header.header_len(), 22);
/// assert_eq!(header.encode().len(), 22);
/// # Ok::<(), xorpack_core::PackError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordHeader {
    /// Obfuscation key for this record.
    pub key: Key,
    /// Relative path of the entry.
    pub path: SafePath,
    /// Content length in bytes.
    pub content_len: u64,
}

impl RecordHeader {
    /// Creates a header.
    #[must_use]
    pub fn new(key: Key, path: SafePath, content_len: u64) -> Self {
        Self {
            key,
            path,
            content_len,
        }
    }

    /// Byte length of the relative path field.
    #[must_use]
    pub fn path_len(&self) -> u64 {
        self.path.len() as u64
    }

    /// Byte length of the header on the wire.
    #[must_use]
    pub fn header_len(&self) -> u64 {
        FIXED_HEADER_SIZE + self.path_len()
    }

    /// Byte length of the whole record, or `None` on overflow.
    #[must_use]
    pub fn record_len(&self) -> Option<u64> {
        self.header_len().checked_add(self.content_len)
    }

    /// Serializes and obfuscates the header.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let path = self.path.as_str().as_bytes();
        let mut out = Vec::with_capacity(KEY_FIELD_SIZE + 2 * LENGTH_FIELD_SIZE + path.len());

        out.push(self.key.get());
        out.extend_from_slice(&encode_u64(self.path_len()));
        out.extend_from_slice(path);
        out.extend_from_slice(&encode_u64(self.content_len));
        self.key.apply(&mut out[KEY_FIELD_SIZE..]);

        out
    }
}

/// What a metadata-only scan reports for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordMetadata {
    /// Zero-based position of the record in the archive.
    pub index: usize,
    /// Byte offset of the record's key field.
    pub offset: u64,
    /// Obfuscation key.
    pub key: Key,
    /// Byte length of the relative path.
    pub path_len: u64,
    /// Validated relative path.
    pub path: SafePath,
    /// Content length in bytes.
    pub content_len: u64,
}

impl RecordMetadata {
    /// Byte offset of the first content byte.
    #[must_use]
    pub fn content_offset(&self) -> u64 {
        self.offset + FIXED_HEADER_SIZE + self.path_len
    }
}
