//! Archive listing results.

use crate::format::RecordMetadata;

/// Metadata for every record in an archive, gathered without extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveManifest {
    /// Records in archive order.
    pub records: Vec<RecordMetadata>,

    /// Archive size in bytes.
    pub archive_bytes: u64,
}

impl ArchiveManifest {
    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the archive holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of all content lengths.
    #[must_use]
    pub fn total_content_bytes(&self) -> u64 {
        self.records.iter().map(|r| r.content_len).sum()
    }

    /// Iterates over the records.
    pub fn iter(&self) -> std::slice::Iter<'_, RecordMetadata> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a ArchiveManifest {
    type Item = &'a RecordMetadata;
    type IntoIter = std::slice::Iter<'a, RecordMetadata>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for ArchiveManifest {
    type Item = RecordMetadata;
    type IntoIter = std::vec::IntoIter<RecordMetadata>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
