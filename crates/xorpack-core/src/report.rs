//! Operation reports and progress callbacks.

use std::path::Path;
use std::time::Duration;

/// Report of a packing operation.
///
/// # Examples
///
/// ```
/// use xorpack_core::PackReport;
///
/// let mut report = PackReport::new();
/// report.files_packed = 2;
/// report.add_warning("skipped symlink: src/link");
/// assert!(report.has_warnings());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackReport {
    /// Number of records written.
    pub files_packed: usize,

    /// Sum of content lengths across all records.
    pub content_bytes: u64,

    /// Total size of the archive in bytes.
    pub archive_bytes: u64,

    /// Walk entries skipped (symlinks, special files, the archive itself).
    pub entries_skipped: usize,

    /// Duration of the operation.
    pub duration: Duration,

    /// Warnings generated while packing.
    pub warnings: Vec<String>,
}

impl PackReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message.
    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Bytes spent on record headers (keys, length fields, paths).
    #[must_use]
    pub fn overhead_bytes(&self) -> u64 {
        self.archive_bytes.saturating_sub(self.content_bytes)
    }
}

/// Report of an extraction operation.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Number of files written.
    pub files_extracted: usize,

    /// Number of directories created under the output directory.
    pub directories_created: usize,

    /// Total content bytes written to disk.
    pub bytes_written: u64,

    /// Size of the archive that was read.
    pub archive_bytes: u64,

    /// Duration of the operation.
    pub duration: Duration,
}

impl ExtractionReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of filesystem items created.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.files_extracted + self.directories_created
    }
}

/// Receives progress updates while packing or extracting.
///
/// # Examples
///
/// ```
/// use xorpack_core::ProgressCallback;
/// use std::path::Path;
///
/// struct Printer;
///
/// impl ProgressCallback for Printer {
///     fn on_entry_start(&mut self, path: &Path, total: usize, current: usize) {
///         println!("[{current}/{total}] {}", path.display());
///     }
///
///     fn on_bytes_written(&mut self, _bytes: u64) {}
///
///     fn on_entry_complete(&mut self, _path: &Path) {}
///
///     fn on_complete(&mut self) {}
/// }
/// ```
pub trait ProgressCallback {
    /// Called before an entry is processed.
    ///
    /// `total` is zero when the number of entries is not known up front
    /// (extraction scans the archive linearly). `current` is 1-indexed.
    fn on_entry_start(&mut self, path: &Path, total: usize, current: usize);

    /// Called after each chunk of content is transferred.
    fn on_bytes_written(&mut self, bytes: u64);

    /// Called after an entry has been fully processed.
    fn on_entry_complete(&mut self, path: &Path);

    /// Called once when the whole operation succeeds.
    fn on_complete(&mut self);
}

/// Progress callback that ignores every update.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry_start(&mut self, _path: &Path, _total: usize, _current: usize) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _path: &Path) {}

    fn on_complete(&mut self) {}
}
