//! Progress reporting adapters.
//!
//! - **`ProgressTracker`** numbers entries and forwards lifecycle events.
//! - **`ProgressReader`** / **`ProgressWriter`** report transferred bytes,
//!   batched so the callback is not invoked for every small read or write.

use std::io::Read;
use std::io::Write;
use std::path::Path;

use crate::ProgressCallback;

/// Default number of bytes accumulated before reporting.
pub const DEFAULT_BATCH_THRESHOLD: u64 = 256 * 1024;

/// Numbers entries (1-indexed) while forwarding to a callback.
///
/// # Examples
///
/// ```
/// use xorpack_core::NoopProgress;
/// use xorpack_core::io::progress::ProgressTracker;
/// use std::path::Path;
///
/// let mut progress = NoopProgress;
/// let mut tracker = ProgressTracker::new(&mut progress, 2);
/// tracker.on_entry_start(Path::new("src/x.bin"));
/// tracker.on_entry_complete(Path::new("src/x.bin"));
/// assert_eq!(tracker.current(), 1);
/// ```
pub struct ProgressTracker<'a> {
    progress: &'a mut dyn ProgressCallback,
    current_entry: usize,
    total_entries: usize,
}

impl<'a> ProgressTracker<'a> {
    /// Creates a tracker; pass `0` when the total is unknown.
    #[must_use]
    pub fn new(progress: &'a mut dyn ProgressCallback, total_entries: usize) -> Self {
        Self {
            progress,
            current_entry: 0,
            total_entries,
        }
    }

    /// Advances the counter and reports the start of an entry.
    pub fn on_entry_start(&mut self, path: &Path) {
        self.current_entry += 1;
        self.progress
            .on_entry_start(path, self.total_entries, self.current_entry);
    }

    /// Reports the end of an entry.
    pub fn on_entry_complete(&mut self, path: &Path) {
        self.progress.on_entry_complete(path);
    }

    /// Reports the end of the whole operation.
    pub fn on_complete(&mut self) {
        self.progress.on_complete();
    }

    /// Number of entries started so far.
    #[must_use]
    pub fn current(&self) -> usize {
        self.current_entry
    }

    /// Borrows the callback for a byte-counting adapter.
    pub fn callback(&mut self) -> &mut dyn ProgressCallback {
        &mut *self.progress
    }
}

struct Batch<'a> {
    progress: &'a mut dyn ProgressCallback,
    pending: u64,
    threshold: u64,
}

impl<'a> Batch<'a> {
    fn new(progress: &'a mut dyn ProgressCallback, threshold: u64) -> Self {
        Self {
            progress,
            pending: 0,
            threshold,
        }
    }

    fn add(&mut self, bytes: usize) {
        if bytes == 0 {
            return;
        }
        self.pending += bytes as u64;
        if self.pending >= self.threshold {
            self.flush();
        }
    }

    fn flush(&mut self) {
        if self.pending > 0 {
            self.progress.on_bytes_written(self.pending);
            self.pending = 0;
        }
    }
}

/// Reader that reports bytes read. Remaining bytes are reported on drop.
pub struct ProgressReader<'a, R> {
    inner: R,
    batch: Batch<'a>,
}

impl<'a, R> ProgressReader<'a, R> {
    /// Wraps `inner` with the default batch threshold.
    #[must_use]
    pub fn new(inner: R, progress: &'a mut dyn ProgressCallback) -> Self {
        Self::with_batch_threshold(inner, progress, DEFAULT_BATCH_THRESHOLD)
    }

    /// Wraps `inner`, reporting every `batch_threshold` bytes.
    #[must_use]
    pub fn with_batch_threshold(
        inner: R,
        progress: &'a mut dyn ProgressCallback,
        batch_threshold: u64,
    ) -> Self {
        Self {
            inner,
            batch: Batch::new(progress, batch_threshold),
        }
    }
}

impl<R: Read> Read for ProgressReader<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.batch.add(n);
        Ok(n)
    }
}

impl<R> Drop for ProgressReader<'_, R> {
    fn drop(&mut self) {
        self.batch.flush();
    }
}

/// Writer that reports bytes written. Remaining bytes are reported on drop.
pub struct ProgressWriter<'a, W> {
    inner: W,
    batch: Batch<'a>,
}

impl<'a, W> ProgressWriter<'a, W> {
    /// Wraps `inner` with the default batch threshold.
    #[must_use]
    pub fn new(inner: W, progress: &'a mut dyn ProgressCallback) -> Self {
        Self {
            inner,
            batch: Batch::new(progress, DEFAULT_BATCH_THRESHOLD),
        }
    }
}

impl<W: Write> Write for ProgressWriter<'_, W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.batch.add(n);
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

impl<W> Drop for ProgressWriter<'_, W> {
    fn drop(&mut self) {
        self.batch.flush();
    }
}
