//! High-level public API for packing and extracting archives.

use std::path::Path;

use crate::ExtractConfig;
use crate::ExtractionReport;
use crate::NoopProgress;
use crate::PackConfig;
use crate::PackReport;
use crate::ProgressCallback;
use crate::Result;
use crate::creation::pack_archive;
use crate::extraction::unpack_archive;
use crate::format::KeySource;
use crate::format::RandomKeySource;

/// Packs files and directories into a new archive at `output`.
///
/// Directory inputs are walked recursively and keep their own name as the
/// first path component; file inputs are stored under their bare file name.
/// Every record gets a fresh random key.
///
/// # Errors
///
/// Returns an error if an input is missing or unreadable, a stored path would
/// be unsafe, `output` is a directory, or writing the archive fails.
///
/// # Examples
///
/// ```no_run
/// use xorpack_core::encode_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = encode_archive(&["src/", "Cargo.toml"], "bundle.xpk")?;
/// println!("Packed {} files", report.files_packed);
/// # Ok(())
/// # }
/// ```
pub fn encode_archive<P: AsRef<Path>, Q: AsRef<Path>>(
    inputs: &[P],
    output: Q,
) -> Result<PackReport> {
    encode_archive_with(
        inputs,
        output,
        &PackConfig::default(),
        &mut RandomKeySource::new(),
        &mut NoopProgress,
    )
}

/// Packs an archive with explicit configuration, key source, and progress
/// reporting.
///
/// # Errors
///
/// Same as [`encode_archive`], plus [`PackError::InvalidConfiguration`] for a
/// bad `config`.
///
/// [`PackError::InvalidConfiguration`]: crate::PackError::InvalidConfiguration
///
/// # Examples
///
/// ```no_run
/// use xorpack_core::NoopProgress;
/// use xorpack_core::PackConfig;
/// use xorpack_core::encode_archive_with;
/// use xorpack_core::format::SequenceKeySource;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = PackConfig::default().with_read_only(true);
/// let mut keys = SequenceKeySource::new([0x5A])?;
/// encode_archive_with(&["data"], "data.xpk", &config, &mut keys, &mut NoopProgress)?;
/// # Ok(())
/// # }
/// ```
pub fn encode_archive_with<P: AsRef<Path>, Q: AsRef<Path>>(
    inputs: &[P],
    output: Q,
    config: &PackConfig,
    keys: &mut dyn KeySource,
    progress: &mut dyn ProgressCallback,
) -> Result<PackReport> {
    pack_archive(inputs, output.as_ref(), config, keys, progress)
}

/// Extracts every record of `archive` under `output_dir`.
///
/// The output directory is created if missing. Existing files at record
/// paths are overwritten. Extraction stops at the first malformed or unsafe
/// record; files written before that point stay on disk.
///
/// # Errors
///
/// Returns an error if the archive is missing, a directory, truncated, or
/// inconsistent, a record path is unsafe, or writing fails.
///
/// # Examples
///
/// ```no_run
/// use xorpack_core::extract_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = extract_archive("bundle.xpk", "/tmp/output")?;
/// println!("Extracted {} files", report.files_extracted);
/// # Ok(())
/// # }
/// ```
pub fn extract_archive<P: AsRef<Path>, Q: AsRef<Path>>(
    archive: P,
    output_dir: Q,
) -> Result<ExtractionReport> {
    extract_archive_with(
        archive,
        output_dir,
        &ExtractConfig::default(),
        &mut NoopProgress,
    )
}

/// Extracts an archive with explicit configuration and progress reporting.
///
/// # Errors
///
/// Same as [`extract_archive`], plus an error for an invalid `config`.
pub fn extract_archive_with<P: AsRef<Path>, Q: AsRef<Path>>(
    archive: P,
    output_dir: Q,
    config: &ExtractConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ExtractionReport> {
    unpack_archive(archive.as_ref(), output_dir.as_ref(), config, progress)
}
