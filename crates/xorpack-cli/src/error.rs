//! Error conversion utilities for CLI.
//!
//! Converts xorpack-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use std::path::Path;
use xorpack_core::PackError;

/// Converts `PackError` to a user-friendly anyhow error with context.
///
/// `subject` is the archive being read or written.
pub fn convert_pack_error(err: PackError, subject: &Path) -> anyhow::Error {
    match err {
        PackError::UnsafePath { path } => {
            anyhow!(
                "Security violation: unsafe relative path '{}' in '{}'\n\
                 HINT: Archive paths must be relative and may not contain '..'. \
                 Do not extract archives from untrusted sources.",
                path,
                subject.display()
            )
        }
        PackError::PathTraversal { path } => {
            anyhow!(
                "Security violation: potential path traversal to '{}' while extracting '{}'\n\
                 HINT: A directory inside the output is a symlink pointing elsewhere. \
                 Extract into an empty directory.",
                path.display(),
                subject.display()
            )
        }
        PackError::SymlinkRejected { path } => {
            anyhow!(
                "Symlink rejected: {}\n\
                 HINT: xorpack never follows or overwrites symbolic links. \
                 Pass the link target instead, or remove the link from the output directory.",
                path.display()
            )
        }
        err @ (PackError::ShortRead { .. }
        | PackError::Incomplete { .. }
        | PackError::InvalidKey { .. }) => {
            anyhow!(
                "Invalid archive '{}': {}\n\
                 HINT: The archive is truncated or corrupted.",
                subject.display(),
                err
            )
        }
        PackError::SizeMismatch {
            path,
            expected,
            actual,
        } => {
            anyhow!(
                "File '{}' changed while packing ({} bytes expected, {} found)\n\
                 HINT: Make sure no other process writes to the inputs, then pack again.",
                path.display(),
                expected,
                actual
            )
        }
        PackError::SourceNotFound { path } => {
            anyhow!("Path not found: {}", path.display())
        }
        PackError::InvalidConfiguration { reason } => {
            anyhow!(
                "Invalid configuration: {}\n\
                 HINT: --chunk-size must be between 1 and 64M.",
                reason
            )
        }
        _ => anyhow::Error::from(err)
            .context(format!("Error processing archive '{}'", subject.display())),
    }
}

/// Adds archive context to a core result.
pub fn add_archive_context<T>(
    result: Result<T, PackError>,
    subject: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_pack_error(e, subject))
}
