//! Error types for archive packing and unpacking operations.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `PackError`.
pub type Result<T> = std::result::Result<T, PackError>;

/// Identifies the part of a record that an operation was working on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    /// The one-byte obfuscation key.
    Key,
    /// The 8-byte relative path length.
    PathLength,
    /// The relative path bytes.
    Path,
    /// The 8-byte content length.
    ContentLength,
    /// The content bytes.
    Content,
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Key => "key",
            Self::PathLength => "relative path length",
            Self::Path => "relative path",
            Self::ContentLength => "content length",
            Self::Content => "content",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while packing, unpacking, or listing an archive.
#[derive(Error, Debug)]
pub enum PackError {
    /// Reading a source file or the archive failed.
    #[error("failed to read {path}: {source}")]
    Read {
        /// The file being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Writing the archive or an extracted file failed.
    #[error("failed to write {path}: {source}")]
    Write {
        /// The file being written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A path named by the caller does not exist.
    #[error("path doesn't exist: {path}")]
    SourceNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// A path that must be a directory is not one.
    #[error("path isn't a directory: {path}")]
    NotADirectory {
        /// The offending path.
        path: PathBuf,
    },

    /// A path that must not be a directory is one.
    #[error("path is a directory: {path}")]
    IsADirectory {
        /// The offending path.
        path: PathBuf,
    },

    /// A symbolic link was named where a regular file is required.
    #[error("path is a symlink (unsupported): {path}")]
    SymlinkRejected {
        /// The symlink path.
        path: PathBuf,
    },

    /// A relative path is empty, rooted, or contains a `..` component.
    #[error("unsafe relative path: {path}")]
    UnsafePath {
        /// The rejected path as it appears in the archive.
        path: String,
    },

    /// The resolved output location would escape the output directory.
    #[error("potential path traversal: {path}")]
    PathTraversal {
        /// The path that attempted traversal.
        path: PathBuf,
    },

    /// A path cannot be represented in the archive or on disk.
    #[error("invalid path {path}: {reason}")]
    InvalidPath {
        /// The offending path.
        path: PathBuf,
        /// Why the path was rejected.
        reason: String,
    },

    /// Fewer bytes were available than a record field declares.
    #[error("failed to read {field}: {path} (expected {expected} bytes, got {actual})")]
    ShortRead {
        /// The record field being read.
        field: RecordField,
        /// The archive or source file being read.
        path: PathBuf,
        /// Bytes required.
        expected: u64,
        /// Bytes actually available.
        actual: u64,
    },

    /// A source file changed size between measuring and streaming it.
    #[error("file size changed while packing {path}: expected {expected} bytes, found {actual}")]
    SizeMismatch {
        /// The source file.
        path: PathBuf,
        /// Size recorded in the record header.
        expected: u64,
        /// Size actually observed.
        actual: u64,
    },

    /// A record carries key zero, which no encoder produces.
    #[error("invalid obfuscation key 0 at offset {offset}: {path}")]
    InvalidKey {
        /// The archive path.
        path: PathBuf,
        /// Byte offset of the record.
        offset: u64,
    },

    /// Bytes consumed or produced do not add up to the archive length.
    #[error("archive incomplete: {path} (accounted {accounted} of {total} bytes)")]
    Incomplete {
        /// The archive path.
        path: PathBuf,
        /// Bytes accounted for by records.
        accounted: u64,
        /// Total archive length in bytes.
        total: u64,
    },

    /// Directory traversal failed.
    #[error("failed to walk {path}: {source}")]
    Walk {
        /// The directory being walked.
        path: PathBuf,
        /// The underlying walk error.
        source: walkdir::Error,
    },

    /// Configuration is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Reason the configuration is invalid.
        reason: String,
    },
}

impl PackError {
    /// Returns `true` if this error was raised to stop a write outside the
    /// output directory or a symlink from being followed.
    ///
    /// # Examples
    ///
    /// ```
    /// use xorpack_core::PackError;
    ///
    /// let err = PackError::UnsafePath {
    ///     path: "../etc/passwd".to_string(),
    /// };
    /// assert!(err.is_security_violation());
    ///
    /// let err = PackError::InvalidConfiguration {
    ///     reason: "chunk size is zero".to_string(),
    /// };
    /// assert!(!err.is_security_violation());
    /// ```
    #[must_use]
    pub const fn is_security_violation(&self) -> bool {
        matches!(
            self,
            Self::UnsafePath { .. } | Self::PathTraversal { .. } | Self::SymlinkRejected { .. }
        )
    }

    /// Returns `true` if the archive itself is malformed (truncated or with
    /// inconsistent length fields).
    #[must_use]
    pub const fn is_corrupt_archive(&self) -> bool {
        matches!(
            self,
            Self::ShortRead { .. } | Self::InvalidKey { .. } | Self::Incomplete { .. }
        )
    }

    /// Returns a context string for this error, if available.
    ///
    /// # Examples
    ///
    /// ```
    /// use xorpack_core::PackError;
    ///
    /// let err = PackError::InvalidConfiguration {
    ///     reason: "chunk size is zero".to_string(),
    /// };
    /// assert_eq!(err.context(), Some("chunk size is zero"));
    /// ```
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::InvalidConfiguration { reason } | Self::InvalidPath { reason, .. } => {
                Some(reason)
            }
            Self::UnsafePath { path } => Some(path),
            _ => None,
        }
    }
}
