//! Configuration for packing and extraction.

use crate::PackError;
use crate::Result;
use crate::copy::DEFAULT_CHUNK_SIZE;

/// Largest accepted chunk size (64 MiB).
pub const MAX_CHUNK_SIZE: usize = 64 * 1024 * 1024;

/// Configuration for [`encode_archive_with`](crate::encode_archive_with).
///
/// # Examples
///
/// ```
/// use xorpack_core::PackConfig;
///
/// let config = PackConfig::default()
///     .with_chunk_size(64 * 1024)
///     .with_read_only(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackConfig {
    /// Bytes of content moved per read/write.
    ///
    /// Default: 1 MiB.
    pub chunk_size: usize,

    /// Clear the archive's write permission once packing succeeds.
    ///
    /// Default: `false`.
    pub read_only: bool,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            read_only: false,
        }
    }
}

impl PackConfig {
    /// Creates a `PackConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the chunk size.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Sets whether the finished archive is made read-only.
    #[must_use]
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `PackError::InvalidConfiguration` if the chunk size is zero or
    /// larger than [`MAX_CHUNK_SIZE`].
    pub fn validate(&self) -> Result<()> {
        validate_chunk_size(self.chunk_size)
    }
}

/// Configuration for [`extract_archive_with`](crate::extract_archive_with).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Bytes of content moved per read/write.
    ///
    /// Default: 1 MiB.
    pub chunk_size: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl ExtractConfig {
    /// Creates an `ExtractConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the chunk size.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `PackError::InvalidConfiguration` if the chunk size is out of
    /// range.
    pub fn validate(&self) -> Result<()> {
        validate_chunk_size(self.chunk_size)
    }
}

fn validate_chunk_size(chunk_size: usize) -> Result<()> {
    if chunk_size == 0 {
        return Err(PackError::InvalidConfiguration {
            reason: "chunk size must be at least 1 byte".to_string(),
        });
    }
    if chunk_size > MAX_CHUNK_SIZE {
        return Err(PackError::InvalidConfiguration {
            reason: format!("chunk size {chunk_size} exceeds maximum of {MAX_CHUNK_SIZE} bytes"),
        });
    }
    Ok(())
}
