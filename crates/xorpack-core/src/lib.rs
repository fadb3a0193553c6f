//! Single-file archive codec with per-record obfuscation and path traversal
//! protection.
//!
//! `xorpack-core` packs files and directory trees into one flat archive where
//! every record carries its own one-byte XOR key. Obfuscation hides content
//! from casual inspection only; it is not encryption and offers no integrity
//! protection. Relative paths are validated when packing and again when
//! extracting, so a hostile archive cannot write outside the output
//! directory.
//!
//! # Examples
//!
//! ```no_run
//! use xorpack_core::encode_archive;
//! use xorpack_core::extract_archive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! encode_archive(&["src/"], "src.xpk")?;
//! let report = extract_archive("src.xpk", "/tmp/restore")?;
//! println!("Extracted {} files", report.files_extracted);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod copy;
pub mod creation;
pub mod error;
pub mod extraction;
pub mod format;
pub mod inspection;
pub mod io;
pub mod report;
pub mod security;
pub mod test_utils;
pub mod types;

// Re-export main API types
pub use api::encode_archive;
pub use api::encode_archive_with;
pub use api::extract_archive;
pub use api::extract_archive_with;
pub use config::ExtractConfig;
pub use config::PackConfig;
pub use error::PackError;
pub use error::RecordField;
pub use error::Result;
pub use format::Key;
pub use format::KeySource;
pub use format::RandomKeySource;
pub use format::RecordMetadata;
pub use format::SequenceKeySource;
pub use inspection::ArchiveManifest;
pub use inspection::list_archive;
pub use report::ExtractionReport;
pub use report::NoopProgress;
pub use report::PackReport;
pub use report::ProgressCallback;

pub use types::DestDir;
pub use types::SafePath;
