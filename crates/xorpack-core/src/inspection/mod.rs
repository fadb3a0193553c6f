//! Archive inspection without extraction.
//!
//! # Examples
//!
//! ```no_run
//! use xorpack_core::list_archive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manifest = list_archive("bundle.xpk")?;
//! println!(
//!     "{} records, {} content bytes",
//!     manifest.len(),
//!     manifest.total_content_bytes()
//! );
//! # Ok(())
//! # }
//! ```

pub mod list;
pub mod manifest;

pub use list::list_archive;
pub use list::list_stream;
pub use manifest::ArchiveManifest;
