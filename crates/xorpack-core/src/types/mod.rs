//! Type-safe wrappers for archive paths and destinations.
//!
//! Both types validate on construction. There are no `From<String>` or
//! `From<PathBuf>` conversions, so an unchecked path cannot reach the
//! filesystem layer.

pub mod dest_dir;
pub mod safe_path;

pub use dest_dir::DestDir;
pub use safe_path::SafePath;
