//! Filesystem and path safety checks.

pub mod path;

pub use path::assert_exists;
pub use path::assert_is_dir;
pub use path::assert_not_dir;
pub use path::assert_not_symlink;
pub use path::assert_safe_relative_path;
pub use path::is_safe_relative_path;
