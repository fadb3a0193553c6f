//! Path safety predicates and filesystem assertions.

use std::io::ErrorKind;
use std::path::Component;
use std::path::Path;

use crate::PackError;
use crate::Result;

/// Returns `true` if `path` can be joined onto an output directory without
/// leaving it.
///
/// A path is unsafe if it is empty, contains a NUL byte, is rooted (or has a
/// drive prefix), or has any `..` component. Single dots and names that
/// merely contain dots are fine.
///
/// # Examples
///
/// ```
/// use xorpack_core::security::is_safe_relative_path;
///
/// assert!(is_safe_relative_path("src/a.txt"));
/// assert!(is_safe_relative_path("..hidden"));
/// assert!(!is_safe_relative_path(""));
/// assert!(!is_safe_relative_path("../../etc/passwd"));
/// assert!(!is_safe_relative_path("a/../b"));
/// assert!(!is_safe_relative_path("/etc/passwd"));
/// ```
#[must_use]
pub fn is_safe_relative_path<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    if path.as_os_str().is_empty() || path.as_os_str().as_encoded_bytes().contains(&0) {
        return false;
    }

    path.components().all(|component| match component {
        Component::Normal(_) | Component::CurDir => true,
        Component::ParentDir | Component::RootDir | Component::Prefix(_) => false,
    })
}

/// Fails with `SourceNotFound` unless something (a dangling symlink
/// included) exists at `path`.
///
/// # Errors
///
/// Returns `PackError::SourceNotFound` if nothing exists at `path`, or
/// `PackError::Read` if its metadata cannot be queried.
pub fn assert_exists(path: &Path) -> Result<()> {
    match std::fs::symlink_metadata(path) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(PackError::SourceNotFound {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(PackError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Fails with `NotADirectory` unless `path` is a directory.
///
/// # Errors
///
/// Returns `PackError::NotADirectory` if `path` is not a directory.
pub fn assert_is_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(PackError::NotADirectory {
            path: path.to_path_buf(),
        })
    }
}

/// Fails with `IsADirectory` if `path` is a directory.
///
/// # Errors
///
/// Returns `PackError::IsADirectory` if `path` is a directory.
pub fn assert_not_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        Err(PackError::IsADirectory {
            path: path.to_path_buf(),
        })
    } else {
        Ok(())
    }
}

/// Fails with `SymlinkRejected` if `path` itself is a symbolic link.
///
/// # Errors
///
/// Returns `PackError::SymlinkRejected` if `path` is a symlink.
pub fn assert_not_symlink(path: &Path) -> Result<()> {
    if path.is_symlink() {
        Err(PackError::SymlinkRejected {
            path: path.to_path_buf(),
        })
    } else {
        Ok(())
    }
}

/// Fails with `UnsafePath` unless [`is_safe_relative_path`] holds.
///
/// # Errors
///
/// Returns `PackError::UnsafePath` for an unsafe path.
pub fn assert_safe_relative_path(path: &Path) -> Result<()> {
    if is_safe_relative_path(path) {
        Ok(())
    } else {
        Err(PackError::UnsafePath {
            path: path.to_string_lossy().into_owned(),
        })
    }
}
