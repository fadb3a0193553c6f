//! Validated relative path stored in an archive record.

use std::fmt;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use crate::PackError;
use crate::Result;
use crate::security::is_safe_relative_path;

/// A relative archive path that is safe to join onto an output directory.
///
/// `SafePath` holds the forward-slash form written to the wire. It can only
/// be built through validation, which rejects:
/// - empty paths and paths with no normal component
/// - `..` components (with either separator)
/// - rooted paths and drive prefixes
/// - NUL bytes
///
/// # Examples
///
/// ```
/// use xorpack_core::types::SafePath;
///
/// let path = SafePath::validate("src/sub/y.bin")?;
/// assert_eq!(path.as_str(), "src/sub/y.bin");
///
/// assert!(SafePath::validate("../../etc/passwd").is_err());
/// assert!(SafePath::validate("/etc/passwd").is_err());
/// assert!(SafePath::validate("").is_err());
/// # Ok::<(), xorpack_core::PackError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SafePath(String);

impl SafePath {
    /// Validates a wire-form path (as decoded from an archive).
    ///
    /// # Errors
    ///
    /// Returns `PackError::UnsafePath` if the path fails any check.
    pub fn validate(path: &str) -> Result<Self> {
        if !is_safe_wire_path(path) {
            return Err(PackError::UnsafePath {
                path: path.to_string(),
            });
        }
        Ok(Self(path.to_string()))
    }

    /// Builds the wire form of a filesystem path relative to the archive
    /// root, joining normal components with `/`.
    ///
    /// # Errors
    ///
    /// Returns `PackError::InvalidPath` if a component is not valid UTF-8 and
    /// `PackError::UnsafePath` if the path is unsafe.
    pub fn from_relative(path: &Path) -> Result<Self> {
        let mut wire = String::new();
        for component in path.components() {
            match component {
                Component::Normal(name) => {
                    let name = name.to_str().ok_or_else(|| PackError::InvalidPath {
                        path: path.to_path_buf(),
                        reason: "file name is not valid UTF-8".to_string(),
                    })?;
                    if !wire.is_empty() {
                        wire.push('/');
                    }
                    wire.push_str(name);
                }
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(PackError::UnsafePath {
                        path: path.to_string_lossy().into_owned(),
                    });
                }
            }
        }
        Self::validate(&wire)
    }

    /// Returns the forward-slash wire form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the wire form's length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`: validation rejects empty paths.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Converts to a platform path, one normal component at a time.
    #[must_use]
    pub fn to_path_buf(&self) -> PathBuf {
        self.0
            .split('/')
            .filter(|c| !c.is_empty() && *c != ".")
            .collect()
    }

    /// Returns the location of this entry under `root`.
    #[must_use]
    pub fn resolve(&self, root: &Path) -> PathBuf {
        root.join(self.to_path_buf())
    }

    /// Consumes the path and returns the wire string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SafePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SafePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn is_safe_wire_path(path: &str) -> bool {
    if !is_safe_relative_path(Path::new(path)) {
        return false;
    }

    // Archives cross platforms: treat '\' as a separator too, so "..\x"
    // and "C:\x" are caught on every host.
    let mut has_normal = false;
    for (i, segment) in path.split(['/', '\\']).enumerate() {
        match segment {
            ".." => return false,
            "" | "." => {}
            s if i == 0 && is_drive_prefix(s) => return false,
            _ => has_normal = true,
        }
    }
    has_normal && !path.starts_with('\\')
}

fn is_drive_prefix(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}
