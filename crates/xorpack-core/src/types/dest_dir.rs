//! Validated output directory for extraction.

use std::path::Path;
use std::path::PathBuf;

use crate::PackError;
use crate::Result;
use crate::security::assert_is_dir;
use crate::types::SafePath;

/// An extraction output directory, created if needed and held in canonical
/// form.
///
/// Every entry written during extraction is resolved through
/// [`DestDir::prepare_entry`], which creates parent directories one at a
/// time and refuses to step through a symlink, so nothing is created outside
/// the directory.
///
/// # Examples
///
/// ```no_run
/// use xorpack_core::types::{DestDir, SafePath};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::create("out")?;
/// let target = dest.prepare_entry(&SafePath::validate("src/a.txt")?)?;
/// assert!(target.starts_with(dest.as_path()));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestDir {
    canonical: PathBuf,
}

impl DestDir {
    /// Creates `path` (and any missing parents) and canonicalizes it.
    ///
    /// # Errors
    ///
    /// Returns `PackError::NotADirectory` if `path` exists but is not a
    /// directory, or `PackError::Write` if it cannot be created.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            assert_is_dir(path)?;
        }
        std::fs::create_dir_all(path).map_err(|source| PackError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        let canonical = path.canonicalize().map_err(|source| PackError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { canonical })
    }

    /// Returns the canonical directory path.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.canonical
    }

    /// Joins `entry` onto the directory without touching the filesystem.
    #[inline]
    #[must_use]
    pub fn join(&self, entry: &SafePath) -> PathBuf {
        entry.resolve(&self.canonical)
    }

    /// Readies the on-disk location for `entry` and returns it.
    ///
    /// Parent directories are walked one component at a time from the
    /// output directory down. A component that already exists must be a real
    /// directory; a symlink on the way is refused before anything beneath it
    /// is created. The entry itself is refused if it already exists as a
    /// symlink.
    ///
    /// # Errors
    ///
    /// Returns `PackError::PathTraversal` for a symlinked or escaping parent,
    /// `PackError::NotADirectory` when a parent component is a file,
    /// `PackError::SymlinkRejected` for an existing symlink target, and
    /// `PackError::Write` if a parent directory cannot be created.
    pub fn prepare_entry(&self, entry: &SafePath) -> Result<PathBuf> {
        let target = self.join(entry);
        let relative = entry.to_path_buf();

        let mut current = self.canonical.clone();
        if let Some(parents) = relative.parent() {
            for component in parents.components() {
                current.push(component);
                self.ensure_dir(&current, &target)?;
            }
        }

        let canonical_parent = current.canonicalize().map_err(|source| PackError::Read {
            path: current.clone(),
            source,
        })?;
        if !canonical_parent.starts_with(&self.canonical) {
            return Err(PackError::PathTraversal { path: target });
        }

        if target.is_symlink() {
            return Err(PackError::SymlinkRejected { path: target });
        }

        Ok(target)
    }

    /// Makes sure `dir`, a parent of `target`, is a real directory, creating
    /// it when missing.
    fn ensure_dir(&self, dir: &Path, target: &Path) -> Result<()> {
        debug_assert!(dir.starts_with(&self.canonical));

        match std::fs::symlink_metadata(dir) {
            Ok(meta) if meta.file_type().is_symlink() => Err(PackError::PathTraversal {
                path: target.to_path_buf(),
            }),
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(PackError::NotADirectory {
                path: dir.to_path_buf(),
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                std::fs::create_dir(dir).map_err(|source| PackError::Write {
                    path: dir.to_path_buf(),
                    source,
                })
            }
            Err(source) => Err(PackError::Read {
                path: dir.to_path_buf(),
                source,
            }),
        }
    }

    /// Converts into the inner `PathBuf`.
    #[inline]
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.canonical
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_create_missing_nested_dir() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let out = temp.path().join("a").join("b");
        let dest = DestDir::create(&out).expect("should create dest dir");
        assert!(out.is_dir());
        assert!(dest.as_path().is_absolute());
    }

    #[test]
    fn test_create_rejects_file() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let file = temp.path().join("file.txt");
        fs::write(&file, "test").expect("failed to write file");

        let result = DestDir::create(&file);
        assert!(matches!(result, Err(PackError::NotADirectory { .. })));
    }

    #[test]
    fn test_create_canonicalizes() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let subdir = temp.path().join("subdir");
        fs::create_dir(&subdir).expect("failed to create subdir");

        let dest = DestDir::create(subdir.join(".").join("..")).expect("should create dest dir");
        assert_eq!(dest.as_path(), temp.path().canonicalize().unwrap());
    }

    #[test]
    fn test_prepare_entry_creates_parents() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let dest = DestDir::create(temp.path()).unwrap();
        let entry = SafePath::validate("x/y/z.bin").unwrap();

        let target = dest.prepare_entry(&entry).unwrap();
        assert!(target.parent().unwrap().is_dir());
        assert!(!target.exists());
        assert!(target.starts_with(dest.as_path()));
    }

    #[cfg(unix)]
    #[test]
    fn test_prepare_entry_rejects_symlinked_parent() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let outside = TempDir::new().expect("failed to create temp dir");
        let dest = DestDir::create(temp.path().join("out")).unwrap();
        std::os::unix::fs::symlink(outside.path(), dest.as_path().join("link")).unwrap();

        let entry = SafePath::validate("link/evil.txt").unwrap();
        let err = dest.prepare_entry(&entry).unwrap_err();
        assert!(matches!(err, PackError::PathTraversal { .. }));
        assert!(!outside.path().join("evil.txt").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_prepare_entry_creates_nothing_behind_symlinked_parent() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let outside = TempDir::new().expect("failed to create temp dir");
        let dest = DestDir::create(temp.path().join("out")).unwrap();
        std::os::unix::fs::symlink(outside.path(), dest.as_path().join("link")).unwrap();

        let entry = SafePath::validate("link/a/b/c/evil.txt").unwrap();
        let err = dest.prepare_entry(&entry).unwrap_err();
        assert!(matches!(err, PackError::PathTraversal { .. }));
        assert_eq!(fs::read_dir(outside.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_prepare_entry_rejects_file_as_parent() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let dest = DestDir::create(temp.path()).unwrap();
        fs::write(dest.as_path().join("plain"), "x").unwrap();

        let entry = SafePath::validate("plain/inner.txt").unwrap();
        let err = dest.prepare_entry(&entry).unwrap_err();
        assert!(matches!(err, PackError::NotADirectory { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_prepare_entry_rejects_existing_symlink() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let dest = DestDir::create(temp.path().join("out")).unwrap();
        let victim = temp.path().join("victim.txt");
        fs::write(&victim, "keep").unwrap();
        std::os::unix::fs::symlink(&victim, dest.as_path().join("a.txt")).unwrap();

        let entry = SafePath::validate("a.txt").unwrap();
        let err = dest.prepare_entry(&entry).unwrap_err();
        assert!(matches!(err, PackError::SymlinkRejected { .. }));
        assert_eq!(fs::read_to_string(&victim).unwrap(), "keep");
    }
}
