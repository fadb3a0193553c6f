//! Input discovery for packing.
//!
//! Each input is either a regular file, packed under its bare name, or a
//! directory, walked recursively and packed under its own name (`src/x.bin`
//! for a file `x.bin` inside input `src`). Directories are never entries.

use std::fmt;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use walkdir::WalkDir;

use crate::PackError;
use crate::Result;
use crate::security::assert_exists;
use crate::security::assert_not_symlink;
use crate::types::SafePath;

/// A regular file ready to be packed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackEntry {
    /// Filesystem path of the file.
    pub source: PathBuf,

    /// Relative path recorded in the archive.
    pub archive_path: SafePath,

    /// File size when discovered.
    pub size: u64,
}

/// Why a walk entry was left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Symbolic link found inside a walked directory.
    Symlink,
    /// FIFO, socket, or device node.
    SpecialFile,
    /// The archive being written.
    OutputArchive,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Symlink => "symlink",
            Self::SpecialFile => "special file",
            Self::OutputArchive => "output archive",
        })
    }
}

/// A walk entry that was not packed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// Filesystem path of the entry.
    pub path: PathBuf,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// Result of [`collect_entries`].
#[derive(Debug, Clone, Default)]
pub struct EntryCollection {
    /// Files to pack, in walk order.
    pub entries: Vec<PackEntry>,
    /// Entries left out of the archive.
    pub skipped: Vec<SkippedEntry>,
}

impl EntryCollection {
    /// Sum of all entry sizes.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|e| e.size).sum()
    }
}

/// Resolves `inputs` into the list of files to pack.
///
/// Inputs are processed in the order given; each directory is walked in
/// file-name order without following symlinks. `exclude`, if set, is the
/// canonical path of a file to leave out (the archive being written).
///
/// # Errors
///
/// - `PackError::SourceNotFound` for a missing input
/// - `PackError::SymlinkRejected` for an input that is itself a symlink
/// - `PackError::InvalidPath` for a non-regular file input or a path that
///   cannot be expressed in UTF-8
/// - `PackError::UnsafePath` for a relative path that fails validation
/// - `PackError::Walk` if traversal fails
///
/// # Examples
///
/// ```no_run
/// use xorpack_core::creation::walker::collect_entries;
///
/// let collection = collect_entries(&["src", "README.md"], None)?;
/// for entry in &collection.entries {
///     println!("{} ({} bytes)", entry.archive_path, entry.size);
/// }
/// # Ok::<(), xorpack_core::PackError>(())
/// ```
pub fn collect_entries<P: AsRef<Path>>(
    inputs: &[P],
    exclude: Option<&Path>,
) -> Result<EntryCollection> {
    let mut collection = EntryCollection::default();

    for input in inputs {
        let input = input.as_ref();
        assert_exists(input)?;
        assert_not_symlink(input)?;

        let root = input.canonicalize().map_err(|source| PackError::Read {
            path: input.to_path_buf(),
            source,
        })?;
        let base = root.parent().unwrap_or(&root).to_path_buf();

        if root.is_dir() {
            walk_directory(input, &root, &base, exclude, &mut collection)?;
        } else {
            let metadata = fs::metadata(&root).map_err(|source| PackError::Read {
                path: input.to_path_buf(),
                source,
            })?;
            if !metadata.is_file() {
                return Err(PackError::InvalidPath {
                    path: input.to_path_buf(),
                    reason: "not a regular file".to_string(),
                });
            }
            if exclude == Some(root.as_path()) {
                collection.skipped.push(SkippedEntry {
                    path: input.to_path_buf(),
                    reason: SkipReason::OutputArchive,
                });
                continue;
            }
            collection.entries.push(PackEntry {
                archive_path: archive_path(&root, &base)?,
                source: input.to_path_buf(),
                size: metadata.len(),
            });
        }
    }

    Ok(collection)
}

fn walk_directory(
    input: &Path,
    root: &Path,
    base: &Path,
    exclude: Option<&Path>,
    collection: &mut EntryCollection,
) -> Result<()> {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|source| PackError::Walk {
            path: source
                .path()
                .map_or_else(|| input.to_path_buf(), Path::to_path_buf),
            source,
        })?;

        let file_type = entry.file_type();
        if file_type.is_dir() {
            continue;
        }

        let path = entry.path();
        let reason = if file_type.is_symlink() {
            Some(SkipReason::Symlink)
        } else if !file_type.is_file() {
            Some(SkipReason::SpecialFile)
        } else if exclude == Some(path) {
            Some(SkipReason::OutputArchive)
        } else {
            None
        };
        if let Some(reason) = reason {
            collection.skipped.push(SkippedEntry {
                path: path.to_path_buf(),
                reason,
            });
            continue;
        }

        let metadata = entry.metadata().map_err(|source| PackError::Walk {
            path: path.to_path_buf(),
            source,
        })?;
        collection.entries.push(PackEntry {
            source: path.to_path_buf(),
            archive_path: archive_path(path, base)?,
            size: metadata.len(),
        });
    }

    Ok(())
}

fn archive_path(path: &Path, base: &Path) -> Result<SafePath> {
    let relative = path
        .strip_prefix(base)
        .map_err(|_| PackError::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("not under {}", base.display()),
        })?;
    SafePath::from_relative(relative)
}
