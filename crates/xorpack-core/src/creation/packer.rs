//! Archive encoding.

use std::fs;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Instant;

use crate::PackConfig;
use crate::PackError;
use crate::PackReport;
use crate::ProgressCallback;
use crate::Result;
use crate::copy::ChunkBuffer;
use crate::creation::walker::collect_entries;
use crate::format::ArchiveWriter;
use crate::format::KeySource;
use crate::io::ProgressReader;
use crate::io::ProgressTracker;
use crate::security::assert_not_dir;

/// Packs `inputs` into a fresh archive at `output`.
///
/// Every input is resolved before the output is opened, so a missing input
/// or an unsafe path leaves any existing archive untouched. Once writing has
/// started, a failure leaves a partial archive behind.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, `output` is a
/// directory, an input cannot be resolved or read, or writing fails.
pub fn pack_archive<P: AsRef<Path>>(
    inputs: &[P],
    output: &Path,
    config: &PackConfig,
    keys: &mut dyn KeySource,
    progress: &mut dyn ProgressCallback,
) -> Result<PackReport> {
    let start = Instant::now();
    config.validate()?;
    assert_not_dir(output)?;

    let canonical_output = prepare_output_location(output)?;
    let collection = collect_entries(inputs, Some(&canonical_output))?;

    let file = File::create(output).map_err(|source| PackError::Write {
        path: output.to_path_buf(),
        source,
    })?;
    let mut writer = ArchiveWriter::named(BufWriter::new(file), output);
    let mut buffer = ChunkBuffer::new(config.chunk_size);
    let mut tracker = ProgressTracker::new(progress, collection.entries.len());

    for entry in &collection.entries {
        let display = Path::new(entry.archive_path.as_str());
        tracker.on_entry_start(display);

        let source = File::open(&entry.source).map_err(|source| PackError::Read {
            path: entry.source.clone(),
            source,
        })?;
        {
            let mut reader = ProgressReader::new(source, tracker.callback());
            writer.write_record(
                keys.next_key(),
                &entry.archive_path,
                &mut reader,
                entry.size,
                &entry.source,
                &mut buffer,
            )?;
        }

        tracker.on_entry_complete(display);
    }

    let files_packed = writer.records();
    let content_bytes = writer.content_bytes();
    let archive_bytes = writer.bytes_written();
    writer
        .finish()?
        .into_inner()
        .map_err(|e| PackError::Write {
            path: output.to_path_buf(),
            source: e.into_error(),
        })?;

    if config.read_only {
        set_read_only(output)?;
    }
    tracker.on_complete();

    let mut report = PackReport {
        files_packed,
        content_bytes,
        archive_bytes,
        entries_skipped: collection.skipped.len(),
        duration: start.elapsed(),
        ..PackReport::default()
    };
    for skipped in &collection.skipped {
        report.add_warning(format!(
            "skipped {}: {}",
            skipped.reason,
            skipped.path.display()
        ));
    }
    Ok(report)
}

/// Creates the output's parent directory and returns the canonical path the
/// archive will occupy.
fn prepare_output_location(output: &Path) -> Result<std::path::PathBuf> {
    let file_name = output.file_name().ok_or_else(|| PackError::InvalidPath {
        path: output.to_path_buf(),
        reason: "output has no file name".to_string(),
    })?;
    let parent = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    fs::create_dir_all(parent).map_err(|source| PackError::Write {
        path: parent.to_path_buf(),
        source,
    })?;
    let canonical_parent = parent.canonicalize().map_err(|source| PackError::Read {
        path: parent.to_path_buf(),
        source,
    })?;
    Ok(canonical_parent.join(file_name))
}

fn set_read_only(path: &Path) -> Result<()> {
    let mut permissions = fs::metadata(path)
        .map_err(|source| PackError::Read {
            path: path.to_path_buf(),
            source,
        })?
        .permissions();
    permissions.set_readonly(true);
    fs::set_permissions(path, permissions).map_err(|source| PackError::Write {
        path: path.to_path_buf(),
        source,
    })
}
