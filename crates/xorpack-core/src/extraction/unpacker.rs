//! Archive extraction.

use std::fs::File;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use crate::ExtractConfig;
use crate::ExtractionReport;
use crate::PackError;
use crate::ProgressCallback;
use crate::Result;
use crate::copy::ChunkBuffer;
use crate::format::ArchiveReader;
use crate::io::ProgressTracker;
use crate::io::ProgressWriter;
use crate::security::assert_exists;
use crate::security::assert_not_dir;
use crate::types::DestDir;

/// Extracts the archive at `archive` into `output_dir`.
///
/// The output directory is created if missing. Records are materialized in
/// archive order; there is no rollback, so a failure part-way leaves the
/// files already written (and possibly one partial file) in place.
///
/// # Errors
///
/// Returns an error if `archive` is missing or a directory, `output_dir` is
/// a file, a record is malformed or unsafe, or any I/O fails.
pub fn unpack_archive(
    archive: &Path,
    output_dir: &Path,
    config: &ExtractConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ExtractionReport> {
    config.validate()?;
    assert_exists(archive)?;
    assert_not_dir(archive)?;

    let dest = DestDir::create(output_dir)?;
    let file = File::open(archive).map_err(|source| PackError::Read {
        path: archive.to_path_buf(),
        source,
    })?;
    let mut reader = ArchiveReader::named(BufReader::new(file), archive)?;
    unpack_stream(&mut reader, &dest, config, progress)
}

/// Extracts every record from an already opened archive into `dest`.
///
/// # Errors
///
/// Same as [`unpack_archive`], minus the checks on the archive path.
pub fn unpack_stream<R: Read + Seek>(
    reader: &mut ArchiveReader<R>,
    dest: &DestDir,
    config: &ExtractConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ExtractionReport> {
    let start = Instant::now();
    config.validate()?;

    let mut report = ExtractionReport::new();
    let mut buffer = ChunkBuffer::new(config.chunk_size);
    let mut tracker = ProgressTracker::new(progress, 0);

    while let Some(record) = reader.next_header()? {
        let display = Path::new(record.path.as_str());
        tracker.on_entry_start(display);

        report.directories_created += missing_parent_dirs(dest, &dest.join(&record.path));
        let target = dest.prepare_entry(&record.path)?;
        assert_not_dir(&target)?;

        let file = File::create(&target).map_err(|source| PackError::Write {
            path: target.clone(),
            source,
        })?;
        let written = {
            let mut out = ProgressWriter::new(BufWriter::new(file), tracker.callback());
            let written = reader.copy_content_to(&mut out, &target, &mut buffer)?;
            out.flush().map_err(|source| PackError::Write {
                path: target.clone(),
                source,
            })?;
            written
        };

        report.files_extracted += 1;
        report.bytes_written += written;
        tracker.on_entry_complete(display);
    }

    reader.finish()?;
    tracker.on_complete();

    report.archive_bytes = reader.len();
    report.duration = start.elapsed();
    Ok(report)
}

/// Counts the directories between `dest` and `target` that do not exist yet.
fn missing_parent_dirs(dest: &DestDir, target: &Path) -> usize {
    target
        .parent()
        .map_or(0, |parent| {
            parent
                .ancestors()
                .take_while(|p| p.starts_with(dest.as_path()) && *p != dest.as_path())
                .take_while(|p| !p.exists())
                .count()
        })
}
