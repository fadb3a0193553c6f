//! Archive listing.

use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::io::Seek;
use std::path::Path;

use crate::PackError;
use crate::Result;
use crate::format::ArchiveReader;
use crate::inspection::manifest::ArchiveManifest;
use crate::security::assert_exists;
use crate::security::assert_not_dir;

/// Lists the records of the archive at `archive` without extracting.
///
/// Content bytes are skipped by seeking, so listing costs one header read per
/// record regardless of file sizes. Paths are validated exactly as during
/// extraction; an archive that lists cleanly passes the same structural
/// checks extraction applies.
///
/// # Errors
///
/// Returns an error if the archive is missing, a directory, malformed, or
/// contains an unsafe path.
///
/// # Examples
///
/// ```no_run
/// use xorpack_core::list_archive;
///
/// let manifest = list_archive("bundle.xpk")?;
/// for record in &manifest {
///     println!("{}: {} bytes", record.path, record.content_len);
/// }
/// # Ok::<(), xorpack_core::PackError>(())
/// ```
pub fn list_archive<P: AsRef<Path>>(archive: P) -> Result<ArchiveManifest> {
    let archive = archive.as_ref();
    assert_exists(archive)?;
    assert_not_dir(archive)?;

    let file = File::open(archive).map_err(|source| PackError::Read {
        path: archive.to_path_buf(),
        source,
    })?;
    let mut reader = ArchiveReader::named(BufReader::new(file), archive)?;
    list_stream(&mut reader)
}

/// Lists every remaining record of an already opened archive.
///
/// # Errors
///
/// Returns an error if a record is malformed or unsafe.
pub fn list_stream<R: Read + Seek>(reader: &mut ArchiveReader<R>) -> Result<ArchiveManifest> {
    let mut records = Vec::new();
    while let Some(record) = reader.next_header()? {
        records.push(record);
    }
    reader.finish()?;

    Ok(ArchiveManifest {
        records,
        archive_bytes: reader.len(),
    })
}
