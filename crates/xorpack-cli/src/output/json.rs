//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;
use xorpack_core::ArchiveManifest;
use xorpack_core::ExtractionReport;
use xorpack_core::PackReport;
use xorpack_core::RecordMetadata;

pub struct JsonFormatter;

#[derive(Serialize)]
struct RecordOutput {
    index: usize,
    offset: u64,
    key: u8,
    path_len: u64,
    path: String,
    content_len: u64,
}

impl From<&RecordMetadata> for RecordOutput {
    fn from(record: &RecordMetadata) -> Self {
        Self {
            index: record.index,
            offset: record.offset,
            key: record.key.get(),
            path_len: record.path_len,
            path: record.path.to_string(),
            content_len: record.content_len,
        }
    }
}

#[derive(Serialize)]
struct ManifestOutput {
    total_records: usize,
    total_content_bytes: u64,
    archive_bytes: u64,
    records: Vec<RecordOutput>,
}

impl From<&ArchiveManifest> for ManifestOutput {
    fn from(manifest: &ArchiveManifest) -> Self {
        Self {
            total_records: manifest.len(),
            total_content_bytes: manifest.total_content_bytes(),
            archive_bytes: manifest.archive_bytes,
            records: manifest.iter().map(RecordOutput::from).collect(),
        }
    }
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_pack_result(&self, output_path: &Path, report: &PackReport) -> Result<()> {
        #[derive(Serialize)]
        struct PackOutput {
            output_path: String,
            files_packed: usize,
            content_bytes: u64,
            archive_bytes: u64,
            entries_skipped: usize,
            duration_ms: u128,
            warnings: Vec<String>,
        }

        let data = PackOutput {
            output_path: output_path.display().to_string(),
            files_packed: report.files_packed,
            content_bytes: report.content_bytes,
            archive_bytes: report.archive_bytes,
            entries_skipped: report.entries_skipped,
            duration_ms: report.duration.as_millis(),
            warnings: report.warnings.clone(),
        };

        Self::output(&JsonOutput::success("pack", data))
    }

    fn format_unpack_result(&self, output_dir: &Path, report: &ExtractionReport) -> Result<()> {
        #[derive(Serialize)]
        struct UnpackOutput {
            output_dir: String,
            files_extracted: usize,
            directories_created: usize,
            bytes_written: u64,
            archive_bytes: u64,
            duration_ms: u128,
        }

        let data = UnpackOutput {
            output_dir: output_dir.display().to_string(),
            files_extracted: report.files_extracted,
            directories_created: report.directories_created,
            bytes_written: report.bytes_written,
            archive_bytes: report.archive_bytes,
            duration_ms: report.duration.as_millis(),
        };

        Self::output(&JsonOutput::success("unpack", data))
    }

    fn format_manifest_short(&self, manifest: &ArchiveManifest) -> Result<()> {
        Self::output(&JsonOutput::success("list", ManifestOutput::from(manifest)))
    }

    fn format_manifest_long(&self, manifest: &ArchiveManifest, _human_readable: bool) -> Result<()> {
        self.format_manifest_short(manifest)
    }

    fn format_error(&self, operation: &str, error: &anyhow::Error) {
        let output = JsonOutput::error(operation, format!("{error:#}"));
        let _ = Self::output(&output);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use xorpack_core::format::ArchiveReader;
    use xorpack_core::inspection::list_stream;
    use xorpack_core::test_utils::ArchiveBuilder;

    #[test]
    fn test_manifest_output_structure() {
        let bytes = ArchiveBuilder::new()
            .file(0x10, "docs/a.txt", b"hello")
            .file(0x20, "b", b"")
            .build();
        let mut reader = ArchiveReader::new(Cursor::new(bytes)).unwrap();
        let manifest = list_stream(&mut reader).unwrap();

        let json = serde_json::to_value(ManifestOutput::from(&manifest)).unwrap();
        assert_eq!(json["total_records"], 2);
        assert_eq!(json["total_content_bytes"], 5);
        assert_eq!(json["records"][0]["path"], "docs/a.txt");
        assert_eq!(json["records"][0]["key"], 16);
        assert_eq!(json["records"][1]["offset"], 17 + 10 + 5);
    }
}
