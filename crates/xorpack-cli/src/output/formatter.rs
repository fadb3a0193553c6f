//! Output formatter trait for CLI results.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use xorpack_core::ArchiveManifest;
use xorpack_core::ExtractionReport;
use xorpack_core::PackReport;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format packing result
    fn format_pack_result(&self, output_path: &Path, report: &PackReport) -> Result<()>;

    /// Format extraction result
    fn format_unpack_result(&self, output_dir: &Path, report: &ExtractionReport) -> Result<()>;

    /// Format archive listing (paths only)
    fn format_manifest_short(&self, manifest: &ArchiveManifest) -> Result<()>;

    /// Format archive listing with per-record details
    fn format_manifest_long(&self, manifest: &ArchiveManifest, human_readable: bool)
    -> Result<()>;

    /// Format error message for a failed operation
    fn format_error(&self, operation: &str, error: &anyhow::Error);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }
}

impl JsonOutput<()> {
    pub fn error(operation: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let output = JsonOutput::success("pack", 3);
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["operation"], "pack");
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"], 3);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_error_envelope() {
        let output = JsonOutput::error("list", "boom");
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["error"], "boom");
        assert!(json.get("data").is_none());
    }
}
