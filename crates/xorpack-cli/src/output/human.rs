//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use crate::progress::humanize_bytes;
use anyhow::Result;
use console::Term;
use console::style;
use std::path::Path;
use xorpack_core::ArchiveManifest;
use xorpack_core::ExtractionReport;
use xorpack_core::PackReport;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();

        for (count, c) in s.chars().rev().enumerate() {
            if count > 0 && count % 3 == 0 {
                result.push(',');
            }
            result.push(c);
        }

        result.chars().rev().collect()
    }

    fn line(&self, text: &str) {
        let _ = self.term.write_line(text);
    }

    fn headline(&self, text: &str) {
        if self.use_colors {
            self.line(&format!("{} {text}", style("✓").green().bold()));
        } else {
            self.line(text);
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_pack_result(&self, output_path: &Path, report: &PackReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.headline(&format!("Archive created: {}", output_path.display()));
        self.line(&format!(
            "  Files packed:     {}",
            Self::format_number(report.files_packed)
        ));
        self.line(&format!(
            "  Content size:     {}",
            humanize_bytes(report.content_bytes)
        ));
        self.line(&format!(
            "  Archive size:     {}",
            humanize_bytes(report.archive_bytes)
        ));

        if report.entries_skipped > 0 {
            self.line(&format!("  Entries skipped:  {}", report.entries_skipped));
        }

        if self.verbose {
            self.line(&format!("  Duration:         {:?}", report.duration));

            if report.has_warnings() {
                self.line("");
                if self.use_colors {
                    self.line(&format!("{}", style("Warnings:").yellow().bold()));
                } else {
                    self.line("Warnings:");
                }
                for warning in &report.warnings {
                    self.line(&format!("  - {warning}"));
                }
            }
        }

        Ok(())
    }

    fn format_unpack_result(&self, output_dir: &Path, report: &ExtractionReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.headline("Extraction complete");
        self.line(&format!(
            "  Files extracted: {}",
            Self::format_number(report.files_extracted)
        ));
        self.line(&format!("  Directories: {}", report.directories_created));
        self.line(&format!(
            "  Total size: {}",
            humanize_bytes(report.bytes_written)
        ));

        if self.verbose {
            self.line(&format!("  Output: {}", output_dir.display()));
            self.line(&format!("  Duration: {:?}", report.duration));
        }

        Ok(())
    }

    fn format_manifest_short(&self, manifest: &ArchiveManifest) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for record in manifest {
            self.line(&format!("{}  {}", record.path, record.content_len));
        }

        Ok(())
    }

    fn format_manifest_long(&self, manifest: &ArchiveManifest, human_readable: bool) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let size = |bytes: u64| {
            if human_readable {
                humanize_bytes(bytes)
            } else {
                bytes.to_string()
            }
        };

        self.line(&format!(
            "{:>6}  {:>4}  {:>12}  {:>8}  {:>10}  PATH",
            "INDEX", "KEY", "OFFSET", "PATH_LEN", "SIZE"
        ));
        for record in manifest {
            self.line(&format!(
                "{:>6}  0x{:02x}  {:>12}  {:>8}  {:>10}  {}",
                record.index,
                record.key.get(),
                record.offset,
                record.path_len,
                size(record.content_len),
                record.path
            ));
        }

        self.line("");
        self.line(&format!(
            "Total: {} records, {} content, {} archive",
            Self::format_number(manifest.len()),
            size(manifest.total_content_bytes()),
            size(manifest.archive_bytes)
        ));

        Ok(())
    }

    fn format_error(&self, _operation: &str, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        let term = Term::stderr();
        if self.use_colors {
            let _ = term.write_line(&format!("{} {error:?}", style("Error:").red().bold()));
        } else {
            let _ = term.write_line(&format!("Error: {error:?}"));
        }
    }
}
