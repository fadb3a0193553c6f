//! Unpack command implementation.

use crate::cli::UnpackArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Context;
use anyhow::Result;
use std::env;
use xorpack_core::ExtractConfig;
use xorpack_core::NoopProgress;
use xorpack_core::ProgressCallback;
use xorpack_core::extract_archive_with;

pub fn execute(
    args: &UnpackArgs,
    formatter: &dyn OutputFormatter,
    show_progress: bool,
) -> Result<()> {
    let output_dir = match &args.output_dir {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("failed to get current directory")?,
    };

    let mut config = ExtractConfig::default();
    if let Some(chunk_size) = args.chunk_size {
        config = config.with_chunk_size(chunk_size);
    }

    let mut cli_progress;
    let mut noop = NoopProgress;
    let progress: &mut dyn ProgressCallback = if show_progress && CliProgress::should_show() {
        cli_progress = CliProgress::new("Extracting");
        &mut cli_progress
    } else {
        &mut noop
    };

    let report = add_archive_context(
        extract_archive_with(&args.archive, &output_dir, &config, progress),
        &args.archive,
    )?;

    formatter.format_unpack_result(&output_dir, &report)?;

    Ok(())
}
