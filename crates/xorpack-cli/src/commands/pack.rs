//! Pack command implementation.

use crate::cli::PackArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use xorpack_core::NoopProgress;
use xorpack_core::PackConfig;
use xorpack_core::ProgressCallback;
use xorpack_core::RandomKeySource;
use xorpack_core::encode_archive_with;

pub fn execute(args: &PackArgs, formatter: &dyn OutputFormatter, show_progress: bool) -> Result<()> {
    let mut config = PackConfig::default().with_read_only(args.read_only);
    if let Some(chunk_size) = args.chunk_size {
        config = config.with_chunk_size(chunk_size);
    }

    let mut keys = RandomKeySource::new();
    let mut cli_progress;
    let mut noop = NoopProgress;
    let progress: &mut dyn ProgressCallback = if show_progress && CliProgress::should_show() {
        cli_progress = CliProgress::new("Packing");
        &mut cli_progress
    } else {
        &mut noop
    };

    let report = add_archive_context(
        encode_archive_with(args.inputs.as_slice(), &args.output, &config, &mut keys, progress),
        &args.output,
    )?;

    formatter.format_pack_result(&args.output, &report)?;

    Ok(())
}
