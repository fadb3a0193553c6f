//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xorpack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pack files and directories into a new archive
    #[command(visible_alias = "c")]
    Pack(PackArgs),
    /// Extract archive contents
    #[command(visible_alias = "x")]
    Unpack(UnpackArgs),
    /// List archive contents without extraction
    #[command(visible_alias = "l")]
    List(ListArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

impl Commands {
    /// Operation name used in JSON envelopes.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pack(_) => "pack",
            Self::Unpack(_) => "unpack",
            Self::List(_) => "list",
            Self::Completion(_) => "completion",
        }
    }
}

#[derive(clap::Args)]
pub struct PackArgs {
    /// Output archive file path
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Files or directories to pack
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Mark the archive read-only once written
    #[arg(long)]
    pub read_only: bool,

    /// Transfer buffer size in bytes (K and M suffixes accepted)
    #[arg(long, value_name = "BYTES", value_parser = parse_byte_size)]
    pub chunk_size: Option<usize>,
}

#[derive(clap::Args)]
pub struct UnpackArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Output directory (default: current directory)
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Transfer buffer size in bytes (K and M suffixes accepted)
    #[arg(long, value_name = "BYTES", value_parser = parse_byte_size)]
    pub chunk_size: Option<usize>,
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Show key, path length, and offset for each record
    #[arg(short, long)]
    pub long: bool,

    /// Show sizes in human-readable format
    #[arg(short = 'H', long)]
    pub human_readable: bool,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_name = "SHELL", value_enum)]
    pub shell: Shell,
}

/// Parse byte size with optional suffix (K, M)
#[allow(clippy::option_if_let_else)]
fn parse_byte_size(s: &str) -> Result<usize, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty byte size".to_string());
    }

    let (num_str, multiplier) = if let Some(stripped) = s.strip_suffix(['M', 'm']) {
        (stripped, 1024 * 1024)
    } else if let Some(stripped) = s.strip_suffix(['K', 'k']) {
        (stripped, 1024)
    } else {
        (s, 1)
    };

    num_str
        .parse::<usize>()
        .map_err(|_| format!("invalid byte size: {s}"))
        .and_then(|n| {
            n.checked_mul(multiplier)
                .ok_or_else(|| format!("byte size overflow: {s}"))
        })
}
