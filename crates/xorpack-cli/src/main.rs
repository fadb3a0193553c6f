//! Xorpack CLI - Command-line utility for packing and extracting xorpack
//! archives.

mod cli;
mod commands;
mod error;
mod output;
mod progress;

use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);
    let show_progress = !cli.json && !cli.quiet;

    let result = match &cli.command {
        cli::Commands::Pack(args) => commands::pack::execute(args, &*formatter, show_progress),
        cli::Commands::Unpack(args) => {
            commands::unpack::execute(args, &*formatter, show_progress)
        }
        cli::Commands::List(args) => commands::list::execute(args, &*formatter),
        cli::Commands::Completion(args) => {
            commands::completion::execute(args);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            formatter.format_error(cli.command.name(), &err);
            ExitCode::FAILURE
        }
    }
}
