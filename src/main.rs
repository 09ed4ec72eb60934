//! main.rs
//! Entry point for pfind

use pfind::PfindError;
use pfind::config::Config;
use pfind::logging::{init_logging, level_for};
use pfind::utils::cli::Cli;

use clap::Parser;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(level_for(cli.verbose, cli.quiet));

    let config = Config::load();

    let search = match cli.into_search(&config) {
        Ok(search) => search,
        Err(e) => {
            tracing::error!("{}", e);
            return exit_code_for(&e);
        }
    };

    match search.run(io::stdout()) {
        Ok(report) => {
            tracing::debug!(
                "{} lines written, {} directories listed, {} unreadable",
                report.written,
                report.stats.dirs_visited,
                report.stats.dirs_failed
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            exit_code_for(&e)
        }
    }
}

/// 2 for a bad command line, 1 for anything that went wrong while running.
fn exit_code_for(e: &PfindError) -> ExitCode {
    if e.is_usage() {
        ExitCode::from(2)
    } else {
        ExitCode::FAILURE
    }
}
