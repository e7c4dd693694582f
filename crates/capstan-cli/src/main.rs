//! CLI entrypoint for the capstan dev-server tether.
//!
//! Resolves the connection URL and the sync command, then delegates to
//! `capstan_core::run_cycle` for one detect → patch → sync → restore cycle.

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use capstan_core::ShellSyncRunner;

mod agent;
mod cli;
mod telemetry;

use agent::Agent;
use cli::Cli;

/// Exit code for a cycle that left the configuration file patched on disk.
const EXIT_RESTORE_FAILED: u8 = 2;

fn main() -> ExitCode {
    let args = Cli::parse();
    telemetry::initialise(args.quiet, args.log_format);

    let url = args.connection_url();
    let command = args
        .sync_command
        .clone()
        .unwrap_or_else(|| Agent::detect(&args.project).sync_command().to_owned());
    let runner = ShellSyncRunner::in_dir(&args.project);

    match capstan_core::run_cycle(&args.project, &url, &command, &runner) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.requires_manual_intervention() => {
            error!("{e}");
            ExitCode::from(EXIT_RESTORE_FAILED)
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
