//! Elock: Emacs-compatible advisory file locking for scripts and non-Emacs tools.
//!
//! This is the main entry point for the `elock` CLI. It parses arguments,
//! dispatches to the lock operations, renders the outcome, and maps the
//! outcome status to an exit code.

mod cli;
mod commands;
pub mod error;
pub mod exit_codes;
pub mod lockfile;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    let outcome = commands::dispatch(cli.command);

    if cli.json {
        commands::render_json(&outcome);
    } else {
        commands::render(&outcome);
    }

    ExitCode::from(outcome.status.exit_code() as u8)
}
