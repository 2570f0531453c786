//! Command implementations for elock.
//!
//! This module routes CLI commands to the lock operations and renders
//! their outcomes. All policy lives in `lockfile::ops`; this is thin glue
//! that supplies the real store and the real process identity.

use crate::cli::Command;
use crate::lockfile::{FsLockStore, Outcome, Payload, SystemIdentity, ops};

/// Dispatch a command to the corresponding lock operation.
pub fn dispatch(command: Command) -> Outcome {
    let store = FsLockStore;
    let identity = SystemIdentity;

    match command {
        Command::Get(args) => ops::get(&store, &args.file),
        Command::Lock(args) => ops::lock(&store, &identity, &args.file, args.force),
        Command::Locked(args) => ops::locked(&store, &identity, &args.file, args.by_us_filter()),
        Command::Unlock(args) => ops::unlock(&store, &identity, &args.file, args.force),
    }
}

/// Render an outcome for a human: the message to stdout on success,
/// `Error: ...` to stderr otherwise, plus payload details where useful.
pub fn render(outcome: &Outcome) {
    if outcome.status.is_success() {
        println!("{}", outcome.message);
        match &outcome.payload {
            Some(Payload::Query(query)) if query.exists => {
                println!("  marker: {}", query.path.display());
                if let Some(record) = &query.record {
                    println!("  holder: {}", record.encode());
                }
            }
            Some(Payload::Locked(answer)) => println!("{answer}"),
            _ => {}
        }
    } else {
        eprintln!("Error: {}", outcome.message);
    }
}

/// Render an outcome as pretty-printed JSON on stdout.
pub fn render_json(outcome: &Outcome) {
    match serde_json::to_string_pretty(outcome) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Error: failed to serialize outcome: {e}"),
    }
}
