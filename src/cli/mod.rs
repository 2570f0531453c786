//! CLI argument parsing for elock.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};

/// Elock: Emacs-compatible advisory file locking for scripts and non-Emacs tools.
///
/// Emacs marks a file as "being edited" by placing a `.#name` marker
/// (a symlink, or a plain file where symlinks are unsupported) next to it,
/// encoding the holder as `user@host.pid` or `user@host.pid:boot`.
/// Elock speaks the same convention, so Emacs and elock see each other's
/// locks.
#[derive(Parser, Debug)]
#[command(name = "elock")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Emit the outcome as JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for elock.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Inspect the lock marker for a file.
    ///
    /// Reports whether a marker exists and, if so, who holds it.
    Get(GetArgs),

    /// Acquire the lock for a file.
    ///
    /// Creates the marker exclusively; fails if another process holds it
    /// unless --force takes it over.
    Lock(LockArgs),

    /// Report whether a file is locked.
    ///
    /// Prints true/false; --by-us and --by-others narrow the question
    /// to the holder's identity.
    Locked(LockedArgs),

    /// Release the lock for a file.
    ///
    /// Removes the marker; refuses to remove another process's lock
    /// unless --force is given.
    Unlock(UnlockArgs),
}

/// Arguments for the `get` command.
#[derive(Parser, Debug)]
pub struct GetArgs {
    /// The file whose lock marker to inspect.
    pub file: String,
}

/// Arguments for the `lock` command.
#[derive(Parser, Debug)]
pub struct LockArgs {
    /// The file to lock.
    pub file: String,

    /// Take over a lock held by another process, and skip the
    /// target-existence check.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `locked` command.
#[derive(Parser, Debug)]
pub struct LockedArgs {
    /// The file to check.
    pub file: String,

    /// Only report a lock held by this process.
    #[arg(long, conflicts_with = "by_others")]
    pub by_us: bool,

    /// Only report a lock held by another process.
    #[arg(long)]
    pub by_others: bool,
}

impl LockedArgs {
    /// Fold the two filter flags into the optional by_us tri-state.
    pub fn by_us_filter(&self) -> Option<bool> {
        if self.by_us {
            Some(true)
        } else if self.by_others {
            Some(false)
        } else {
            None
        }
    }
}

/// Arguments for the `unlock` command.
#[derive(Parser, Debug)]
pub struct UnlockArgs {
    /// The file to unlock.
    pub file: String,

    /// Remove the marker even if another process holds it, and skip the
    /// target-existence check.
    #[arg(long)]
    pub force: bool,
}

impl Cli {
    /// Parse CLI arguments from the process environment.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_parses_force_flag() {
        let cli = Cli::try_parse_from(["elock", "lock", "notes.txt", "--force"]).unwrap();
        match cli.command {
            Command::Lock(args) => {
                assert_eq!(args.file, "notes.txt");
                assert!(args.force);
            }
            other => panic!("expected lock command, got {other:?}"),
        }
    }

    #[test]
    fn locked_filter_flags_are_mutually_exclusive() {
        assert!(Cli::try_parse_from(["elock", "locked", "notes.txt", "--by-us", "--by-others"])
            .is_err());
    }

    #[test]
    fn locked_filter_folds_into_tri_state() {
        let parse = |extra: &[&str]| {
            let mut argv = vec!["elock", "locked", "notes.txt"];
            argv.extend_from_slice(extra);
            match Cli::try_parse_from(argv).unwrap().command {
                Command::Locked(args) => args.by_us_filter(),
                other => panic!("expected locked command, got {other:?}"),
            }
        };

        assert_eq!(parse(&[]), None);
        assert_eq!(parse(&["--by-us"]), Some(true));
        assert_eq!(parse(&["--by-others"]), Some(false));
    }

    #[test]
    fn json_flag_is_global() {
        let cli = Cli::try_parse_from(["elock", "get", "notes.txt", "--json"]).unwrap();
        assert!(cli.json);
    }
}
