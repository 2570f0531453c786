//! Emacs-compatible lock-file machinery for elock.
//!
//! Emacs marks a file as "being edited" by placing a marker next to it: for
//! a target `dir/name.ext` the marker is `dir/.#name.ext`, and its content
//! (stored as a symbolic-link target where the filesystem supports symlinks,
//! otherwise as the content of a regular file) encodes the holder as
//! `user@host.pid` or `user@host.pid:boot`.
//!
//! This module implements that protocol so non-Emacs tools can detect,
//! respect, or break locks that Emacs has placed, and vice versa:
//! - [`path`]: derives the marker path from a target path (pure string rule)
//! - [`codec`]: encodes/decodes the holder record
//! - [`store`]: the filesystem seam (read / exclusive create / remove)
//! - [`identity`]: who we are (user, host, pid, boot time)
//! - [`ops`]: the four operations (Get, Lock, Locked, Unlock)
//!
//! # Locking model
//!
//! Locks are advisory and cooperative. Markers are created with exclusive
//! semantics (symlink creation, or **create_new** for the regular-file
//! fallback) so that only one process can place a given marker; that
//! primitive is the only true mutual-exclusion point. Everything else
//! (ownership reporting and the `--force` takeover) reads the marker
//! advisorily and is race-prone by design, mirroring Emacs's own model.

pub mod codec;
pub mod identity;
pub mod ops;
pub mod path;
pub mod store;


// Re-export public API
pub use codec::LockRecord;
pub use identity::{IdentityProvider, SystemIdentity};
pub use ops::{LockQuery, Outcome, Payload, Status};
pub use path::marker_path;
pub use store::{FsLockStore, LockStore};
