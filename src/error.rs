//! Error types for the elock lock-file machinery.
//!
//! Uses thiserror for derive macros. These errors are raised by the store
//! accessor and the codec; the operation layer folds every one of them into
//! an `Outcome` status rather than propagating them to the caller, so nothing
//! in this crate is fatal to the calling process.

use std::path::PathBuf;
use thiserror::Error;

/// Failures at the marker-file and content-parsing layer.
#[derive(Error, Debug)]
pub enum ElockError {
    /// Marker content did not match the Emacs lock syntax.
    #[error("malformed lock content {content:?}: expected user@host.pid or user@host.pid:boot")]
    MalformedContent {
        /// The raw content that failed to parse.
        content: String,
    },

    /// Exclusive create failed because the marker path already exists.
    ///
    /// This is the expected outcome when someone else holds the lock, so the
    /// operation layer treats it as a branch point rather than a failure.
    #[error("lock marker '{0}' already exists")]
    MarkerExists(PathBuf),

    /// Reading the marker (resolving the symlink or reading the file) failed.
    #[error("failed to read lock marker '{path}': {message}")]
    ReadFailed { path: PathBuf, message: String },

    /// Creating the marker failed for a reason other than prior existence.
    #[error("failed to create lock marker '{path}': {message}")]
    CreateFailed { path: PathBuf, message: String },

    /// Removing the marker failed.
    #[error("failed to remove lock marker '{path}': {message}")]
    RemoveFailed { path: PathBuf, message: String },
}

/// Result type alias for elock lock-file operations.
pub type Result<T> = std::result::Result<T, ElockError>;
