//! Filesystem access for lock markers.
//!
//! These primitives are the only filesystem-touching operations in the
//! lockfile machinery; all higher-level policy lives in [`super::ops`].
//! The trait exists so the operation layer can run against an in-memory
//! store in tests, which is required to exercise the force/takeover race
//! paths deterministically.

use crate::error::{ElockError, Result};
use std::io::ErrorKind;
use std::path::Path;

/// Read and mutate lock markers.
pub trait LockStore {
    /// Read the marker content at `marker`.
    ///
    /// Returns `Ok(None)` when nothing exists at the path; absence is a
    /// normal state, not an error. A symbolic link yields its link target
    /// as the content; anything else is read as a regular file.
    fn read(&self, marker: &Path) -> Result<Option<String>>;

    /// Atomically create the marker with the given content.
    ///
    /// Fails with [`ElockError::MarkerExists`] when the path already
    /// exists; it is never overwritten. This exclusivity is the locking
    /// guarantee.
    fn create(&self, marker: &Path, content: &str) -> Result<()>;

    /// Delete the marker.
    fn remove(&self, marker: &Path) -> Result<()>;

    /// Whether the target file being locked exists.
    fn target_exists(&self, target: &Path) -> bool;
}

/// The real filesystem backend.
///
/// Markers are stored as symbolic links whose target is the encoded content,
/// falling back to exclusively-created regular files where the filesystem
/// does not support symlinks.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLockStore;

impl LockStore for FsLockStore {
    fn read(&self, marker: &Path) -> Result<Option<String>> {
        let read_failed = |e: std::io::Error| ElockError::ReadFailed {
            path: marker.to_path_buf(),
            message: e.to_string(),
        };

        // symlink_metadata does not traverse the link, so a dangling
        // symlink (the normal case for a lock marker) is still found.
        let meta = match std::fs::symlink_metadata(marker) {
            Ok(meta) => meta,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(read_failed(e)),
        };

        if meta.file_type().is_symlink() {
            let link = std::fs::read_link(marker).map_err(read_failed)?;
            match link.to_str() {
                Some(content) => Ok(Some(content.to_string())),
                None => Err(ElockError::ReadFailed {
                    path: marker.to_path_buf(),
                    message: "link target is not valid UTF-8".to_string(),
                }),
            }
        } else {
            match std::fs::read_to_string(marker) {
                Ok(content) => Ok(Some(content)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(read_failed(e)),
            }
        }
    }

    fn create(&self, marker: &Path, content: &str) -> Result<()> {
        create_marker(marker, content)
    }

    fn remove(&self, marker: &Path) -> Result<()> {
        std::fs::remove_file(marker).map_err(|e| ElockError::RemoveFailed {
            path: marker.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn target_exists(&self, target: &Path) -> bool {
        target.exists()
    }
}

/// Create the marker as a symlink, falling back to an exclusive regular
/// file where symlinks are unsupported.
#[cfg(unix)]
fn create_marker(marker: &Path, content: &str) -> Result<()> {
    match std::os::unix::fs::symlink(content, marker) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            Err(ElockError::MarkerExists(marker.to_path_buf()))
        }
        Err(e) if e.kind() == ErrorKind::Unsupported => create_marker_file(marker, content),
        Err(e) => Err(ElockError::CreateFailed {
            path: marker.to_path_buf(),
            message: e.to_string(),
        }),
    }
}

#[cfg(not(unix))]
fn create_marker(marker: &Path, content: &str) -> Result<()> {
    // Unprivileged symlink creation is unreliable on non-Unix platforms;
    // an exclusively-created regular file gives the same guarantee.
    create_marker_file(marker, content)
}

/// Exclusive-create fallback: a regular file whose content is the record.
fn create_marker_file(marker: &Path, content: &str) -> Result<()> {
    use std::io::Write;

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(marker)
        .map_err(|e| {
            if e.kind() == ErrorKind::AlreadyExists {
                ElockError::MarkerExists(marker.to_path_buf())
            } else {
                ElockError::CreateFailed {
                    path: marker.to_path_buf(),
                    message: e.to_string(),
                }
            }
        })?;

    file.write_all(content.as_bytes()).map_err(|e| {
        // Don't leave a half-written marker behind.
        let _ = std::fs::remove_file(marker);
        ElockError::CreateFailed {
            path: marker.to_path_buf(),
            message: e.to_string(),
        }
    })
}
