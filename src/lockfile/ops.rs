//! The four lock operations and their status taxonomy.
//!
//! Every operation returns an [`Outcome`]: a status code, a human-readable
//! message, and optional structured data. Failures are folded into the
//! outcome rather than returned as `Err`: callers branch on the status, and
//! nothing here is fatal to the calling process.
//!
//! # Races
//!
//! The exclusive marker create is the only true mutual-exclusion point.
//! The `force` takeover path (read, remove, recreate) has a known race
//! window in which a competing process can recreate the marker; the retry
//! is bounded and gives up with [`Status::Conflict`] under sustained
//! contention. Unlock likewise reads and then removes without re-verifying
//! ownership in between; a marker replaced between those two steps is
//! removed anyway. Both windows are inherent to the cooperative Emacs lock
//! model, which trades authority for simplicity.

use super::codec::LockRecord;
use super::identity::IdentityProvider;
use super::path::marker_path;
use super::store::LockStore;
use crate::error::ElockError;
use crate::exit_codes;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// How many times a forced takeover will remove-and-recreate before
/// giving up. In the absence of contention one iteration suffices.
const MAX_TAKEOVER_ATTEMPTS: usize = 5;

/// Status code of an operation outcome. A closed enumeration; callers
/// must not treat these as arbitrary numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// The operation did what was asked.
    Ok,
    /// Already in the requested state; nothing was touched.
    NotModified,
    /// Missing required target path.
    BadRequest,
    /// Lock owned by someone else, or target missing when required.
    PreconditionFailed,
    /// A forced takeover lost the contention race repeatedly.
    Conflict,
    /// Filesystem or parse failure; the message carries the diagnostic.
    InternalError,
}

impl Status {
    /// Whether this outcome is a success from the caller's point of view.
    pub fn is_success(&self) -> bool {
        matches!(self, Status::Ok | Status::NotModified)
    }

    /// Process exit code for this status.
    pub fn exit_code(&self) -> i32 {
        match self {
            Status::Ok | Status::NotModified => exit_codes::SUCCESS,
            Status::BadRequest => exit_codes::BAD_REQUEST,
            Status::PreconditionFailed | Status::Conflict => exit_codes::PRECONDITION_FAILED,
            Status::InternalError => exit_codes::INTERNAL_ERROR,
        }
    }
}

/// Outcome of reading a marker, as reported by [`get`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LockQuery {
    /// Whether a marker exists at the resolved path.
    pub exists: bool,

    /// The resolved marker path (always populated).
    pub path: PathBuf,

    /// The decoded holder; present iff the marker exists and decoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<LockRecord>,

    /// Read or decode failure text; mutually exclusive with `record`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Structured data attached to an outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    /// Marker inspection result (Get).
    Query(LockQuery),
    /// Whether the target is locked (Locked).
    Locked(bool),
}

/// The tri-part result of every operation.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    /// Status code from the closed taxonomy.
    pub status: Status,

    /// Human-readable description of what happened.
    pub message: String,

    /// Operation-specific structured data, when any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
}

impl Outcome {
    fn new(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            payload: None,
        }
    }

    fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }

    fn bad_request() -> Self {
        Self::new(Status::BadRequest, "missing required target path")
    }
}

/// Read the marker for `target` and report who (if anyone) holds it.
pub fn get(store: &dyn LockStore, target: &str) -> Outcome {
    if target.is_empty() {
        return Outcome::bad_request();
    }
    let marker = marker_path(target);

    match read_marker(store, &marker) {
        Ok(None) => Outcome::new(Status::Ok, format!("'{target}' is not locked")).with_payload(
            Payload::Query(LockQuery {
                exists: false,
                path: marker,
                record: None,
                error: None,
            }),
        ),
        Ok(Some(record)) => Outcome::new(Status::Ok, format!("'{target}' is locked by {record}"))
            .with_payload(Payload::Query(LockQuery {
                exists: true,
                path: marker,
                record: Some(record),
                error: None,
            })),
        Err(e) => {
            // A read or decode error implies something sits at the path.
            let text = e.to_string();
            Outcome::new(Status::InternalError, text.clone()).with_payload(Payload::Query(
                LockQuery {
                    exists: true,
                    path: marker,
                    record: None,
                    error: Some(text),
                },
            ))
        }
    }
}

/// Acquire the lock on `target` for the calling process.
///
/// Without `force`, the target file must already exist and a lock held by
/// another pid is respected. With `force`, a foreign marker is removed and
/// recreated as ours, a best-effort takeover rather than a correctness
/// guarantee.
pub fn lock(
    store: &dyn LockStore,
    identity: &dyn IdentityProvider,
    target: &str,
    force: bool,
) -> Outcome {
    if target.is_empty() {
        return Outcome::bad_request();
    }
    if !force && !store.target_exists(Path::new(target)) {
        return Outcome::new(
            Status::PreconditionFailed,
            format!("target '{target}' does not exist"),
        );
    }

    let marker = marker_path(target);
    let ours = identity.record();
    let content = ours.encode();

    for _ in 0..MAX_TAKEOVER_ATTEMPTS {
        match store.create(&marker, &content) {
            Ok(()) => return Outcome::new(Status::Ok, format!("locked '{target}' as {ours}")),
            Err(ElockError::MarkerExists(_)) => {}
            Err(e) => return Outcome::new(Status::InternalError, e.to_string()),
        }

        // Someone holds it. Find out who.
        let holder = match read_marker(store, &marker) {
            Ok(Some(record)) => record,
            Ok(None) => {
                // Create said the marker exists but the read found nothing.
                return Outcome::new(
                    Status::InternalError,
                    format!("failed to lock '{target}': probably a permission problem"),
                );
            }
            Err(e) => return Outcome::new(Status::InternalError, e.to_string()),
        };

        if holder.pid == identity.pid() {
            return Outcome::new(
                Status::NotModified,
                format!("'{target}' is already locked by us (pid {})", holder.pid),
            );
        }
        if !force {
            return Outcome::new(
                Status::PreconditionFailed,
                format!("'{target}' is locked by {holder}"),
            );
        }

        // Forced takeover: remove the foreign marker and try again. A
        // competing process may recreate it before our retry, hence the
        // bounded loop.
        if let Err(e) = store.remove(&marker) {
            return Outcome::new(Status::InternalError, e.to_string());
        }
    }

    Outcome::new(
        Status::Conflict,
        format!("takeover of '{target}' exceeded {MAX_TAKEOVER_ATTEMPTS} attempts under contention"),
    )
}

/// Report whether `target` is locked.
///
/// With `by_us` unset any lock counts; `Some(true)` reports only a lock
/// held by this process, `Some(false)` only a lock held by someone else.
pub fn locked(
    store: &dyn LockStore,
    identity: &dyn IdentityProvider,
    target: &str,
    by_us: Option<bool>,
) -> Outcome {
    if target.is_empty() {
        return Outcome::bad_request();
    }
    let marker = marker_path(target);

    let holder = match read_marker(store, &marker) {
        Ok(holder) => holder,
        Err(e) => return Outcome::new(Status::InternalError, e.to_string()),
    };

    match holder {
        None => Outcome::new(Status::Ok, format!("'{target}' is not locked"))
            .with_payload(Payload::Locked(false)),
        Some(record) => {
            let answer = match by_us {
                None => true,
                Some(true) => record.pid == identity.pid(),
                Some(false) => record.pid != identity.pid(),
            };
            Outcome::new(Status::Ok, format!("'{target}' is locked by {record}"))
                .with_payload(Payload::Locked(answer))
        }
    }
}

/// Release the lock on `target`.
///
/// Without `force`, the target file must exist and a lock held by another
/// pid is left alone. Note the documented weakness: the marker read and its
/// removal are not atomic, so a lock replaced in between is removed anyway.
pub fn unlock(
    store: &dyn LockStore,
    identity: &dyn IdentityProvider,
    target: &str,
    force: bool,
) -> Outcome {
    if target.is_empty() {
        return Outcome::bad_request();
    }
    if !force && !store.target_exists(Path::new(target)) {
        return Outcome::new(
            Status::PreconditionFailed,
            format!("target '{target}' does not exist"),
        );
    }

    let marker = marker_path(target);
    let holder = match read_marker(store, &marker) {
        Ok(holder) => holder,
        Err(e) => return Outcome::new(Status::InternalError, e.to_string()),
    };

    let Some(record) = holder else {
        return Outcome::new(Status::NotModified, format!("'{target}' was not locked"));
    };

    if record.pid != identity.pid() && !force {
        return Outcome::new(
            Status::PreconditionFailed,
            format!("'{target}' is locked by {record}"),
        );
    }

    match store.remove(&marker) {
        Ok(()) => Outcome::new(Status::Ok, format!("unlocked '{target}'")),
        Err(e) => Outcome::new(Status::InternalError, e.to_string()),
    }
}

/// Read and decode the marker: `Ok(None)` when absent, the decoded record
/// when present, an error on read or decode failure.
fn read_marker(store: &dyn LockStore, marker: &Path) -> crate::error::Result<Option<LockRecord>> {
    match store.read(marker)? {
        Some(raw) => Ok(Some(LockRecord::decode(&raw)?)),
        None => Ok(None),
    }
}
