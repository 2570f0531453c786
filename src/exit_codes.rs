//! Exit code constants for the elock CLI.
//!
//! Callers are expected to branch on these:
//! - 0: Success (including "already in the requested state")
//! - 1: Bad request (missing or empty target)
//! - 2: Precondition failed (lock held elsewhere, target missing, takeover contention)
//! - 3: Internal error (filesystem or parse failure)

/// Successful execution, including NOT_MODIFIED outcomes.
pub const SUCCESS: i32 = 0;

/// Bad request: missing or empty target path.
pub const BAD_REQUEST: i32 = 1;

/// Precondition failed: lock owned by another process, target missing,
/// or a forced takeover lost the contention race.
pub const PRECONDITION_FAILED: i32 = 2;

/// Internal error: filesystem failure or malformed marker content.
pub const INTERNAL_ERROR: i32 = 3;
