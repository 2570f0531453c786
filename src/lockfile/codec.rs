//! Lock record encoding and decoding.
//!
//! The marker content is the Emacs lock format: `user@host.pid`, optionally
//! followed by `:boot` where boot is the epoch second the owning host last
//! started (used to disambiguate pids reused across reboots). Readers
//! tolerate a single trailing newline but writers never emit one.

use crate::error::{ElockError, Result};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Anchored pattern for marker content.
///
/// The user and host captures are greedy, so a user containing `@` or `.`
/// is absorbed into the left-hand captures and only the final `@`, `.` and
/// `:` act as separators. This matches how Emacs itself parses lock files.
static LOCK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+)@(.+)\.([0-9]+)(?::([0-9]+))?\n?$").unwrap());

/// The decoded identity of a lock holder.
///
/// Constructed fresh by the Lock operation at acquisition time and never
/// mutated: a takeover deletes the old marker and writes a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LockRecord {
    /// The owning account name (non-empty).
    pub user: String,

    /// The owning machine's name (non-empty).
    pub host: String,

    /// The owning process identifier.
    pub pid: u32,

    /// Epoch second of the owning host's last boot at lock time,
    /// absent when unavailable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boot: Option<u64>,
}

impl LockRecord {
    /// Encode this record as marker content.
    pub fn encode(&self) -> String {
        match self.boot {
            Some(boot) => format!("{}@{}.{}:{}", self.user, self.host, self.pid, boot),
            None => format!("{}@{}.{}", self.user, self.host, self.pid),
        }
    }

    /// Decode raw marker content into a record.
    ///
    /// Returns [`ElockError::MalformedContent`] when the content does not
    /// match the lock syntax, including when pid or boot overflow their
    /// integer types.
    pub fn decode(raw: &str) -> Result<Self> {
        let malformed = || ElockError::MalformedContent {
            content: raw.to_string(),
        };

        let caps = LOCK_PATTERN.captures(raw).ok_or_else(malformed)?;
        let pid: u32 = caps[3].parse().map_err(|_| malformed())?;
        let boot: Option<u64> = match caps.get(4) {
            Some(m) => Some(m.as_str().parse().map_err(|_| malformed())?),
            None => None,
        };

        Ok(Self {
            user: caps[1].to_string(),
            host: caps[2].to_string(),
            pid,
            boot,
        })
    }
}

impl std::fmt::Display for LockRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{} (pid {})", self.user, self.host, self.pid)
    }
}
