//! Process identity for lock records.
//!
//! The lock record encodes ambient global state (environment variables,
//! hostname, uptime). That lookup is behind a trait so the operation layer
//! can be driven with a fixed identity in tests without touching the real
//! environment.

use super::codec::LockRecord;

/// Supplies the identity written into new lock records and the pid used
/// for ownership comparisons.
pub trait IdentityProvider {
    /// The owning account name.
    fn user(&self) -> String;

    /// The owning machine's name.
    fn host(&self) -> String;

    /// The current process id.
    fn pid(&self) -> u32;

    /// Epoch second of this host's last boot, when obtainable.
    fn boot(&self) -> Option<u64>;

    /// Build a fresh lock record from this identity.
    fn record(&self) -> LockRecord {
        LockRecord {
            user: self.user(),
            host: self.host(),
            pid: self.pid(),
            boot: self.boot(),
        }
    }
}

/// Identity of the real calling process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemIdentity;

impl IdentityProvider for SystemIdentity {
    fn user(&self) -> String {
        // First defined wins; "unknown" keeps the record field non-empty
        // on hosts with none of these set.
        std::env::var("USERNAME")
            .or_else(|_| std::env::var("USER"))
            .or_else(|_| std::env::var("LOGNAME"))
            .unwrap_or_else(|_| "unknown".to_string())
    }

    fn host(&self) -> String {
        hostname::get()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|_| "unknown".to_string())
    }

    fn pid(&self) -> u32 {
        std::process::id()
    }

    #[cfg(target_os = "linux")]
    fn boot(&self) -> Option<u64> {
        let uptime = std::fs::read_to_string("/proc/uptime").ok()?;
        let uptime_secs = uptime.split_whitespace().next()?.parse::<f64>().ok()?;
        let now = chrono::Utc::now().timestamp();
        u64::try_from(now - uptime_secs as i64).ok()
    }

    #[cfg(not(target_os = "linux"))]
    fn boot(&self) -> Option<u64> {
        None
    }
}
