//! Retention policy
//!
//! A structurally valid package directory is still condemned when it has not
//! been used within the retention window. "Last use" is the most recent
//! modification or access timestamp observable on the directory or anything
//! inside it.

use std::io;
use std::path::Path;
use std::time::{Duration, SystemTime};

use walkdir::WalkDir;

/// Staleness threshold in days
pub const RETENTION_DAYS: u64 = 30;

/// Staleness threshold as a duration
pub const RETENTION_WINDOW: Duration = Duration::from_secs(RETENTION_DAYS * 24 * 60 * 60);

/// Retention verdict for one package directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Fresh,
    Stale,
}

/// Compute the last-use time of a package directory.
///
/// Walks the directory and everything below it, taking the maximum of the
/// modification times and (where the filesystem tracks them) access times.
/// Any metadata read failure is surfaced as an error for the caller to
/// record against this entry; it is never folded into a freshness verdict.
pub fn last_use_time(dir: &Path) -> io::Result<SystemTime> {
    let mut latest: Option<SystemTime> = None;

    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(io::Error::from)?;
        let metadata = entry.metadata().map_err(io::Error::from)?;

        let modified = metadata.modified()?;
        latest = Some(latest.map_or(modified, |t| t.max(modified)));

        // atime is best-effort: noatime mounts report nothing useful
        if let Ok(accessed) = metadata.accessed() {
            latest = Some(latest.map_or(accessed, |t| t.max(accessed)));
        }
    }

    latest.ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "directory has no entries"))
}

/// Assess a last-use time against `now`.
///
/// A timestamp in the future (clock skew) counts as fresh.
pub fn assess(last_use: SystemTime, now: SystemTime) -> Freshness {
    match now.duration_since(last_use) {
        Ok(idle) if idle > RETENTION_WINDOW => Freshness::Stale,
        _ => Freshness::Fresh,
    }
}
