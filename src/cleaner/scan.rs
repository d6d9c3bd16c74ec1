//! Cache scanning
//!
//! Enumerates the immediate children of the cache root and decides, per
//! entry, whether it is litter, a valid package, or a condemned package.
//! The enumeration is lazy: one directory entry is inspected at a time, so
//! large cache roots are never materialized in memory.

use std::fmt;
use std::fs::{self, ReadDir};
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use thiserror::Error;

use crate::cleaner::classify;
use crate::cleaner::retention::{self, Freshness};
use crate::cleaner::validate::{self, PackageContents, Violation};

/// An I/O failure recorded against one cache entry.
///
/// These never abort the scan; they are carried through to the final report
/// and flip the aggregate result to failure.
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("failed to stat {}: {source}", path.display())]
    Stat { path: PathBuf, source: io::Error },

    #[error("failed to list {}: {source}", path.display())]
    List { path: PathBuf, source: io::Error },

    #[error("failed to read timestamps under {}: {source}", path.display())]
    Timestamps { path: PathBuf, source: io::Error },

    #[error("failed to remove {}: {source}", path.display())]
    Remove { path: PathBuf, source: io::Error },
}

/// Why a package directory was condemned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CondemnReason {
    /// Structural violation; takes precedence over staleness in reporting
    Invalid(Violation),
    /// Structurally valid but unused beyond the retention window
    Stale,
}

impl fmt::Display for CondemnReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CondemnReason::Invalid(violation) => violation.fmt(f),
            CondemnReason::Stale => write!(
                f,
                "not used within the last {} days",
                retention::RETENTION_DAYS
            ),
        }
    }
}

impl CondemnReason {
    /// Stable short code for machine-readable output
    pub fn code(&self) -> &'static str {
        match self {
            CondemnReason::Invalid(violation) => violation.code(),
            CondemnReason::Stale => "stale",
        }
    }
}

/// Outcome of inspecting one immediate child of the cache root
#[derive(Debug)]
pub enum ScanEntry {
    /// A non-directory entry directly under the root; always condemned
    LooseFile(PathBuf),
    /// A structurally valid, fresh package directory; retained
    ValidPackage(PathBuf),
    /// A package directory scheduled for recursive deletion
    Condemned { path: PathBuf, reason: CondemnReason },
    /// The entry could not be inspected; left untouched, error recorded
    Failed { path: PathBuf, error: EntryError },
}

/// Lazy iterator over the cache root's immediate children
pub struct Scan {
    root: PathBuf,
    now: SystemTime,
    entries: ReadDir,
}

/// Open the cache root for scanning.
///
/// This is the only fatal failure point: if the root itself cannot be
/// listed, there is nothing to do.
pub fn scan(root: &Path, now: SystemTime) -> io::Result<Scan> {
    Ok(Scan {
        root: root.to_path_buf(),
        now,
        entries: fs::read_dir(root)?,
    })
}

impl Iterator for Scan {
    type Item = ScanEntry;

    fn next(&mut self) -> Option<ScanEntry> {
        let entry = match self.entries.next()? {
            Ok(entry) => entry,
            // readdir(3) failed mid-iteration; no per-entry path available
            Err(source) => {
                return Some(ScanEntry::Failed {
                    path: self.root.clone(),
                    error: EntryError::List {
                        path: self.root.clone(),
                        source,
                    },
                })
            }
        };

        let path = entry.path();
        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(source) => {
                return Some(ScanEntry::Failed {
                    path: path.clone(),
                    error: EntryError::Stat { path, source },
                })
            }
        };

        // Symlinks and other non-directories count as litter too; the root
        // invariant admits only package directories.
        if !file_type.is_dir() {
            return Some(ScanEntry::LooseFile(path));
        }

        Some(inspect_package(&path, self.now))
    }
}

/// Inspect one package directory: classify its immediate children, validate
/// the counts, then consult the retention policy.
fn inspect_package(path: &Path, now: SystemTime) -> ScanEntry {
    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(source) => {
            return ScanEntry::Failed {
                path: path.to_path_buf(),
                error: EntryError::List {
                    path: path.to_path_buf(),
                    source,
                },
            }
        }
    };

    let mut contents = PackageContents::default();
    for child in entries {
        let child = match child {
            Ok(child) => child,
            Err(source) => {
                return ScanEntry::Failed {
                    path: path.to_path_buf(),
                    error: EntryError::List {
                        path: path.to_path_buf(),
                        source,
                    },
                }
            }
        };

        let file_type = match child.file_type() {
            Ok(file_type) => file_type,
            Err(source) => {
                return ScanEntry::Failed {
                    path: child.path(),
                    error: EntryError::Stat {
                        path: child.path(),
                        source,
                    },
                }
            }
        };

        if file_type.is_dir() {
            contents.has_subdirectory = true;
        } else {
            contents.record(classify::classify(&child.file_name().to_string_lossy()));
        }
    }

    if let Err(violation) = validate::validate(&contents) {
        return ScanEntry::Condemned {
            path: path.to_path_buf(),
            reason: CondemnReason::Invalid(violation),
        };
    }

    match retention::last_use_time(path) {
        Ok(last_use) => match retention::assess(last_use, now) {
            Freshness::Fresh => ScanEntry::ValidPackage(path.to_path_buf()),
            Freshness::Stale => ScanEntry::Condemned {
                path: path.to_path_buf(),
                reason: CondemnReason::Stale,
            },
        },
        Err(source) => ScanEntry::Failed {
            path: path.to_path_buf(),
            error: EntryError::Timestamps {
                path: path.to_path_buf(),
                source,
            },
        },
    }
}
