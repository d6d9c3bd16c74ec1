//! Clean pass orchestration
//!
//! Composes scanner and remover into the single entry point. Every entry is
//! attempted regardless of earlier failures: the caller relies on a
//! best-effort pass that reclaims as much space as it can and reports the
//! aggregate outcome at the end.

use std::path::Path;
use std::time::SystemTime;

use anyhow::{Context, Result};

use crate::cleaner::remove;
use crate::cleaner::scan::{self, EntryError, ScanEntry};
use crate::core::model::{Action, CleanReport, ReportItem};

/// Reason attached to loose-file removals
const LOOSE_FILE_REASON: &str = "loose file under cache root";

/// Run one clean pass over `root` at the current time.
pub fn clean(root: &Path, dry_run: bool) -> Result<CleanReport> {
    clean_at(root, SystemTime::now(), dry_run)
}

/// Run one clean pass over `root`, judging staleness against `now`.
///
/// The only fatal error is failing to open the root itself; every per-entry
/// fault is absorbed into the report, and the pass never aborts early.
pub fn clean_at(root: &Path, now: SystemTime, dry_run: bool) -> Result<CleanReport> {
    let entries = scan::scan(root, now)
        .with_context(|| format!("failed to open cache root {}", root.display()))?;

    let mut report = CleanReport::new();
    for entry in entries {
        report.push(handle_entry(entry, dry_run));
    }
    Ok(report)
}

fn handle_entry(entry: ScanEntry, dry_run: bool) -> ReportItem {
    match entry {
        ScanEntry::ValidPackage(path) => {
            ReportItem::new(Action::Kept, path.display().to_string())
        }

        ScanEntry::LooseFile(path) => {
            let display = path.display().to_string();
            if dry_run {
                return ReportItem::new(Action::WouldRemoveFile, display)
                    .with_reason(LOOSE_FILE_REASON, "loose_file");
            }
            match remove::remove_file(&path) {
                Ok(()) => ReportItem::new(Action::RemovedFile, display)
                    .with_reason(LOOSE_FILE_REASON, "loose_file"),
                Err(source) => {
                    let error = EntryError::Remove { path, source };
                    ReportItem::new(Action::Error, display).with_error(error.to_string())
                }
            }
        }

        ScanEntry::Condemned { path, reason } => {
            let display = path.display().to_string();
            if dry_run {
                return ReportItem::new(Action::WouldRemovePackage, display)
                    .with_reason(reason.to_string(), reason.code());
            }
            match remove::remove_package(&path) {
                Ok(()) => ReportItem::new(Action::RemovedPackage, display)
                    .with_reason(reason.to_string(), reason.code()),
                Err(source) => {
                    let error = EntryError::Remove { path, source };
                    ReportItem::new(Action::Error, display).with_error(error.to_string())
                }
            }
        }

        ScanEntry::Failed { path, error } => {
            ReportItem::new(Action::Error, path.display().to_string())
                .with_error(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cleaner::retention::RETENTION_WINDOW;
    use std::fs;
    use std::path::PathBuf;
    use std::time::Duration;
    use tempfile::tempdir;

    fn make_valid_package(root: &Path, name: &str) -> PathBuf {
        let pkg = root.join(name);
        fs::create_dir(&pkg).unwrap();
        fs::write(pkg.join("base.apk"), b"apk").unwrap();
        fs::write(pkg.join("attributes.json"), b"{}").unwrap();
        pkg
    }

    fn past_window() -> SystemTime {
        SystemTime::now() + RETENTION_WINDOW + Duration::from_secs(60)
    }

    #[test]
    fn test_loose_file_removed_and_root_left_empty() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("stray.tmp"), b"x").unwrap();

        let report = clean(temp.path(), false).unwrap();
        assert!(report.ok());
        assert_eq!(report.removed_file_count(), 1);
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_valid_fresh_package_survives_unchanged() {
        let temp = tempdir().unwrap();
        let pkg = make_valid_package(temp.path(), "pkg.a");
        fs::write(pkg.join("main.1.pkg.a.obb"), b"obb").unwrap();
        fs::write(pkg.join("patch.1.pkg.a.obb"), b"obb").unwrap();

        let report = clean(temp.path(), false).unwrap();
        assert!(report.ok());
        assert_eq!(report.kept_count(), 1);
        assert!(pkg.join("base.apk").exists());
        assert!(pkg.join("attributes.json").exists());
        assert!(pkg.join("main.1.pkg.a.obb").exists());
        assert!(pkg.join("patch.1.pkg.a.obb").exists());
    }

    #[test]
    fn test_duplicate_apk_package_deleted_entirely() {
        let temp = tempdir().unwrap();
        let pkg = make_valid_package(temp.path(), "pkg.b");
        fs::write(pkg.join("second.apk"), b"apk").unwrap();

        let report = clean(temp.path(), false).unwrap();
        assert!(report.ok());
        assert_eq!(report.removed_package_count(), 1);
        assert!(!pkg.exists());
    }

    #[test]
    fn test_stale_package_deleted() {
        let temp = tempdir().unwrap();
        let pkg = make_valid_package(temp.path(), "pkg.c");

        let report = clean_at(temp.path(), past_window(), false).unwrap();
        assert!(report.ok());
        assert_eq!(report.removed_package_count(), 1);
        assert!(!pkg.exists());
    }

    #[test]
    fn test_nested_subdirectory_condemns_whole_package() {
        let temp = tempdir().unwrap();
        let pkg = make_valid_package(temp.path(), "pkg.d");
        fs::create_dir(pkg.join("extra")).unwrap();
        fs::write(pkg.join("extra/keepsake"), b"x").unwrap();

        let report = clean(temp.path(), false).unwrap();
        assert!(report.ok());
        assert!(!pkg.exists());
    }

    #[test]
    fn test_mixed_root_processes_every_entry() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("stray.tmp"), b"x").unwrap();
        let good = make_valid_package(temp.path(), "pkg.good");
        let bad = temp.path().join("pkg.bad");
        fs::create_dir(&bad).unwrap();
        fs::write(bad.join("junk.bin"), b"x").unwrap();

        let report = clean(temp.path(), false).unwrap();
        assert!(report.ok());
        assert_eq!(report.kept_count(), 1);
        assert_eq!(report.removed_file_count(), 1);
        assert_eq!(report.removed_package_count(), 1);
        assert!(good.exists());
        assert!(!bad.exists());
    }

    #[test]
    fn test_clean_is_idempotent() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("stray.tmp"), b"x").unwrap();
        make_valid_package(temp.path(), "pkg.good");
        let bad = temp.path().join("pkg.bad");
        fs::create_dir(&bad).unwrap();

        let first = clean(temp.path(), false).unwrap();
        assert!(first.ok());

        let names_after_first: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();

        let second = clean(temp.path(), false).unwrap();
        assert!(second.ok());
        assert_eq!(second.kept_count(), 1);
        assert_eq!(second.removed_file_count(), 0);
        assert_eq!(second.removed_package_count(), 0);

        let names_after_second: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names_after_first, names_after_second);
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("stray.tmp"), b"x").unwrap();
        let bad = temp.path().join("pkg.bad");
        fs::create_dir(&bad).unwrap();

        let report = clean(temp.path(), true).unwrap();
        assert!(report.ok());
        assert!(report.is_dry_run());
        assert_eq!(report.removed_file_count(), 0);
        assert_eq!(report.removed_package_count(), 0);
        assert_eq!(report.would_remove_file_count(), 1);
        assert_eq!(report.would_remove_package_count(), 1);
        assert!(temp.path().join("stray.tmp").exists());
        assert!(bad.exists());
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let temp = tempdir().unwrap();
        assert!(clean(&temp.path().join("nope"), false).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_package_is_recorded_and_siblings_processed() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempdir().unwrap();
        let locked = make_valid_package(temp.path(), "pkg.e");
        fs::write(temp.path().join("stray.tmp"), b"x").unwrap();
        let good = make_valid_package(temp.path(), "pkg.good");

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged processes bypass mode bits; nothing to assert then
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let report = clean(temp.path(), false).unwrap();

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(!report.ok());
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.removed_file_count(), 1);
        assert_eq!(report.kept_count(), 1);
        assert!(locked.exists());
        assert!(good.exists());
        assert!(!temp.path().join("stray.tmp").exists());
    }
}
