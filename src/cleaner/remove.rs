//! Best-effort removal
//!
//! Deletion is idempotent: the cache has a concurrent writer, so a target
//! that vanished between scan and removal is success, not failure.

use std::fs;
use std::io;
use std::path::Path;

/// Unlink one loose entry. "Already gone" is success.
pub fn remove_file(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err),
    }
}

/// Recursively delete one condemned package directory. "Already gone" is
/// success.
pub fn remove_package(path: &Path) -> io::Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_remove_file() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("stray.tmp");
        fs::write(&file, b"x").unwrap();

        remove_file(&file).unwrap();
        assert!(!file.exists());
    }

    #[test]
    fn test_remove_file_already_gone() {
        let temp = tempdir().unwrap();
        remove_file(&temp.path().join("never-existed")).unwrap();
    }

    #[test]
    fn test_remove_package_recursively() {
        let temp = tempdir().unwrap();
        let pkg = temp.path().join("com.example.app");
        fs::create_dir_all(pkg.join("extra/deep")).unwrap();
        fs::write(pkg.join("base.apk"), b"apk").unwrap();
        fs::write(pkg.join("extra/deep/junk"), b"x").unwrap();

        remove_package(&pkg).unwrap();
        assert!(!pkg.exists());
    }

    #[test]
    fn test_remove_package_already_gone() {
        let temp = tempdir().unwrap();
        remove_package(&temp.path().join("never-existed")).unwrap();
    }
}
