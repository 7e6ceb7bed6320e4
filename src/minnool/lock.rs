//! Cross-process guard that keeps imports from overlapping.
//!
//! Deletes take the same lock for the moment they write, so a delete never
//! rewrites the library from a copy that misses a freshly imported book.
//!
//! The lock is a file created with `create_new`, so only one process can
//! hold it. It is removed when the guard is dropped. A lock left behind by a
//! crashed process is reclaimed once it is older than [`STALE_AFTER`].

use crate::error::{MinnoolError, Result};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{debug, warn};

pub const LOCK_FILE: &str = "import.lock";
pub const STALE_AFTER: Duration = Duration::from_secs(10 * 60);

#[derive(Debug)]
pub struct ImportLock {
    path: PathBuf,
}

impl ImportLock {
    /// Takes the import lock inside `dir`.
    pub fn acquire(dir: &Path) -> Result<Self> {
        Self::acquire_with(dir, STALE_AFTER)
    }

    pub fn acquire_with(dir: &Path, stale_after: Duration) -> Result<Self> {
        fs::create_dir_all(dir)?;
        let path = dir.join(LOCK_FILE);

        match Self::create(&path) {
            Ok(lock) => Ok(lock),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                if !Self::is_stale(&path, stale_after) {
                    return Err(MinnoolError::ImportInProgress { lock: path });
                }
                warn!(lock = %path.display(), "reclaiming stale import lock");
                fs::remove_file(&path)?;
                Self::create(&path).map_err(|e| {
                    if e.kind() == ErrorKind::AlreadyExists {
                        MinnoolError::ImportInProgress { lock: path.clone() }
                    } else {
                        MinnoolError::Io(e)
                    }
                })
            }
            Err(e) => Err(MinnoolError::Io(e)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn create(path: &Path) -> std::io::Result<Self> {
        let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
        writeln!(file, "{}", std::process::id())?;
        debug!(lock = %path.display(), "import lock taken");
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    fn is_stale(path: &Path, stale_after: Duration) -> bool {
        fs::metadata(path)
            .and_then(|m| m.modified())
            .ok()
            .and_then(|modified| SystemTime::now().duration_since(modified).ok())
            .map(|age| age > stale_after)
            .unwrap_or(false)
    }
}

impl Drop for ImportLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn second_acquire_is_rejected_while_held() {
        let dir = tempdir().unwrap();
        let first = ImportLock::acquire(dir.path()).unwrap();

        let err = ImportLock::acquire(dir.path()).unwrap_err();
        assert!(matches!(err, MinnoolError::ImportInProgress { .. }));
        drop(first);

        assert!(ImportLock::acquire(dir.path()).is_ok());
    }

    #[test]
    fn drop_removes_lock_file() {
        let dir = tempdir().unwrap();
        let path = {
            let lock = ImportLock::acquire(dir.path()).unwrap();
            assert!(lock.path().exists());
            lock.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn stale_lock_is_reclaimed() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(LOCK_FILE), "12345\n").unwrap();
        std::thread::sleep(Duration::from_millis(20));

        let lock = ImportLock::acquire_with(dir.path(), Duration::from_millis(1));
        assert!(lock.is_ok());
    }

    #[test]
    fn fresh_foreign_lock_is_respected() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(LOCK_FILE), "12345\n").unwrap();

        let err = ImportLock::acquire(dir.path()).unwrap_err();
        assert!(matches!(err, MinnoolError::ImportInProgress { .. }));
        assert!(dir.path().join(LOCK_FILE).exists());
    }
}
