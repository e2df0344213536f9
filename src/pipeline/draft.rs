//! Scoped ownership of the shared draft file

use std::io;
use std::path::{Path, PathBuf};

/// Removes the draft file when released or dropped.
///
/// Every task creates one of these before the transform step, so the draft is
/// gone before the next task starts, on every exit path.
#[derive(Debug)]
pub struct DraftGuard {
    path: PathBuf,
    armed: bool,
}

impl DraftGuard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            armed: true,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the draft now and report whether that worked.
    ///
    /// A draft that was never written is not an error.
    pub fn release(mut self) -> io::Result<()> {
        self.armed = false;
        remove_if_present(&self.path)
    }
}

impl Drop for DraftGuard {
    fn drop(&mut self) {
        if self.armed {
            let _ = remove_if_present(&self.path);
        }
    }
}

pub(crate) fn remove_if_present(path: &Path) -> io::Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_release_removes_draft() {
        let dir = TempDir::new().unwrap();
        let draft = dir.path().join("draft.tei");
        std::fs::write(&draft, "<TEI/>").unwrap();

        let guard = DraftGuard::new(&draft);
        guard.release().unwrap();

        assert!(!draft.exists());
    }

    #[test]
    fn test_release_without_draft_is_ok() {
        let dir = TempDir::new().unwrap();
        let guard = DraftGuard::new(dir.path().join("draft.tei"));
        assert!(guard.release().is_ok());
    }

    #[test]
    fn test_drop_removes_draft() {
        let dir = TempDir::new().unwrap();
        let draft = dir.path().join("draft.tei");
        {
            let _guard = DraftGuard::new(&draft);
            std::fs::write(&draft, "<TEI/>").unwrap();
        }
        assert!(!draft.exists());
    }
}
