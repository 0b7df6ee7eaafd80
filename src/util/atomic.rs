//! Atomic file writing via tempfile + rename.
//!
//! A stored item is written to a temporary file in its own directory
//! and then renamed over the target, so a crash mid-write can never
//! leave a half-serialized document behind.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

/// Atomically write `content` to `path`.
///
/// # Errors
///
/// Fails if the parent directory does not exist, the write fails, or
/// the rename fails (e.g. cross-device).
pub fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("no parent directory for {}", path.display()))?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("failed to create temp file in {}", parent.display()))?;

    tmp.write_all(content.as_bytes())
        .and_then(|()| tmp.flush())
        .with_context(|| format!("failed to write temp file for {}", path.display()))?;

    tmp.persist(path)
        .with_context(|| format!("failed to atomically replace {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_and_overwrite() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("item.json");

        atomic_write(&path, "first").expect("write");
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "first");

        atomic_write(&path, "second").expect("overwrite");
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "second");
    }

    #[test]
    fn test_missing_parent_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing/item.json");
        assert!(atomic_write(&path, "x").is_err());
    }
}
