//! Atomic output-file writing with advisory locking
//!
//! The full document is composed in memory before any file handle is
//! touched; a failed run therefore leaves the previous output file, if
//! any, untouched.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use fs2::FileExt;

use crate::{Error, Result};

/// Write content atomically to a file.
///
/// Uses the write-to-temp-then-rename strategy to prevent partial writes,
/// holding an exclusive advisory lock on the temp file while writing.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Temp file in the same directory, so the rename stays on one filesystem.
    let temp_name = format!(
        ".{}.{}.tmp",
        path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file
        .sync_all()
        .map_err(|e| Error::io(&temp_path, e))?;

    // Release lock (implicit on drop, but be explicit)
    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })?;

    fs::rename(&temp_path, path).map_err(|e| Error::io(path, e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn writes_content_and_creates_parents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prod").join(".env.prod");
        write_atomic(&path, b"DB_HOST=prod-db\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "DB_HOST=prod-db\n");
    }

    #[test]
    fn replaces_existing_content_wholesale() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.env");
        write_atomic(&path, b"A=1\nB=2\n").unwrap();
        write_atomic(&path, b"A=3\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "A=3\n");
    }

    #[test]
    fn leaves_no_temp_files_behind() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.env");
        write_atomic(&path, b"A=1\n").unwrap();
        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("out.env")]);
    }
}
