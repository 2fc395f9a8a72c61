//! File I/O for generated files
//!
//! Writes are staged in a temporary file next to the target and renamed into
//! place, so a reader sees either the old file or the new one.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use fs2::FileExt;
use tempfile::NamedTempFile;

use crate::{Error, NormalizedPath, Result};

/// What happened when a generated file was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Updated,
    Unchanged,
}

/// Replace `path` with `content` in one rename.
///
/// The staged file is held under an exclusive lock while it is filled. On any
/// failure it is dropped unpersisted, which deletes it.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let target = path.to_native();
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;

    let mut staged = NamedTempFile::new_in(&dir).map_err(|e| Error::io(&dir, e))?;
    staged
        .as_file()
        .lock_exclusive()
        .map_err(|_| Error::LockFailed {
            path: target.clone(),
        })?;
    staged
        .write_all(content)
        .and_then(|()| staged.as_file().sync_all())
        .map_err(|e| Error::io(staged.path(), e))?;

    staged
        .persist(&target)
        .map_err(|e| Error::io(&target, e.error))?;
    Ok(())
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Write text content to a file atomically.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// Write text only when it differs from what is already on disk.
///
/// An unreadable existing file is treated as changed and overwritten.
pub fn write_if_changed(path: &NormalizedPath, content: &str) -> Result<WriteOutcome> {
    let outcome = match fs::read(path.to_native()) {
        Ok(existing) if existing == content.as_bytes() => {
            tracing::trace!(path = %path, "Generated file unchanged");
            return Ok(WriteOutcome::Unchanged);
        }
        Ok(_) => WriteOutcome::Updated,
        Err(e) if e.kind() == ErrorKind::NotFound => WriteOutcome::Created,
        Err(e) => {
            tracing::debug!(path = %path, error = %e, "Existing file unreadable, overwriting");
            WriteOutcome::Updated
        }
    };

    write_text(path, content)?;
    Ok(outcome)
}
