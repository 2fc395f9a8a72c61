//! Error types for projgen-fs

use std::path::PathBuf;

/// Result type for projgen-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in projgen-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display_contains_path() {
        let err = Error::io(
            "/tmp/project/pyproject.toml",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let display = err.to_string();
        assert!(display.contains("pyproject.toml"));
        assert!(display.contains("denied"));
    }
}
