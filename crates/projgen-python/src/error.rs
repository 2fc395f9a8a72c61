//! Error types for projgen-python

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] projgen_core::Error),

    #[error(transparent)]
    Fs(#[from] projgen_fs::Error),

    #[error("Project manifest not found at {path}. Create projgen.toml first.")]
    ManifestNotFound { path: PathBuf },

    #[error("Failed to parse project manifest at {path}: {message}")]
    ManifestParse { path: PathBuf, message: String },
}
