//! Content fingerprints for generated files
//!
//! Synthesis fingerprints every file it renders so a run can report exactly
//! what it produced, e.g. for a CI check that committed files are current.

use std::fmt;

use sha2::{Digest, Sha256};

/// SHA-256 fingerprint of rendered file content, shown as `sha256:<hex>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Checksum(String);

impl Checksum {
    pub const ALGORITHM: &'static str = "sha256";

    pub fn of(content: impl AsRef<[u8]>) -> Self {
        Self(format!("{:x}", Sha256::digest(content.as_ref())))
    }

    /// Lowercase hex digest without the algorithm prefix.
    pub fn hex(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", Self::ALGORITHM, self.0)
    }
}
