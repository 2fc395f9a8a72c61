//! Filesystem layer for projgen
//!
//! Provides normalized path handling, well-known project paths and
//! atomic writes and content fingerprints for generated files.

pub mod checksum;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use checksum::Checksum;
pub use constants::ProjectPath;
pub use error::{Error, Result};
pub use io::WriteOutcome;
pub use path::NormalizedPath;
