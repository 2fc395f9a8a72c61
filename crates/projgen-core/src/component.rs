//! Component trait

use crate::error::Result;
use crate::project::ProjectModel;

/// A building block of a project.
///
/// Components register tasks and files when they are constructed, then get
/// two lifecycle callbacks: `synthesize` before files are written and
/// `post_synthesize` after they are on disk.
pub trait Component: Send + Sync {
    fn id(&self) -> &str;

    /// Contribute final file content. Runs before any file is written.
    fn synthesize(&self, _project: &mut ProjectModel) -> Result<()> {
        Ok(())
    }

    /// Act on the written project, e.g. provision environments.
    fn post_synthesize(&self, _project: &ProjectModel) -> Result<()> {
        Ok(())
    }
}
