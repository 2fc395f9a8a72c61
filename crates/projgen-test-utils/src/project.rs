//! [`TestProject`] fixture for synthesis scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use projgen_core::{ProjectModel, ProjectOptions};
use tempfile::TempDir;

use crate::fakes::{FakeRunner, RecordingSink};

/// A temporary project directory with fake collaborators.
///
/// # Example
///
/// ```rust,no_run
/// use projgen_test_utils::TestProject;
///
/// let fixture = TestProject::new();
/// let model = fixture.model("demo");
/// assert_eq!(model.name(), "demo");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
    pub runner: Arc<FakeRunner>,
    pub sink: Arc<RecordingSink>,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    pub fn new() -> Self {
        Self::with_runner(FakeRunner::new())
    }

    pub fn with_runner(runner: FakeRunner) -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
            runner: Arc::new(runner),
            sink: Arc::new(RecordingSink::new()),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn options(&self, name: &str) -> ProjectOptions {
        ProjectOptions::new(name, self.root())
    }

    /// A model wired to this fixture's fakes.
    pub fn model(&self, name: &str) -> ProjectModel {
        self.model_with(self.options(name))
    }

    pub fn model_with(&self, options: ProjectOptions) -> ProjectModel {
        ProjectModel::new(options, self.runner.clone(), self.sink.clone())
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative))
            .unwrap_or_else(|e| panic!("failed to read {relative}: {e}"))
    }

    /// Parse a generated TOML file.
    pub fn read_toml(&self, relative: &str) -> toml::Table {
        toml::from_str(&self.read(relative))
            .unwrap_or_else(|e| panic!("{relative} is not valid TOML: {e}"))
    }

    pub fn assert_file_exists(&self, relative: &str) {
        assert!(
            self.path(relative).is_file(),
            "expected {relative} to exist in {}",
            self.root().display()
        );
    }
}
