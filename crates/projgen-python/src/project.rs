//! Poetry-managed Python project

use std::path::PathBuf;
use std::sync::Arc;

use projgen_core::{
    CommandRunner, DiagnosticSink, Project, ProjectModel, ProjectOptions, SynthReport,
};

use crate::error::Result;
use crate::poetry::Poetry;
use crate::pyproject::PackagingMetadata;

/// Ignore patterns every Python project gets.
const PYTHON_GITIGNORE: &[&str] = &[
    "__pycache__/",
    "*.py[cod]",
    "*.egg-info/",
    "/dist/",
    "/build/",
    ".venv/",
    ".pytest_cache/",
];

/// Options for [`PythonProject::new`]
#[derive(Debug, Clone)]
pub struct PythonProjectOptions {
    pub root: PathBuf,
    pub metadata: PackagingMetadata,
    /// Runtime dependency specs (`"<name>@<constraint>"`)
    pub dependencies: Vec<String>,
    /// Development-environment dependency specs
    pub dev_dependencies: Vec<String>,
    pub post_synth: bool,
    /// Extra ignore patterns
    pub gitignore: Vec<String>,
}

impl PythonProjectOptions {
    pub fn new(root: impl Into<PathBuf>, metadata: PackagingMetadata) -> Self {
        Self {
            root: root.into(),
            metadata,
            dependencies: Vec::new(),
            dev_dependencies: Vec::new(),
            post_synth: true,
            gitignore: Vec::new(),
        }
    }
}

/// A project whose dependencies, packaging and environment Poetry manages.
pub struct PythonProject {
    project: Project,
    poetry: Arc<Poetry>,
}

impl PythonProject {
    pub fn new(
        options: PythonProjectOptions,
        runner: Arc<dyn CommandRunner>,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Result<Self> {
        let mut project_options = ProjectOptions::new(&options.metadata.name, &options.root);
        project_options.post_synth = options.post_synth;
        project_options.gitignore = options.gitignore;

        let mut model = ProjectModel::new(project_options, runner, sink);
        model.add_gitignore(PYTHON_GITIGNORE);

        let poetry = Arc::new(Poetry::new(&mut model, options.metadata)?);
        for spec in &options.dependencies {
            poetry.add_dependency(&mut model, spec)?;
        }
        for spec in &options.dev_dependencies {
            poetry.add_dev_dependency(&mut model, spec)?;
        }

        let mut project = Project::new(model);
        project.add_component(poetry.clone());

        Ok(Self { project, poetry })
    }

    pub fn poetry(&self) -> &Poetry {
        &self.poetry
    }

    pub fn model(&self) -> &ProjectModel {
        self.project.model()
    }

    pub fn add_dependency(&mut self, spec: &str) -> Result<()> {
        self.poetry.add_dependency(self.project.model_mut(), spec)?;
        Ok(())
    }

    pub fn add_dev_dependency(&mut self, spec: &str) -> Result<()> {
        self.poetry
            .add_dev_dependency(self.project.model_mut(), spec)?;
        Ok(())
    }

    /// Write every file, then provision and install unless disabled.
    pub fn synth(&mut self) -> Result<SynthReport> {
        Ok(self.project.synth()?)
    }
}
