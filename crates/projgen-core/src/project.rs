//! Project model and synthesis driver

use std::path::{Path, PathBuf};
use std::sync::Arc;

use projgen_fs::{Checksum, NormalizedPath, ProjectPath, WriteOutcome, io};

use crate::component::Component;
use crate::deps::{Dependencies, DependencyKind};
use crate::diagnostics::DiagnosticSink;
use crate::error::Result;
use crate::exec::CommandRunner;
use crate::files::{Files, GeneratedFile};
use crate::runtime::TaskRuntime;
use crate::tasks::{Task, Tasks};

/// Options for a new project
#[derive(Debug, Clone)]
pub struct ProjectOptions {
    pub name: String,
    /// Directory the project is synthesized into
    pub root: PathBuf,
    /// Run post-synthesis steps (environment setup, installs)
    pub post_synth: bool,
    /// Extra patterns for the generated ignore file
    pub gitignore: Vec<String>,
}

impl ProjectOptions {
    pub fn new(name: impl Into<String>, root: impl AsRef<Path>) -> Self {
        Self {
            name: name.into(),
            root: root.as_ref().to_path_buf(),
            post_synth: true,
            gitignore: Vec::new(),
        }
    }
}

/// Shared state every component contributes to
pub struct ProjectModel {
    name: String,
    root: PathBuf,
    post_synth: bool,
    gitignore: Vec<String>,
    pub deps: Dependencies,
    pub tasks: Tasks,
    pub files: Files,
    runner: Arc<dyn CommandRunner>,
    sink: Arc<dyn DiagnosticSink>,
}

impl ProjectModel {
    /// Standard task names every project starts with.
    pub const BUILD_TASK: &'static str = "build";
    pub const TEST_TASK: &'static str = "test";
    pub const PACKAGE_TASK: &'static str = "package";

    pub fn new(
        options: ProjectOptions,
        runner: Arc<dyn CommandRunner>,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        let mut tasks = Tasks::new();
        tasks.set_task(Task::new(Self::TEST_TASK).with_description("Run tests"));
        tasks.set_task(
            Task::new(Self::PACKAGE_TASK).with_description("Create a distribution package"),
        );
        tasks
            .set_task(Task::new(Self::BUILD_TASK).with_description("Full release build"))
            .spawn(Self::TEST_TASK)
            .spawn(Self::PACKAGE_TASK);

        Self {
            name: options.name,
            root: options.root,
            post_synth: options.post_synth,
            gitignore: options.gitignore,
            deps: Dependencies::new(),
            tasks,
            files: Files::new(),
            runner,
            sink,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn runner(&self) -> &dyn CommandRunner {
        self.runner.as_ref()
    }

    pub fn sink(&self) -> &dyn DiagnosticSink {
        self.sink.as_ref()
    }

    pub fn post_synth_enabled(&self) -> bool {
        self.post_synth
    }

    /// Declare a dependency from a `"<name>@<constraint>"` spec.
    pub fn add_dependency(&mut self, spec: &str, kind: DependencyKind) -> Result<()> {
        self.deps.add(spec, kind)?;
        Ok(())
    }

    pub fn add_task(&mut self, task: Task) -> Result<&mut Task> {
        self.tasks.add_task(task)
    }

    pub fn add_file(&mut self, file: GeneratedFile) {
        self.files.add(file);
    }

    /// Add patterns to the generated ignore file.
    pub fn add_gitignore(&mut self, patterns: &[&str]) {
        for pattern in patterns {
            if !self.gitignore.iter().any(|p| p == pattern) {
                self.gitignore.push((*pattern).to_string());
            }
        }
    }

    /// A runtime bound to this project's tasks, runner and sink.
    pub fn runtime(&self) -> TaskRuntime<'_> {
        TaskRuntime::new(
            &self.root,
            &self.tasks,
            self.runner.as_ref(),
            self.sink.as_ref(),
        )
    }

    /// Declare the files the project itself owns: task manifest and ignore file.
    fn add_project_files(&mut self) -> Result<()> {
        self.files.add(GeneratedFile::json(
            ProjectPath::TasksManifest.as_str(),
            self.tasks.to_manifest()?,
        ));

        let mut lines = self.gitignore.clone();
        lines.extend(self.files.uncommitted_paths());
        self.files
            .add(GeneratedFile::lines(ProjectPath::GitIgnore.as_str(), lines));
        Ok(())
    }

    fn write_files(&self) -> Result<Vec<WrittenFile>> {
        let root = NormalizedPath::new(&self.root);
        let mut written = Vec::with_capacity(self.files.len());
        for file in self.files.iter() {
            let content = file.render()?;
            let outcome = io::write_if_changed(&root.join(file.path()), &content)?;
            let checksum = Checksum::of(&content);
            tracing::debug!(path = %file.path(), ?outcome, %checksum, "Wrote generated file");
            written.push(WrittenFile {
                path: file.path().to_string(),
                outcome,
                checksum,
            });
        }
        Ok(written)
    }
}

/// One generated file as left on disk by a synthesis run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    /// Path relative to the project root
    pub path: String,
    pub outcome: WriteOutcome,
    /// Fingerprint of the rendered content now on disk
    pub checksum: Checksum,
}

/// What a synthesis run did
#[derive(Debug, Clone, Default)]
pub struct SynthReport {
    /// Every generated file, in declaration order
    pub files: Vec<WrittenFile>,
    /// Whether post-synthesis steps ran
    pub post_synthesized: bool,
}

impl SynthReport {
    pub fn changed(&self) -> impl Iterator<Item = &str> {
        self.files
            .iter()
            .filter(|file| file.outcome != WriteOutcome::Unchanged)
            .map(|file| file.path.as_str())
    }
}

/// A project: the model plus the components that contribute to it
pub struct Project {
    model: ProjectModel,
    components: Vec<Arc<dyn Component>>,
}

impl Project {
    pub fn new(model: ProjectModel) -> Self {
        Self {
            model,
            components: Vec::new(),
        }
    }

    pub fn model(&self) -> &ProjectModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut ProjectModel {
        &mut self.model
    }

    pub fn add_component(&mut self, component: Arc<dyn Component>) {
        self.components.push(component);
    }

    /// Synthesize the project.
    ///
    /// Components finalize their files, every file is written, then (when
    /// enabled) components run their post-synthesis steps in order.
    pub fn synth(&mut self) -> Result<SynthReport> {
        tracing::info!(project = %self.model.name, root = %self.model.root.display(), "Synthesizing project");

        for component in &self.components {
            component.synthesize(&mut self.model)?;
        }
        self.model.add_project_files()?;

        let files = self.model.write_files()?;

        let post_synthesized = self.model.post_synth;
        if post_synthesized {
            for component in &self.components {
                tracing::debug!(component = component.id(), "Post-synthesizing");
                component.post_synthesize(&self.model)?;
            }
        }

        Ok(SynthReport {
            files,
            post_synthesized,
        })
    }
}
