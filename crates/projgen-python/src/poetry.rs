//! Poetry component
//!
//! Construction registers tasks, task-environment bindings and the
//! uncommitted `poetry.toml`. Synthesis writes `pyproject.toml` from the
//! dependency registry as it stands at that point. Post-synthesis provisions
//! the environment and installs dependencies.

use projgen_core::{
    Component, DependencyKind, EnvValue, GeneratedFile, ProjectModel, Result, Task,
};
use toml::{Table, Value};

use crate::env::{ENV_PATH_COMMAND, EnvironmentProvisioner, ProvisionOutcome};
use crate::pyproject::{PYPROJECT_FILE, PackagingMetadata, build_descriptor};
use crate::synth::{DependencyMap, synth_dev_dependencies, synth_runtime_dependencies};

/// Secondary Poetry config, kept out of version control.
pub const POETRY_CONFIG_FILE: &str = "poetry.toml";

/// Alias of the test registry in `poetry.toml`.
pub const TEST_REGISTRY_ALIAS: &str = "testpypi";

/// Upload endpoint of the test registry.
pub const TEST_REGISTRY_URL: &str = "https://test.pypi.org/legacy/";

/// Integrates Poetry into a project.
#[derive(Debug)]
pub struct Poetry {
    metadata: PackagingMetadata,
}

impl Poetry {
    pub const INSTALL_TASK: &'static str = "install";
    pub const PUBLISH_TASK: &'static str = "publish";
    pub const PUBLISH_TEST_TASK: &'static str = "publish:test";

    /// Register Poetry's tasks and config file on `project`.
    pub fn new(project: &mut ProjectModel, metadata: PackagingMetadata) -> Result<Self> {
        register_tasks(project)?;
        project.add_file(poetry_config());
        Ok(Self { metadata })
    }

    pub fn metadata(&self) -> &PackagingMetadata {
        &self.metadata
    }

    /// Declare a runtime dependency from a `"<name>@<constraint>"` spec.
    pub fn add_dependency(&self, project: &mut ProjectModel, spec: &str) -> Result<()> {
        project.add_dependency(spec, DependencyKind::Runtime)
    }

    /// Declare a development-environment dependency.
    pub fn add_dev_dependency(&self, project: &mut ProjectModel, spec: &str) -> Result<()> {
        project.add_dependency(spec, DependencyKind::DevEnv)
    }

    pub fn synth_dependencies(&self, project: &ProjectModel) -> DependencyMap {
        synth_runtime_dependencies(&project.deps)
    }

    pub fn synth_dev_dependencies(&self, project: &ProjectModel) -> DependencyMap {
        synth_dev_dependencies(&project.deps)
    }

    /// The `pyproject.toml` tree for the project's current state.
    pub fn descriptor(&self, project: &ProjectModel) -> Table {
        build_descriptor(
            &self.metadata,
            &self.synth_dependencies(project),
            &self.synth_dev_dependencies(project),
        )
    }

    /// Make sure a Poetry environment exists for the project.
    pub fn setup_environment(&self, project: &ProjectModel) -> Result<ProvisionOutcome> {
        EnvironmentProvisioner::new(project.root(), project.runner(), project.sink()).ensure()
    }

    /// Run the install task.
    pub fn install_dependencies(&self, project: &ProjectModel) -> Result<()> {
        project.sink().info("Installing dependencies...");
        project.runtime().run(Self::INSTALL_TASK)
    }
}

impl Component for Poetry {
    fn id(&self) -> &str {
        "poetry"
    }

    fn synthesize(&self, project: &mut ProjectModel) -> Result<()> {
        let descriptor = self.descriptor(project);
        project.add_file(GeneratedFile::toml(PYPROJECT_FILE, descriptor));
        Ok(())
    }

    fn post_synthesize(&self, project: &ProjectModel) -> Result<()> {
        match self.setup_environment(project)? {
            ProvisionOutcome::ToolMissing => {
                project
                    .sink()
                    .warn("Skipping dependency installation because poetry is not installed.");
                Ok(())
            }
            ProvisionOutcome::Existing(_) | ProvisionOutcome::Created(_) => {
                self.install_dependencies(project)
            }
        }
    }
}

/// Register Poetry's tasks and the task-environment bindings.
///
/// `VIRTUAL_ENV` and `PATH` are deferred expressions; they resolve the
/// environment when a task runs, whether or not it exists yet.
fn register_tasks(project: &mut ProjectModel) -> Result<()> {
    project
        .add_task(Task::new(Poetry::INSTALL_TASK).with_description("Install and upgrade dependencies"))?
        .exec("poetry update");

    project
        .tasks
        .add_environment("VIRTUAL_ENV", EnvValue::deferred(ENV_PATH_COMMAND));
    project.tasks.add_environment(
        "PATH",
        EnvValue::deferred(&format!("echo $({ENV_PATH_COMMAND})/bin:$PATH")),
    );

    if project.tasks.try_find(ProjectModel::PACKAGE_TASK).is_none() {
        project.add_task(
            Task::new(ProjectModel::PACKAGE_TASK).with_description("Create a distribution package"),
        )?;
    }
    if let Some(package) = project.tasks.get_mut(ProjectModel::PACKAGE_TASK) {
        package.exec("poetry build");
    }

    project
        .add_task(
            Task::new(Poetry::PUBLISH_TEST_TASK)
                .with_description("Uploads the package against a test PyPI endpoint."),
        )?
        .exec(format!("poetry publish -r {TEST_REGISTRY_ALIAS}"));

    project
        .add_task(Task::new(Poetry::PUBLISH_TASK).with_description("Uploads the package to PyPI."))?
        .exec("poetry publish");

    Ok(())
}

fn poetry_config() -> GeneratedFile {
    let mut registry = Table::new();
    registry.insert("url".into(), Value::String(TEST_REGISTRY_URL.into()));
    let mut repositories = Table::new();
    repositories.insert(TEST_REGISTRY_ALIAS.into(), Value::Table(registry));
    let mut config = Table::new();
    config.insert("repositories".into(), Value::Table(repositories));

    GeneratedFile::toml(POETRY_CONFIG_FILE, config).uncommitted()
}
