//! Tests for the Poetry component and PythonProject synthesis

use pretty_assertions::assert_eq;
use projgen_core::{EnvValue, Level, ProjectModel, TaskStep};
use projgen_fs::WriteOutcome;
use projgen_python::env::ENV_PATH_COMMAND;
use projgen_python::{
    Author, PackagingMetadata, Poetry, PythonManifest, PythonProject, PythonProjectOptions,
};
use projgen_test_utils::{FakeRunner, TestProject};
use toml::Value;

const PATH_COMMAND: &str = "echo $(poetry env info -p)/bin:$PATH";

fn metadata() -> PackagingMetadata {
    let mut metadata = PackagingMetadata::new("demo", "0.1.0");
    metadata.description = Some("A demo package".into());
    metadata.license = Some("Apache-2.0".into());
    metadata.authors = vec![Author::new("Jane Doe", Some("jane@example.com"))];
    metadata
}

fn project(fixture: &TestProject, configure: impl FnOnce(&mut PythonProjectOptions)) -> PythonProject {
    let mut options = PythonProjectOptions::new(fixture.root(), metadata());
    configure(&mut options);
    PythonProject::new(options, fixture.runner.clone(), fixture.sink.clone()).unwrap()
}

fn no_post_synth(options: &mut PythonProjectOptions) {
    options.post_synth = false;
}

#[test]
fn test_registers_tasks() {
    let fixture = TestProject::new();
    let project = project(&fixture, no_post_synth);
    let tasks = &project.model().tasks;

    let install = tasks.try_find(Poetry::INSTALL_TASK).unwrap();
    assert_eq!(install.description.as_deref(), Some("Install and upgrade dependencies"));
    assert_eq!(install.steps, vec![TaskStep::Exec("poetry update".into())]);

    let package = tasks.try_find(ProjectModel::PACKAGE_TASK).unwrap();
    assert_eq!(package.steps, vec![TaskStep::Exec("poetry build".into())]);

    let publish_test = tasks.try_find(Poetry::PUBLISH_TEST_TASK).unwrap();
    assert_eq!(
        publish_test.description.as_deref(),
        Some("Uploads the package against a test PyPI endpoint.")
    );
    assert_eq!(
        publish_test.steps,
        vec![TaskStep::Exec("poetry publish -r testpypi".into())]
    );

    let publish = tasks.try_find(Poetry::PUBLISH_TASK).unwrap();
    assert_eq!(publish.description.as_deref(), Some("Uploads the package to PyPI."));
    assert_eq!(publish.steps, vec![TaskStep::Exec("poetry publish".into())]);
}

#[test]
fn test_binds_deferred_environment() {
    let fixture = TestProject::new();
    let project = project(&fixture, no_post_synth);
    let env = project.model().tasks.env();

    assert_eq!(env["VIRTUAL_ENV"], EnvValue::deferred(ENV_PATH_COMMAND));
    assert_eq!(env["VIRTUAL_ENV"].as_str(), "$(poetry env info -p)");
    assert_eq!(env["PATH"].as_str(), "$(echo $(poetry env info -p)/bin:$PATH)");
    assert!(env.values().all(EnvValue::is_deferred));

    // Nothing is evaluated at construction time.
    assert!(fixture.runner.lines().is_empty());
}

#[test]
fn test_package_task_appends_to_existing() {
    let fixture = TestProject::new();
    let mut model = fixture.model("demo");
    model
        .tasks
        .get_mut(ProjectModel::PACKAGE_TASK)
        .unwrap()
        .exec("echo packaging");

    Poetry::new(&mut model, metadata()).unwrap();

    let package = model.tasks.try_find(ProjectModel::PACKAGE_TASK).unwrap();
    assert_eq!(
        package.steps,
        vec![
            TaskStep::Exec("echo packaging".into()),
            TaskStep::Exec("poetry build".into()),
        ]
    );
}

#[test]
fn test_second_poetry_on_same_model_conflicts() {
    let fixture = TestProject::new();
    let mut model = fixture.model("demo");
    Poetry::new(&mut model, metadata()).unwrap();

    let err = Poetry::new(&mut model, metadata()).unwrap_err();
    assert!(err.to_string().contains("install"));
}

#[test]
fn test_synth_writes_pyproject() {
    let fixture = TestProject::new();
    let mut project = project(&fixture, |options| {
        options.post_synth = false;
        options.dependencies = vec!["requests@^2.31".into(), "click".into()];
        options.dev_dependencies = vec!["pytest@^7.0".into()];
    });

    let report = project.synth().unwrap();
    assert!(!report.post_synthesized);

    let pyproject = fixture.read_toml("pyproject.toml");
    assert_eq!(
        pyproject["build-system"]["requires"],
        Value::Array(vec![Value::String("poetry-core>=1.0.0".into())])
    );
    assert_eq!(
        pyproject["build-system"]["build-backend"].as_str(),
        Some("poetry.core.masonry.api")
    );

    let poetry = pyproject["tool"]["poetry"].as_table().unwrap();
    assert_eq!(poetry["name"].as_str(), Some("demo"));
    assert_eq!(poetry["version"].as_str(), Some("0.1.0"));
    assert_eq!(
        poetry["authors"],
        Value::Array(vec![Value::String("Jane Doe <jane@example.com>".into())])
    );

    let deps = poetry["dependencies"].as_table().unwrap();
    assert_eq!(
        deps.keys().collect::<Vec<_>>(),
        vec!["requests", "click", "python"]
    );
    assert_eq!(deps["requests"].as_str(), Some("^2.31"));
    assert_eq!(deps["click"].as_str(), Some("*"));
    assert_eq!(deps["python"].as_str(), Some("^3.6"));

    let dev = poetry["dev-dependencies"].as_table().unwrap();
    assert_eq!(dev.len(), 1);
    assert_eq!(dev["pytest"].as_str(), Some("^7.0"));

    assert!(fixture.read("pyproject.toml").starts_with("# ~~ Generated by projgen."));
}

#[test]
fn test_dependencies_added_after_construction_are_synthesized() {
    let fixture = TestProject::new();
    let mut project = project(&fixture, no_post_synth);
    project.add_dependency("python@^3.11").unwrap();
    project.add_dev_dependency("black@^24.0").unwrap();

    project.synth().unwrap();

    let pyproject = fixture.read_toml("pyproject.toml");
    let poetry = &pyproject["tool"]["poetry"];
    let deps = poetry["dependencies"].as_table().unwrap();
    assert_eq!(deps.len(), 1);
    assert_eq!(deps["python"].as_str(), Some("^3.11"));
    assert_eq!(poetry["dev-dependencies"]["black"].as_str(), Some("^24.0"));
}

#[test]
fn test_pass_through_options() {
    let fixture = TestProject::new();
    let mut project = project(&fixture, |options| {
        options.post_synth = false;
        options.dependencies = vec!["requests@^2.31".into()];
        let overlay = &mut options.metadata.options;
        overlay.insert("license".into(), Value::String("MIT".into()));
        overlay.insert("includePattern".into(), Value::String("src/**".into()));
        let mut shadow = toml::Table::new();
        shadow.insert("flask".into(), Value::String("^3.0".into()));
        overlay.insert("dependencies".into(), Value::Table(shadow));
    });

    project.synth().unwrap();

    let pyproject = fixture.read_toml("pyproject.toml");
    let poetry = pyproject["tool"]["poetry"].as_table().unwrap();
    assert_eq!(poetry["license"].as_str(), Some("MIT"));
    assert_eq!(poetry["include-pattern"].as_str(), Some("src/**"));
    assert!(!poetry.contains_key("includePattern"));

    let deps = poetry["dependencies"].as_table().unwrap();
    assert!(deps.contains_key("requests"));
    assert!(!deps.contains_key("flask"));
}

#[test]
fn test_poetry_config_is_uncommitted() {
    let fixture = TestProject::new();
    let mut project = project(&fixture, no_post_synth);

    project.synth().unwrap();

    let config = fixture.read_toml("poetry.toml");
    assert_eq!(
        config["repositories"]["testpypi"]["url"].as_str(),
        Some("https://test.pypi.org/legacy/")
    );

    let gitignore = fixture.read(".gitignore");
    let lines: Vec<&str> = gitignore.lines().collect();
    assert!(lines.contains(&"/poetry.toml"));
    assert!(lines.contains(&"__pycache__/"));
    assert!(lines.contains(&".venv/"));
    assert!(!lines.contains(&"/pyproject.toml"));
}

#[test]
fn test_task_manifest_written() {
    let fixture = TestProject::new();
    let mut project = project(&fixture, no_post_synth);

    project.synth().unwrap();

    let manifest: serde_json::Value =
        serde_json::from_str(&fixture.read(".projgen/tasks.json")).unwrap();
    assert_eq!(manifest["env"]["VIRTUAL_ENV"], "$(poetry env info -p)");
    assert!(manifest["tasks"]["publish:test"].is_object());
}

#[test]
fn test_resynth_is_unchanged() {
    let fixture = TestProject::new();
    let mut first = project(&fixture, no_post_synth);
    first.synth().unwrap();

    let mut again = project(&fixture, no_post_synth);
    let report = again.synth().unwrap();

    assert_eq!(report.changed().count(), 0);
    assert!(report
        .files
        .iter()
        .all(|file| file.outcome == WriteOutcome::Unchanged));
}

#[test]
fn test_post_synth_without_poetry_skips_install() {
    let fixture = TestProject::new();
    let mut project = project(&fixture, |_| {});

    let report = project.synth().unwrap();

    assert!(report.post_synthesized);
    assert!(fixture.runner.lines().is_empty());
    assert!(fixture.sink.contains("poetry is not installed"));
    assert!(
        fixture
            .sink
            .at(Level::Warn)
            .iter()
            .any(|m| m.contains("Skipping dependency installation"))
    );
    fixture.assert_file_exists("pyproject.toml");
}

#[test]
fn test_post_synth_installs_into_existing_environment() {
    let fixture = TestProject::with_runner(FakeRunner::new().with_program("poetry"));
    fixture.runner.respond(ENV_PATH_COMMAND, "/envs/demo-py3.12\n");
    fixture
        .runner
        .respond(PATH_COMMAND, "/envs/demo-py3.12/bin:/usr/bin\n");
    let mut project = project(&fixture, |_| {});

    project.synth().unwrap();

    assert_eq!(
        fixture.runner.lines(),
        vec![
            ENV_PATH_COMMAND.to_string(),
            ENV_PATH_COMMAND.to_string(),
            PATH_COMMAND.to_string(),
            "poetry update".to_string(),
        ]
    );

    let calls = fixture.runner.calls();
    let install = calls.last().unwrap();
    assert_eq!(install.env["VIRTUAL_ENV"], "/envs/demo-py3.12");
    assert_eq!(install.env["PATH"], "/envs/demo-py3.12/bin:/usr/bin");
    assert!(fixture.sink.contains("Installing dependencies..."));
    assert!(fixture.sink.contains("install | poetry update"));
}

#[test]
fn test_post_synth_creates_environment_first() {
    let fixture = TestProject::with_runner(FakeRunner::new().with_program("poetry"));
    fixture
        .runner
        .respond(ENV_PATH_COMMAND, "")
        .respond(ENV_PATH_COMMAND, "/envs/demo-py3.12");
    let mut project = project(&fixture, |_| {});

    project.synth().unwrap();

    let lines = fixture.runner.lines();
    assert_eq!(lines[..3], [
        ENV_PATH_COMMAND.to_string(),
        "poetry env use python".to_string(),
        ENV_PATH_COMMAND.to_string(),
    ]);
    assert_eq!(lines.last().map(String::as_str), Some("poetry update"));
    assert!(fixture.sink.contains("Environment successfully created"));
}

#[test]
fn test_failed_install_fails_synth() {
    let fixture = TestProject::with_runner(FakeRunner::new().with_program("poetry"));
    fixture.runner.respond(ENV_PATH_COMMAND, "/envs/demo-py3.12");
    fixture.runner.fail("poetry update", 1, "SolverProblemError");
    let mut project = project(&fixture, |_| {});

    let err = project.synth().unwrap_err();

    assert!(err.to_string().contains("poetry update"));
    // Files were written before post-synthesis ran.
    fixture.assert_file_exists("pyproject.toml");
}

#[test]
fn test_project_from_manifest() {
    let fixture = TestProject::new();
    fixture.write(
        "projgen.toml",
        r#"
dependencies = ["requests@^2.31"]

[project]
name = "from-manifest"
license = "Apache-2.0"

[settings]
post-synth = false
gitignore = ["/notebooks/"]

[poetry]
license = "MIT"
"#,
    );

    let manifest = PythonManifest::load(fixture.root()).unwrap();
    let mut project = PythonProject::new(
        manifest.into_options(fixture.root()),
        fixture.runner.clone(),
        fixture.sink.clone(),
    )
    .unwrap();
    project.synth().unwrap();

    let pyproject = fixture.read_toml("pyproject.toml");
    assert_eq!(pyproject["tool"]["poetry"]["name"].as_str(), Some("from-manifest"));
    assert_eq!(pyproject["tool"]["poetry"]["version"].as_str(), Some("0.1.0"));
    assert_eq!(pyproject["tool"]["poetry"]["license"].as_str(), Some("MIT"));
    assert!(fixture.read(".gitignore").lines().any(|l| l == "/notebooks/"));
}
