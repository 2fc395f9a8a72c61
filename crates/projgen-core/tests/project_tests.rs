//! Tests for project synthesis

use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use projgen_core::{
    Component, DependencyKind, GeneratedFile, Project, ProjectModel, Result, Tasks,
};
use projgen_fs::{Checksum, WriteOutcome};
use projgen_test_utils::TestProject;

/// Records lifecycle calls and contributes one file.
#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<String>>,
}

impl Component for Recorder {
    fn id(&self) -> &str {
        "recorder"
    }

    fn synthesize(&self, project: &mut ProjectModel) -> Result<()> {
        self.events.lock().unwrap().push("synthesize".into());
        let mut table = toml::Table::new();
        table.insert(
            "deps".into(),
            toml::Value::Integer(project.deps.len() as i64),
        );
        project.add_file(GeneratedFile::toml("recorded.toml", table));
        project.add_file(GeneratedFile::toml("local.toml", toml::Table::new()).uncommitted());
        Ok(())
    }

    fn post_synthesize(&self, project: &ProjectModel) -> Result<()> {
        assert!(project.root().join("recorded.toml").is_file());
        self.events.lock().unwrap().push("post_synthesize".into());
        Ok(())
    }
}

#[test]
fn test_new_project_has_standard_tasks() {
    let fixture = TestProject::new();
    let model = fixture.model("demo");

    let names: Vec<_> = model.tasks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["test", "package", "build"]);
}

#[test]
fn test_synth_writes_files_and_runs_lifecycle_in_order() {
    let fixture = TestProject::new();
    let mut model = fixture.model("demo");
    model
        .add_dependency("requests@^2.0", DependencyKind::Runtime)
        .unwrap();
    let recorder = Arc::new(Recorder::default());
    let mut project = Project::new(model);
    project.add_component(recorder.clone());

    let report = project.synth().unwrap();

    assert!(report.post_synthesized);
    assert_eq!(
        *recorder.events.lock().unwrap(),
        vec!["synthesize".to_string(), "post_synthesize".to_string()]
    );
    assert_eq!(fixture.read_toml("recorded.toml")["deps"].as_integer(), Some(1));
    fixture.assert_file_exists(".projgen/tasks.json");

    let gitignore = fixture.read(".gitignore");
    assert!(gitignore.lines().any(|l| l == "/local.toml"));
    assert!(!gitignore.lines().any(|l| l == "/recorded.toml"));
}

#[test]
fn test_tasks_manifest_reloads() {
    let fixture = TestProject::new();
    let mut project = Project::new(fixture.model("demo"));
    project.synth().unwrap();

    let reloaded = Tasks::from_manifest(&fixture.read(".projgen/tasks.json")).unwrap();
    assert_eq!(&reloaded, &project.model().tasks);
}

#[test]
fn test_post_synth_can_be_disabled() {
    let fixture = TestProject::new();
    let mut options = fixture.options("demo");
    options.post_synth = false;
    let recorder = Arc::new(Recorder::default());
    let mut project = Project::new(fixture.model_with(options));
    project.add_component(recorder.clone());

    let report = project.synth().unwrap();

    assert!(!report.post_synthesized);
    assert_eq!(*recorder.events.lock().unwrap(), vec!["synthesize".to_string()]);
}

#[test]
fn test_second_synth_leaves_files_unchanged() {
    let fixture = TestProject::new();
    let mut project = Project::new(fixture.model("demo"));
    project.add_component(Arc::new(Recorder::default()));

    let first = project.synth().unwrap();
    assert!(first.files.iter().all(|f| f.outcome == WriteOutcome::Created));

    let second = project.synth().unwrap();
    assert_eq!(second.changed().count(), 0);
}

#[test]
fn test_gitignore_patterns_deduplicated() {
    let fixture = TestProject::new();
    let mut model = fixture.model("demo");
    model.add_gitignore(&["/dist/", "__pycache__/"]);
    model.add_gitignore(&["/dist/"]);
    let mut project = Project::new(model);
    project.synth().unwrap();

    let gitignore = fixture.read(".gitignore");
    assert_eq!(gitignore.lines().filter(|l| *l == "/dist/").count(), 1);
}

#[test]
fn test_report_fingerprints_files_on_disk() {
    let fixture = TestProject::new();
    let mut project = Project::new(fixture.model("demo"));
    project.add_component(Arc::new(Recorder::default()));

    let first = project.synth().unwrap();
    for file in &first.files {
        assert_eq!(file.checksum, Checksum::of(fixture.read(&file.path)));
    }

    let second = project.synth().unwrap();
    assert_eq!(first.files.len(), second.files.len());
    for (a, b) in first.files.iter().zip(&second.files) {
        assert_eq!(a.path, b.path);
        assert_eq!(a.checksum, b.checksum);
        assert_eq!(b.outcome, WriteOutcome::Unchanged);
    }
}
