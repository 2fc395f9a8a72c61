//! Add command implementation
//!
//! Edits `projgen.toml` in place with `toml_edit` so comments and layout
//! survive.

use std::path::Path;

use colored::Colorize;
use projgen_core::DependencySpec;
use projgen_fs::{NormalizedPath, ProjectPath, io};
use toml_edit::{Array, DocumentMut, Item};

use crate::error::{CliError, Result};

/// Run the add command
///
/// Appends `spec` to `dependencies` (or `dev-dependencies`), replacing an
/// existing entry for the same package.
pub fn run_add(path: &Path, spec: &str, dev: bool) -> Result<()> {
    let parsed: DependencySpec = spec.parse()?;
    let entry = match &parsed.version {
        Some(version) => format!("{}@{}", parsed.name, version),
        None => parsed.name.clone(),
    };
    let key = if dev { "dev-dependencies" } else { "dependencies" };

    let manifest_path = NormalizedPath::new(path).join(ProjectPath::Manifest.as_str());
    if !manifest_path.is_file() {
        return Err(CliError::user(format!(
            "No projgen.toml in {}. Create one with a [project] section first.",
            path.display()
        )));
    }

    let mut doc: DocumentMut = io::read_text(&manifest_path)?.parse()?;
    if doc.get(key).is_none() {
        doc.insert(key, toml_edit::value(Array::new()));
    }
    let list = doc
        .get_mut(key)
        .and_then(Item::as_array_mut)
        .ok_or_else(|| CliError::user(format!("`{key}` in projgen.toml must be an array")))?;

    let existing = list.iter().position(|item| {
        item.as_str()
            .and_then(|s| s.parse::<DependencySpec>().ok())
            .is_some_and(|s| s.name == parsed.name)
    });
    match existing {
        Some(index) => {
            list.replace(index, entry.as_str());
        }
        None => list.push(entry.as_str()),
    }

    io::write_text(&manifest_path, &doc.to_string())?;

    let verb = if existing.is_some() { "Updated" } else { "Added" };
    println!(
        "{} {} {} to {}.",
        "OK".green().bold(),
        verb,
        entry.cyan(),
        key
    );
    println!("Run {} to apply.", "projgen synth".cyan());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    const MANIFEST: &str = "# my project\ndependencies = [\"requests@^2.0\"]\n\n[project]\nname = \"demo\" # inline note\n";

    fn setup(content: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("projgen.toml"), content).unwrap();
        temp
    }

    fn manifest(temp: &TempDir) -> toml::Table {
        toml::from_str(&fs::read_to_string(temp.path().join("projgen.toml")).unwrap()).unwrap()
    }

    fn strings(value: &toml::Value) -> Vec<&str> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect()
    }

    #[test]
    fn test_add_runtime_dependency_preserves_formatting() {
        let temp = setup(MANIFEST);

        run_add(temp.path(), "click@^8.1", false).unwrap();

        let content = fs::read_to_string(temp.path().join("projgen.toml")).unwrap();
        assert!(content.starts_with("# my project\n"));
        assert!(content.contains("# inline note"));
        assert_eq!(
            strings(&manifest(&temp)["dependencies"]),
            vec!["requests@^2.0", "click@^8.1"]
        );
    }

    #[test]
    fn test_add_dev_dependency_creates_list() {
        let temp = setup(MANIFEST);

        run_add(temp.path(), "pytest@^7.0", true).unwrap();

        let table = manifest(&temp);
        assert_eq!(strings(&table["dev-dependencies"]), vec!["pytest@^7.0"]);
        assert_eq!(table["project"]["name"].as_str(), Some("demo"));
    }

    #[test]
    fn test_add_replaces_same_package() {
        let temp = setup(MANIFEST);

        run_add(temp.path(), "requests@^2.31", false).unwrap();

        assert_eq!(strings(&manifest(&temp)["dependencies"]), vec!["requests@^2.31"]);
    }

    #[test]
    fn test_add_without_constraint() {
        let temp = setup(MANIFEST);

        run_add(temp.path(), "rich@", false).unwrap();

        assert_eq!(
            strings(&manifest(&temp)["dependencies"]),
            vec!["requests@^2.0", "rich"]
        );
    }

    #[test]
    fn test_add_rejects_empty_name() {
        let temp = setup(MANIFEST);
        let err = run_add(temp.path(), "@^1.0", false).unwrap_err();
        assert!(matches!(err, CliError::Core(_)));
    }

    #[test]
    fn test_add_rejects_non_array() {
        let temp = setup("dependencies = \"requests\"\n\n[project]\nname = \"demo\"\n");
        let err = run_add(temp.path(), "click", false).unwrap_err();
        assert!(err.to_string().contains("must be an array"));
    }

    #[test]
    fn test_add_without_manifest() {
        let temp = TempDir::new().unwrap();
        let err = run_add(temp.path(), "click", false).unwrap_err();
        assert!(matches!(err, CliError::User { .. }));
    }
}
