//! Generated files owned by the project
//!
//! Components declare files as structured content; rendering happens once,
//! at write time, so a component can keep replacing its file until synthesis
//! completes.

use indexmap::IndexMap;

use crate::error::{Error, Result};

/// Marker placed at the top of every generated file.
pub const GENERATED_MARKER: &str =
    "~~ Generated by projgen. To modify, edit projgen.toml and run \"projgen synth\".";

/// Structured content of a generated file
#[derive(Debug, Clone, PartialEq)]
pub enum FileContent {
    /// Rendered as TOML. Nothing is pruned: empty tables, arrays and strings
    /// are written as given.
    Toml(toml::Table),
    /// Rendered as pretty JSON with a `"//"` marker key first.
    Json(serde_json::Value),
    /// One entry per line, e.g. ignore patterns.
    Lines(Vec<String>),
}

/// A file the project writes on every synthesis
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFile {
    path: String,
    content: FileContent,
    committed: bool,
}

impl GeneratedFile {
    pub fn toml(path: impl Into<String>, table: toml::Table) -> Self {
        Self::new(path, FileContent::Toml(table))
    }

    pub fn json(path: impl Into<String>, value: serde_json::Value) -> Self {
        Self::new(path, FileContent::Json(value))
    }

    pub fn lines(path: impl Into<String>, lines: Vec<String>) -> Self {
        Self::new(path, FileContent::Lines(lines))
    }

    fn new(path: impl Into<String>, content: FileContent) -> Self {
        Self {
            path: path.into(),
            content,
            committed: true,
        }
    }

    /// Keep this file out of version control.
    pub fn uncommitted(mut self) -> Self {
        self.committed = false;
        self
    }

    /// Path relative to the project root, forward slashes.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn content(&self) -> &FileContent {
        &self.content
    }

    pub fn is_committed(&self) -> bool {
        self.committed
    }

    /// Render the file to text, marker included.
    pub fn render(&self) -> Result<String> {
        match &self.content {
            FileContent::Toml(table) => {
                let body = toml::to_string_pretty(table).map_err(|e| Error::Render {
                    path: self.path.clone(),
                    message: e.to_string(),
                })?;
                Ok(format!("# {GENERATED_MARKER}\n\n{body}"))
            }
            FileContent::Json(value) => {
                let marked = match value {
                    serde_json::Value::Object(map) => {
                        let mut with_marker = serde_json::Map::new();
                        with_marker.insert("//".to_string(), GENERATED_MARKER.into());
                        for (k, v) in map {
                            with_marker.insert(k.clone(), v.clone());
                        }
                        serde_json::Value::Object(with_marker)
                    }
                    other => other.clone(),
                };
                Ok(format!("{}\n", serde_json::to_string_pretty(&marked)?))
            }
            FileContent::Lines(lines) => {
                let mut out = format!("# {GENERATED_MARKER}\n");
                for line in lines {
                    out.push_str(line);
                    out.push('\n');
                }
                Ok(out)
            }
        }
    }
}

/// Generated files keyed by relative path, in declaration order
#[derive(Debug, Clone, Default)]
pub struct Files {
    files: IndexMap<String, GeneratedFile>,
}

impl Files {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a file, replacing any earlier declaration of the same path.
    pub fn add(&mut self, file: GeneratedFile) {
        self.files.insert(file.path.clone(), file);
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeneratedFile> {
        self.files.values()
    }

    /// Paths that must be listed in the ignore file.
    pub fn uncommitted_paths(&self) -> Vec<String> {
        self.files
            .values()
            .filter(|f| !f.committed)
            .map(|f| format!("/{}", f.path))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
