//! `projgen.toml` project manifest
//!
//! ```toml
//! dependencies = ["requests@^2.31"]
//! dev-dependencies = ["pytest@^7.0"]
//!
//! [project]
//! name = "demo"
//! version = "0.1.0"
//! authors = [{ name = "Jane Doe", email = "jane@example.com" }]
//!
//! [settings]
//! post-synth = true
//!
//! [poetry]
//! readme = "README.md"
//! ```

use std::path::{Path, PathBuf};

use projgen_fs::{NormalizedPath, ProjectPath, io};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::project::PythonProjectOptions;
use crate::pyproject::{Author, PackagingMetadata};

fn default_version() -> String {
    "0.1.0".to_string()
}

fn default_true() -> bool {
    true
}

/// `[project]` section: the fixed packaging metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSection {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    pub description: Option<String>,
    pub license: Option<String>,
    pub homepage: Option<String>,
    pub classifiers: Option<Vec<String>>,
    #[serde(default)]
    pub authors: Vec<Author>,
}

/// `[settings]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    /// Provision the environment and install after synthesis
    #[serde(default = "default_true")]
    pub post_synth: bool,
    /// Extra ignore patterns
    #[serde(default)]
    pub gitignore: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            post_synth: true,
            gitignore: Vec::new(),
        }
    }
}

/// Parsed `projgen.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PythonManifest {
    pub project: ProjectSection,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub dev_dependencies: Vec<String>,
    #[serde(default)]
    pub settings: Settings,
    /// Pass-through Poetry options, any shape
    #[serde(default)]
    pub poetry: toml::Table,
}

impl PythonManifest {
    /// Parse manifest content.
    ///
    /// # Example
    ///
    /// ```
    /// use projgen_python::PythonManifest;
    ///
    /// let manifest = PythonManifest::parse(r#"
    /// dependencies = ["requests@^2.0"]
    ///
    /// [project]
    /// name = "demo"
    /// "#).unwrap();
    ///
    /// assert_eq!(manifest.project.version, "0.1.0");
    /// assert_eq!(manifest.dependencies, vec!["requests@^2.0"]);
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ManifestParse {
            path: PathBuf::from(ProjectPath::Manifest.as_str()),
            message: e.to_string(),
        })
    }

    /// Load `projgen.toml` from a project root.
    pub fn load(root: &Path) -> Result<Self> {
        let path = NormalizedPath::new(root).join(ProjectPath::Manifest.as_str());
        if !path.is_file() {
            return Err(Error::ManifestNotFound {
                path: path.to_native(),
            });
        }
        let content = io::read_text(&path)?;
        toml::from_str(&content).map_err(|e| Error::ManifestParse {
            path: path.to_native(),
            message: e.to_string(),
        })
    }

    /// Packaging metadata with the `[poetry]` table as the overlay.
    pub fn metadata(&self) -> PackagingMetadata {
        let project = &self.project;
        PackagingMetadata {
            name: project.name.clone(),
            version: project.version.clone(),
            description: project.description.clone(),
            license: project.license.clone(),
            authors: project.authors.clone(),
            homepage: project.homepage.clone(),
            classifiers: project.classifiers.clone(),
            options: self.poetry.clone(),
        }
    }

    pub fn into_options(self, root: impl Into<PathBuf>) -> PythonProjectOptions {
        let mut options = PythonProjectOptions::new(root, self.metadata());
        options.dependencies = self.dependencies;
        options.dev_dependencies = self.dev_dependencies;
        options.post_synth = self.settings.post_synth;
        options.gitignore = self.settings.gitignore;
        options
    }
}
