//! `pyproject.toml` descriptor for Poetry
//!
//! The descriptor has a fixed shape:
//!
//! ```toml
//! [build-system]
//! requires = ["poetry-core>=1.0.0"]
//! build-backend = "poetry.core.masonry.api"
//!
//! [tool.poetry]
//! # fixed metadata, then pass-through options, then the two dependency maps
//! ```

use std::fmt;

use projgen_core::decamelize_table;
use serde::{Deserialize, Serialize};
use toml::{Table, Value};

use crate::synth::DependencyMap;

/// Minimum build backend written to `[build-system] requires`.
pub const BUILD_REQUIRES: &str = "poetry-core>=1.0.0";

/// Build backend entry point.
pub const BUILD_BACKEND: &str = "poetry.core.masonry.api";

/// Tool table name under `[tool]`.
pub const TOOL_NAME: &str = "poetry";

/// Descriptor file name.
pub const PYPROJECT_FILE: &str = "pyproject.toml";

/// Package author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Author {
    pub fn new(name: impl Into<String>, email: Option<&str>) -> Self {
        Self {
            name: name.into(),
            email: email.map(String::from),
        }
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.email {
            Some(email) => write!(f, "{} <{}>", self.name, email),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Packaging metadata supplied by the user.
///
/// The named fields are the fixed part of `[tool.poetry]`. `options` is the
/// pass-through overlay: it may hold any Poetry setting (`readme`,
/// `packages`, `scripts`, ...) and overrides a fixed field of the same key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackagingMetadata {
    pub name: String,
    pub version: String,
    pub description: Option<String>,
    pub license: Option<String>,
    pub authors: Vec<Author>,
    pub homepage: Option<String>,
    pub classifiers: Option<Vec<String>>,
    pub options: Table,
}

impl PackagingMetadata {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            ..Default::default()
        }
    }

    /// The fixed fields as a table, in descriptor order.
    fn fixed_fields(&self) -> Table {
        let mut table = Table::new();
        table.insert("name".into(), Value::String(self.name.clone()));
        table.insert("version".into(), Value::String(self.version.clone()));
        if let Some(description) = &self.description {
            table.insert("description".into(), Value::String(description.clone()));
        }
        if let Some(license) = &self.license {
            table.insert("license".into(), Value::String(license.clone()));
        }
        table.insert(
            "authors".into(),
            Value::Array(
                self.authors
                    .iter()
                    .map(|a| Value::String(a.to_string()))
                    .collect(),
            ),
        );
        if let Some(homepage) = &self.homepage {
            table.insert("homepage".into(), Value::String(homepage.clone()));
        }
        if let Some(classifiers) = &self.classifiers {
            table.insert(
                "classifiers".into(),
                Value::Array(classifiers.iter().cloned().map(Value::String).collect()),
            );
        }
        table
    }
}

/// Build the full descriptor tree.
///
/// Precedence inside `[tool.poetry]`: fixed fields, then the pass-through
/// overlay (wins over fixed fields), then `dependencies` and
/// `dev-dependencies` (always the synthesized maps). Metadata keys are
/// decamelized recursively; dependency names are written verbatim.
pub fn build_descriptor(
    metadata: &PackagingMetadata,
    dependencies: &DependencyMap,
    dev_dependencies: &DependencyMap,
) -> Table {
    let mut merged = metadata.fixed_fields();
    for (key, value) in &metadata.options {
        merged.insert(key.clone(), value.clone());
    }

    let mut poetry = decamelize_table(&merged, "-");
    for (key, deps) in [
        ("dependencies", dependencies),
        ("dev-dependencies", dev_dependencies),
    ] {
        if poetry.remove(key).is_some() {
            tracing::debug!(key, "Ignoring pass-through option shadowing synthesized dependencies");
        }
        poetry.insert(key.to_string(), Value::Table(dependency_table(deps)));
    }

    let mut build_system = Table::new();
    build_system.insert(
        "requires".into(),
        Value::Array(vec![Value::String(BUILD_REQUIRES.into())]),
    );
    build_system.insert("build-backend".into(), Value::String(BUILD_BACKEND.into()));

    let mut tool = Table::new();
    tool.insert(TOOL_NAME.into(), Value::Table(poetry));

    let mut descriptor = Table::new();
    descriptor.insert("build-system".into(), Value::Table(build_system));
    descriptor.insert("tool".into(), Value::Table(tool));
    descriptor
}

fn dependency_table(deps: &DependencyMap) -> Table {
    deps.iter()
        .map(|(name, constraint)| (name.clone(), Value::String(constraint.clone())))
        .collect()
}
