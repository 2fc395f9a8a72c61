//! Dependency registry shared by every component of a project
//!
//! Dependencies are declared with a `"<name>@<constraint>"` spec and tagged
//! with a [`DependencyKind`]. Components read the registry at synthesis time
//! and translate it into whatever their tool expects.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Role a dependency plays in the project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyKind {
    /// Required at runtime by consumers of the package
    Runtime,
    /// Expected to be provided by the consumer
    Peer,
    /// Shipped inside the package
    Bundled,
    /// Needed to build the package
    Build,
    /// Needed to run tests
    Test,
    /// Needed in the development environment only
    DevEnv,
    /// Forces a transitive version
    Override,
    /// Installed only on request
    Optional,
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Runtime => write!(f, "runtime"),
            Self::Peer => write!(f, "peer"),
            Self::Bundled => write!(f, "bundled"),
            Self::Build => write!(f, "build"),
            Self::Test => write!(f, "test"),
            Self::DevEnv => write!(f, "dev-env"),
            Self::Override => write!(f, "override"),
            Self::Optional => write!(f, "optional"),
        }
    }
}

/// Parsed `"<name>@<constraint>"` string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencySpec {
    pub name: String,
    pub version: Option<String>,
}

impl FromStr for DependencySpec {
    type Err = Error;

    /// Everything after the first `@` is the version constraint; a spec
    /// without `@` (or with nothing after it) has no constraint.
    fn from_str(spec: &str) -> Result<Self> {
        let trimmed = spec.trim();
        let (name, version) = match trimmed.split_once('@') {
            Some((name, version)) => (name.trim(), Some(version.trim())),
            None => (trimmed, None),
        };

        if name.is_empty() {
            return Err(Error::InvalidDependencySpec {
                spec: spec.to_string(),
                reason: "missing package name".to_string(),
            });
        }

        Ok(Self {
            name: name.to_string(),
            version: version.filter(|v| !v.is_empty()).map(String::from),
        })
    }
}

/// A single declared dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub kind: DependencyKind,
}

/// Ordered registry of dependency declarations.
///
/// Entries are keyed by `(name, kind)`. Declaring the same pair again
/// replaces the constraint but keeps the original position, so iteration
/// order stays stable across re-declarations.
#[derive(Debug, Clone, Default)]
pub struct Dependencies {
    entries: Vec<Dependency>,
}

impl Dependencies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `spec` and declare it with the given kind.
    pub fn add(&mut self, spec: &str, kind: DependencyKind) -> Result<&Dependency> {
        let DependencySpec { name, version } = spec.parse()?;
        Ok(self.add_dependency(Dependency {
            name,
            version,
            kind,
        }))
    }

    /// Declare an already-built dependency.
    pub fn add_dependency(&mut self, dependency: Dependency) -> &Dependency {
        let idx = match self
            .entries
            .iter()
            .position(|d| d.name == dependency.name && d.kind == dependency.kind)
        {
            Some(idx) => {
                tracing::debug!(
                    name = %dependency.name,
                    kind = %dependency.kind,
                    "Replacing dependency constraint"
                );
                self.entries[idx] = dependency;
                idx
            }
            None => {
                self.entries.push(dependency);
                self.entries.len() - 1
            }
        };
        &self.entries[idx]
    }

    pub fn get(&self, name: &str, kind: DependencyKind) -> Option<&Dependency> {
        self.entries
            .iter()
            .find(|d| d.name == name && d.kind == kind)
    }

    /// Remove a declaration. Returns whether anything was removed.
    pub fn remove(&mut self, name: &str, kind: DependencyKind) -> bool {
        let before = self.entries.len();
        self.entries.retain(|d| !(d.name == name && d.kind == kind));
        self.entries.len() != before
    }

    /// All declarations in declaration order.
    pub fn all(&self) -> &[Dependency] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
