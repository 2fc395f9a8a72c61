//! Dependency synthesis
//!
//! Partitions the project's dependency registry into the two sections of
//! the Poetry descriptor. Both functions scan the registry independently and
//! build a fresh map on every call, so the result always reflects the
//! registry at descriptor-generation time.

use indexmap::IndexMap;
use projgen_core::{Dependencies, DependencyKind};

/// Package name -> version constraint, in registry order
pub type DependencyMap = IndexMap<String, String>;

/// Interpreter entry Poetry requires in `[tool.poetry.dependencies]`.
pub const PYTHON: &str = "python";

/// Constraint used for the interpreter when none is declared.
pub const DEFAULT_PYTHON_CONSTRAINT: &str = "^3.6";

/// Constraint written for a dependency declared without one.
pub const ANY_VERSION: &str = "*";

/// Runtime section: every `Runtime` declaration, plus `python = "^3.6"`
/// when no declaration of any kind is named `python`.
pub fn synth_runtime_dependencies(deps: &Dependencies) -> DependencyMap {
    let mut map = DependencyMap::new();
    let mut python_declared = false;

    for dep in deps.all() {
        if dep.name == PYTHON {
            python_declared = true;
        }
        if dep.kind == DependencyKind::Runtime {
            map.insert(dep.name.clone(), constraint(dep.version.as_deref()));
        }
    }

    if !python_declared {
        map.insert(PYTHON.to_string(), DEFAULT_PYTHON_CONSTRAINT.to_string());
    }

    map
}

/// Development section: every `DevEnv` declaration. No interpreter entry.
pub fn synth_dev_dependencies(deps: &Dependencies) -> DependencyMap {
    deps.all()
        .iter()
        .filter(|dep| dep.kind == DependencyKind::DevEnv)
        .map(|dep| (dep.name.clone(), constraint(dep.version.as_deref())))
        .collect()
}

fn constraint(version: Option<&str>) -> String {
    version.unwrap_or(ANY_VERSION).to_string()
}
