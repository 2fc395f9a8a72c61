//! Well-known paths inside a projgen project.

/// Files projgen reads or owns at the project root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectPath {
    /// The `projgen.toml` project manifest (user-owned)
    Manifest,
    /// The `.projgen/tasks.json` task manifest
    TasksManifest,
    /// The generated `.gitignore`
    GitIgnore,
}

impl ProjectPath {
    /// Get the path relative to the project root.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manifest => "projgen.toml",
            Self::TasksManifest => ".projgen/tasks.json",
            Self::GitIgnore => ".gitignore",
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_root_relative() {
        for path in [
            ProjectPath::Manifest,
            ProjectPath::TasksManifest,
            ProjectPath::GitIgnore,
        ] {
            assert!(!path.as_str().starts_with('/'));
        }
        assert_eq!(ProjectPath::TasksManifest.as_str(), ".projgen/tasks.json");
    }
}
