use std::path::{Path, PathBuf};

use super::ProjectRoots;
use crate::format::reference::{normalize_path, relative_to_root};

const ROOT_MARKERS: &[&str] = &[
    "Cargo.toml",
    "package.json",
    "pyproject.toml",
    "go.mod",
    "pom.xml",
    "build.gradle",
    "build.gradle.kts",
    "CMakeLists.txt",
    "Makefile",
];

/// The set of folders open in the host. A path belongs to the nearest one
/// that encloses it.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceRoots {
    roots: Vec<String>,
}

impl WorkspaceRoots {
    #[must_use]
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            roots: roots
                .into_iter()
                .map(|p| p.as_ref().to_string_lossy().into_owned())
                .collect(),
        }
    }

    /// Single root discovered by walking up from `start`; empty when nothing is found.
    #[must_use]
    pub fn discover(start: &Path) -> Self {
        Self::new(find_project_root(start))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

impl ProjectRoots for WorkspaceRoots {
    fn root_for(&self, path: &str) -> Option<String> {
        self.roots
            .iter()
            .filter(|root| relative_to_root(root, path).is_some())
            .max_by_key(|root| normalize_path(root).trim_end_matches('/').len())
            .cloned()
    }
}

fn find_git_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|candidate| candidate.join(".git").exists())
        .map(PathBuf::from)
}

/// Closest ancestor holding `.git`, else the closest holding a build manifest.
#[must_use]
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    if let Some(root) = find_git_root(start) {
        return Some(root);
    }

    start
        .ancestors()
        .find(|candidate| {
            ROOT_MARKERS
                .iter()
                .any(|marker| candidate.join(marker).exists())
        })
        .map(PathBuf::from)
}
