use std::path::{Path, PathBuf};

/// Discover the project root directory from an invocation directory.
///
/// Heuristics (first match wins, walking upward from `start`):
/// - `.reconcile/` (project config location)
/// - `.git/` or `.git` file (git repo root / worktree)
///
/// Falls back to `start` when no markers are found.
pub fn discover_project_root(start: &Path) -> PathBuf {
    for dir in start.ancestors() {
        if dir.join(".reconcile").is_dir() {
            return dir.to_path_buf();
        }
        if dir.join(".git").exists() {
            return dir.to_path_buf();
        }
    }
    start.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn discover_project_root_prefers_nearest_reconcile_dir() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join(".git")).unwrap();
        std::fs::create_dir_all(root.join("sub/.reconcile")).unwrap();

        let start = root.join("sub/schemas");
        std::fs::create_dir_all(&start).unwrap();

        assert_eq!(discover_project_root(&start), root.join("sub"));
    }

    #[test]
    fn discover_project_root_falls_back_to_git() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join(".git")).unwrap();
        std::fs::create_dir_all(root.join("sub/schemas")).unwrap();

        let start = root.join("sub/schemas");
        assert_eq!(discover_project_root(&start), root.to_path_buf());
    }

    #[test]
    fn discover_project_root_defaults_to_start() {
        let dir = tempdir().unwrap();
        let start = dir.path().join("plain");
        std::fs::create_dir_all(&start).unwrap();

        // tempdirs never sit inside a marked directory
        assert_eq!(discover_project_root(&start), start);
    }
}
