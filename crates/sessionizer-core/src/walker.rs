//! Bounded depth-first discovery of project directories.
//!
//! Rules, applied to every visited path in order:
//! 1. beyond the depth budget: skip
//! 2. symlink: record, never follow
//! 3. dot-named directory: record, never descend
//! 4. directory containing `.git`: record, never descend
//! 5. other directory: record and descend one level
//!
//! Anything else (plain files, sockets, ...) is ignored.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::paths;

/// A directory discovered by [`walk`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectDirectory {
    /// Path as reached from the walk root (symlinks left unresolved)
    pub path: PathBuf,
    /// Levels below the walk root, the root itself being 0
    pub depth: usize,
    pub is_symlink: bool,
    pub is_dotfile: bool,
    pub is_git_root: bool,
}

/// Check whether a directory is the root of a git repository
pub fn is_git_root(path: &Path) -> bool {
    path.join(".git").is_dir()
}

fn is_dot_named(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.as_encoded_bytes().starts_with(b"."))
}

/// Collect project directories under `root`, at most `max_depth` levels deep.
///
/// Each returned path is unique. No ordering is guaranteed.
pub fn walk(root: &Path, max_depth: usize) -> Vec<ProjectDirectory> {
    let mut found = Vec::new();
    let mut recorded: HashSet<PathBuf> = HashSet::new();
    // Canonical paths already descended into; guards bind-mount and hard-link loops
    let mut expanded: HashSet<PathBuf> = HashSet::new();
    let mut stack = vec![(root.to_path_buf(), 0usize)];

    while let Some((path, depth)) = stack.pop() {
        if depth > max_depth {
            continue;
        }

        let metadata = match fs::symlink_metadata(&path) {
            Ok(m) => m,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };

        let mut entry = ProjectDirectory {
            path: path.clone(),
            depth,
            is_symlink: false,
            is_dotfile: is_dot_named(&path),
            is_git_root: false,
        };

        if metadata.file_type().is_symlink() {
            entry.is_symlink = true;
            if recorded.insert(path) {
                found.push(entry);
            }
            continue;
        }

        if !metadata.is_dir() {
            continue;
        }

        if entry.is_dotfile {
            if recorded.insert(path) {
                found.push(entry);
            }
            continue;
        }

        entry.is_git_root = is_git_root(&path);
        let descend = !entry.is_git_root;
        if recorded.insert(path.clone()) {
            found.push(entry);
        }
        if !descend {
            continue;
        }

        if !expanded.insert(paths::canonicalize(&path)) {
            warn!(path = %path.display(), "directory already visited, not descending again");
            continue;
        }

        match fs::read_dir(&path) {
            Ok(entries) => {
                let mut children: Vec<PathBuf> =
                    entries.filter_map(|e| e.ok().map(|e| e.path())).collect();
                // Reverse order so the stack pops children alphabetically
                children.sort_unstable_by(|a, b| b.cmp(a));
                stack.extend(children.into_iter().map(|child| (child, depth + 1)));
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot list directory");
            }
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn relative_paths(root: &Path, found: &[ProjectDirectory]) -> Vec<String> {
        let mut rel: Vec<String> = found
            .iter()
            .map(|d| {
                d.path
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        rel.sort();
        rel
    }

    /// Walk roots must not be dot-named themselves, unlike `TempDir::new()`'s `.tmpXXXX`
    fn project_root() -> TempDir {
        tempfile::Builder::new()
            .prefix("sessionizer")
            .tempdir()
            .unwrap()
    }

    fn mkdirs(root: &Path, dirs: &[&str]) {
        for dir in dirs {
            fs::create_dir_all(root.join(dir)).unwrap();
        }
    }

    #[test]
    fn test_walk_respects_depth() {
        let tmp = project_root();
        mkdirs(tmp.path(), &["a/b/c/d", "e"]);

        let found = walk(tmp.path(), 2);
        assert_eq!(
            relative_paths(tmp.path(), &found),
            vec!["", "a", "a/b", "e"]
        );
        assert!(found.iter().all(|d| d.depth <= 2));
    }

    #[test]
    fn test_walk_depth_zero_records_only_root() {
        let tmp = project_root();
        mkdirs(tmp.path(), &["a"]);

        let found = walk(tmp.path(), 0);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].path, tmp.path());
        assert_eq!(found[0].depth, 0);
    }

    #[test]
    fn test_walk_stops_at_git_root() {
        let tmp = project_root();
        mkdirs(tmp.path(), &["repo/.git/objects", "repo/src", "plain/inner"]);

        let found = walk(tmp.path(), 3);
        assert_eq!(
            relative_paths(tmp.path(), &found),
            vec!["", "plain", "plain/inner", "repo"]
        );
        let repo = found.iter().find(|d| d.path.ends_with("repo")).unwrap();
        assert!(repo.is_git_root);
    }

    #[test]
    fn test_walk_dot_directories_are_leaves() {
        let tmp = project_root();
        mkdirs(tmp.path(), &[".config/nvim", ".dotfiles/zsh", "work"]);
        fs::write(tmp.path().join(".bashrc"), "").unwrap();

        let found = walk(tmp.path(), 3);
        assert_eq!(
            relative_paths(tmp.path(), &found),
            vec!["", ".config", ".dotfiles", "work"]
        );
        assert!(found
            .iter()
            .filter(|d| d.path.ends_with(".config"))
            .all(|d| d.is_dotfile));
    }

    #[test]
    fn test_walk_ignores_plain_files() {
        let tmp = project_root();
        mkdirs(tmp.path(), &["a"]);
        fs::write(tmp.path().join("a/notes.txt"), "hello").unwrap();

        let found = walk(tmp.path(), 2);
        assert_eq!(relative_paths(tmp.path(), &found), vec!["", "a"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_records_symlinks_without_following() {
        let tmp = project_root();
        mkdirs(tmp.path(), &["real/inner"]);
        std::os::unix::fs::symlink(tmp.path().join("real"), tmp.path().join("link")).unwrap();
        // A loop back to the root must not cause infinite recursion
        std::os::unix::fs::symlink(tmp.path(), tmp.path().join("real/loop")).unwrap();

        let found = walk(tmp.path(), 5);
        assert_eq!(
            relative_paths(tmp.path(), &found),
            vec!["", "link", "real", "real/inner", "real/loop"]
        );
        let link = found.iter().find(|d| d.path.ends_with("link")).unwrap();
        assert!(link.is_symlink);
        assert!(!link.is_git_root);
    }

    #[test]
    fn test_walk_dot_named_root_is_a_leaf() {
        let tmp = project_root();
        mkdirs(tmp.path(), &[".dotfiles/nvim/lua"]);
        let root = tmp.path().join(".dotfiles");

        let found = walk(&root, 3);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].path, root);
        assert!(found[0].is_dotfile);
    }

    #[test]
    fn test_walk_missing_root_is_empty() {
        assert!(walk(Path::new("/nonexistent-sessionizer-root"), 2).is_empty());
    }
}
