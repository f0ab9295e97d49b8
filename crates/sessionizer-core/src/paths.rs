//! Path canonicalization used as the unit of equality.

use std::fs;
use std::path::{Component, Path, PathBuf};

/// Make a path absolute and remove `.` and `..` segments without touching the filesystem
pub fn normalize(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Resolve symlinks when the path exists, fall back to lexical normalization otherwise
pub fn canonicalize(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| normalize(path))
}
