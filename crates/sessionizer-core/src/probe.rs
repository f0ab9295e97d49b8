//! Environment activation detection from marker files.

use std::path::Path;

/// Produces the shell command that activates a directory's project environment
pub trait ActivationProbe {
    /// Command words to activate the environment of `dir`, if any
    fn activation(&self, dir: &Path) -> Option<Vec<String>>;
}

/// Recognizes `shell.nix`, `pyproject.toml` and `.venv`, in that order of precedence
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkerProbe;

impl ActivationProbe for MarkerProbe {
    fn activation(&self, dir: &Path) -> Option<Vec<String>> {
        if !dir.is_dir() {
            return None;
        }

        let words: &[&str] = if dir.join("shell.nix").is_file() {
            &["nix-shell", "--run", "$SHELL"]
        } else if dir.join("pyproject.toml").is_file() {
            &["poetry", "shell"]
        } else if dir.join(".venv").is_dir() {
            let activate = dir.join(".venv").join("bin").join("activate");
            return Some(vec![
                "/usr/bin/env".to_string(),
                "bash".to_string(),
                "-c".to_string(),
                format!("source {}", activate.display()),
            ]);
        } else {
            return None;
        };

        Some(words.iter().map(|w| w.to_string()).collect())
    }
}
