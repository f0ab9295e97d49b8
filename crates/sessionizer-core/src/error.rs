//! Error taxonomy for discovery, selection, launch and attach.
//!
//! A cancelled selection is not an error: selectors return `Ok(None)` for it.

use std::path::PathBuf;
use thiserror::Error;

/// Render an exit code, `None` meaning the process was killed by a signal
pub(crate) fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "a signal".to_string(),
    }
}

/// A supplied directory is unusable
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The path does not exist or is not a directory
    #[error("{} is not a valid directory", .path.display())]
    InvalidDirectory { path: PathBuf },

    /// Discovery found nothing below the parent directory
    #[error("no subdirectories found in {}", .path.display())]
    NoSubdirectories { path: PathBuf },
}

/// The fuzzy selector misbehaved
#[derive(Debug, Error)]
pub enum SelectionError {
    /// The selector process could not be started
    #[error("failed to run `{command}` (is it installed and in your PATH?): {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The selector terminated with something other than success or cancel
    #[error(
        "selector terminated with {}\n=== stdout ===\n{stdout}\n=== stderr ===\n{stderr}",
        describe_code(.code)
    )]
    UnexpectedExit {
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    /// The selector returned something that is not an existing directory
    #[error("no valid directory selected: {}", .path.display())]
    InvalidSelection { path: PathBuf },
}

/// A step of session creation failed; earlier steps are not rolled back.
///
/// Step 0 is the session creation itself, layout plan steps count from 1.
#[derive(Debug, Error)]
#[error("launch step {step} failed (`{command}`): {reason}")]
pub struct LaunchError {
    pub step: usize,
    pub command: String,
    pub reason: String,
}

/// Switching or attaching the terminal to a session failed
#[derive(Debug, Error)]
pub enum AttachError {
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` terminated with {}", describe_code(.code))]
    Failed { command: String, code: Option<i32> },
}

/// The session list query failed for a reason other than "no server".
///
/// Never fatal: it is logged and the registry is treated as empty.
#[derive(Debug, Error)]
pub enum RegistryQueryWarning {
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` terminated with {}: {stderr}", describe_code(.code))]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

/// Any fatal failure of a sessionizer run
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Launch(#[from] LaunchError),

    #[error(transparent)]
    Attach(#[from] AttachError),
}

/// Result alias for sessionizer operations
pub type Result<T> = std::result::Result<T, Error>;
