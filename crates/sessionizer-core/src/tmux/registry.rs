//! Matching live tmux sessions to directories.
//!
//! The registry is never cached: every lookup re-queries `list-sessions`.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::SessionizerConfig;
use crate::error::RegistryQueryWarning;
use crate::paths;
use crate::process::{CommandRunner, Invocation};

/// stderr prefixes meaning "no tmux server", i.e. an empty registry
pub const NO_SERVER_MARKERS: [&str; 2] = ["no server running", "error connecting to"];

const SESSION_PATH_FORMAT: &str = "#{session_name}:#{session_path}";
const SESSION_NAME_FORMAT: &str = "#{session_name}";

/// A live session as reported by tmux
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub name: String,
    pub path: PathBuf,
}

impl Session {
    /// Parse a `name:path` line; the first `:` separates the two
    pub fn parse(line: &str) -> Option<Self> {
        let (name, path) = line.split_once(':')?;
        Some(Self {
            name: name.to_string(),
            path: PathBuf::from(path),
        })
    }
}

/// Name of the first session whose canonical path equals the canonical `target`.
///
/// When several sessions share a path, listing order decides: the first one wins.
pub fn match_session<'s>(sessions: &'s [Session], target: &Path) -> Option<&'s Session> {
    let target = paths::canonicalize(target);
    sessions
        .iter()
        .find(|session| paths::canonicalize(&session.path) == target)
}

/// Read-only view of the sessions a tmux server knows about
pub struct SessionRegistry<'a> {
    program: &'a str,
    runner: &'a dyn CommandRunner,
}

impl<'a> SessionRegistry<'a> {
    pub fn new(config: &'a SessionizerConfig, runner: &'a dyn CommandRunner) -> Self {
        Self {
            program: &config.tmux.command,
            runner,
        }
    }

    /// All sessions with their root paths
    pub fn sessions(&self) -> Result<Vec<Session>, RegistryQueryWarning> {
        Ok(self
            .list(SESSION_PATH_FORMAT)?
            .iter()
            .filter_map(|line| Session::parse(line))
            .collect())
    }

    /// All session names in listing order
    pub fn session_names(&self) -> Result<Vec<String>, RegistryQueryWarning> {
        self.list(SESSION_NAME_FORMAT)
    }

    /// Look up the session rooted at `target`, treating query failures as "none"
    pub fn find_session_for_path(&self, target: &Path) -> Option<String> {
        let sessions = match self.sessions() {
            Ok(sessions) => sessions,
            Err(warning) => {
                warn!(%warning, "could not query tmux sessions");
                return None;
            }
        };

        let found = match_session(&sessions, target).map(|s| s.name.clone());
        debug!(target = %target.display(), session = ?found, "session lookup");
        found
    }

    fn list(&self, format: &str) -> Result<Vec<String>, RegistryQueryWarning> {
        let invocation = Invocation::new(self.program).args(["list-sessions", "-F", format]);
        let output = self
            .runner
            .output(&invocation, None)
            .map_err(|source| RegistryQueryWarning::Spawn {
                command: invocation.to_string(),
                source,
            })?;

        if !output.is_success() {
            if NO_SERVER_MARKERS
                .iter()
                .any(|marker| output.stderr.starts_with(marker))
            {
                debug!("no tmux server running");
                return Ok(Vec::new());
            }
            return Err(RegistryQueryWarning::Failed {
                command: invocation.to_string(),
                code: output.code,
                stderr: output.stderr.trim().to_string(),
            });
        }

        Ok(output
            .stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect())
    }
}
