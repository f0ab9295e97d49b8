//! Candidate list construction and the fuzzy selector protocol.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::{SelectorOptions, SessionizerConfig};
use crate::error::SelectionError;
use crate::paths;
use crate::process::{shell_quote, CommandRunner, Invocation, ProcessOutput};
use crate::walker::ProjectDirectory;

/// Exit code of an interactive selector when the user aborts
pub const CANCELLED_EXIT_CODE: i32 = 130;

/// Exit code of fzf when nothing matched the query
pub const NO_MATCH_EXIT_CODE: i32 = 1;

/// Deduplicated, sorted candidates expressed relative to a parent directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateList {
    parent: PathBuf,
    entries: Vec<String>,
}

impl CandidateList {
    /// Build from discovered directories; entries outside `parent` are dropped
    pub fn build(candidates: &[ProjectDirectory], parent: &Path) -> Self {
        let parent = paths::normalize(parent);
        let entries: BTreeSet<String> = candidates
            .iter()
            .filter_map(|candidate| {
                let absolute = paths::normalize(&candidate.path);
                match absolute.strip_prefix(&parent) {
                    Ok(rel) if rel.as_os_str().is_empty() => Some(".".to_string()),
                    Ok(rel) => Some(rel.to_string_lossy().into_owned()),
                    Err(_) => {
                        debug!(path = %absolute.display(), "candidate outside parent, dropped");
                        None
                    }
                }
            })
            .collect();

        Self {
            parent,
            entries: entries.into_iter().collect(),
        }
    }

    pub fn parent(&self) -> &Path {
        &self.parent
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Newline separated form fed to the selector's stdin
    pub fn to_input(&self) -> String {
        self.entries.join("\n")
    }
}

/// Delegates the interactive choice to an external fuzzy selector
pub struct CandidateSelector<'a> {
    options: &'a SelectorOptions,
    runner: &'a dyn CommandRunner,
}

impl<'a> CandidateSelector<'a> {
    pub fn new(config: &'a SessionizerConfig, runner: &'a dyn CommandRunner) -> Self {
        Self {
            options: &config.selector,
            runner,
        }
    }

    /// Build the selector invocation for picking a directory below `parent`
    pub fn invocation(&self, parent: &Path) -> Invocation {
        let mut invocation = Invocation::new(&self.options.command).args(&self.options.options);
        if let Some(preview) = self.options.preview.as_deref().filter(|p| !p.is_empty()) {
            let parent = parent.to_string_lossy();
            invocation = invocation
                .arg("--preview")
                .arg(format!("{} {}/{{}}", preview, shell_quote(&parent)));
        }
        invocation
    }

    /// Let the user pick one of `candidates`.
    ///
    /// Returns the canonical chosen directory, or `None` when the user cancelled.
    pub fn select(
        &self,
        candidates: &[ProjectDirectory],
        parent: &Path,
    ) -> Result<Option<PathBuf>, SelectionError> {
        let list = CandidateList::build(candidates, parent);
        let invocation = self.invocation(list.parent());
        debug!(count = list.entries().len(), "offering candidates");

        let output = self.run(&invocation, &list.to_input())?;
        match output.code {
            Some(0) => {
                let choice = output.stdout.trim();
                let selected = paths::canonicalize(&list.parent().join(choice));
                if !selected.is_dir() {
                    return Err(SelectionError::InvalidSelection { path: selected });
                }
                Ok(Some(selected))
            }
            Some(CANCELLED_EXIT_CODE) => {
                info!("selection cancelled");
                Ok(None)
            }
            code => Err(SelectionError::UnexpectedExit {
                code,
                stdout: output.stdout,
                stderr: output.stderr,
            }),
        }
    }

    /// Let the user pick one of the active session names.
    ///
    /// A single name is chosen without prompting. Cancel and "no match" yield `None`.
    pub fn select_session(&self, names: &[String]) -> Result<Option<String>, SelectionError> {
        if names.is_empty() {
            info!("no active sessions");
            return Ok(None);
        }

        let invocation = Invocation::new(&self.options.command).args(["--cycle", "--select-1"]);
        let output = self.run(&invocation, &names.join("\n"))?;
        match output.code {
            Some(0) => Ok(Some(output.stdout.trim().to_string())),
            Some(CANCELLED_EXIT_CODE) | Some(NO_MATCH_EXIT_CODE) => {
                info!("session selection cancelled");
                Ok(None)
            }
            code => Err(SelectionError::UnexpectedExit {
                code,
                stdout: output.stdout,
                stderr: output.stderr,
            }),
        }
    }

    fn run(&self, invocation: &Invocation, input: &str) -> Result<ProcessOutput, SelectionError> {
        self.runner
            .output(invocation, Some(input))
            .map_err(|source| SelectionError::Spawn {
                command: invocation.program.clone(),
                source,
            })
    }
}
