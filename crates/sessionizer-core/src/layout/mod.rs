//! Window and pane layouts applied to freshly created sessions.

mod single;
mod standard;

pub use single::SingleWindowLayout;
pub use standard::StandardLayout;

use std::path::Path;

use crate::config::{LayoutKind, TmuxOptions};
use crate::probe::ActivationProbe;
use crate::tmux::TmuxCommand;

/// Name of the window running the editor
pub const EDITOR_WINDOW: &str = "neovim";
/// Name of the two-pane development window
pub const DEV_WINDOW: &str = "dev";
/// Name of the plain shell window
pub const SHELL_WINDOW: &str = "shell";

/// Ordered commands configuring a new session; built per launch, never reused
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutPlan {
    steps: Vec<TmuxCommand>,
}

impl LayoutPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: TmuxCommand) {
        self.steps.push(step);
    }

    pub fn steps(&self) -> &[TmuxCommand] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl IntoIterator for LayoutPlan {
    type Item = TmuxCommand;
    type IntoIter = std::vec::IntoIter<TmuxCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

/// Produces the layout plan for a session created at a path
pub trait LayoutFactory {
    fn produce_layout(&self, session_name: &str, path: &Path) -> LayoutPlan;
}

/// Layout factory selected by configuration
pub fn factory_for<'a>(
    options: &'a TmuxOptions,
    probe: &'a dyn ActivationProbe,
) -> Box<dyn LayoutFactory + 'a> {
    match options.layout {
        LayoutKind::Standard => Box::new(StandardLayout::new(options, probe)),
        LayoutKind::Single => Box::new(SingleWindowLayout::new(options, probe)),
    }
}

/// Keystrokes for a pane: optional activation chained before the pane's own command
fn chain_keys(activation: Option<&str>, command: Option<&str>) -> Option<String> {
    let parts: Vec<&str> = activation.into_iter().chain(command).collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" && "))
    }
}
