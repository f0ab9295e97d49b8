use std::path::Path;

use super::{chain_keys, LayoutFactory, LayoutPlan, EDITOR_WINDOW};
use crate::config::TmuxOptions;
use crate::probe::ActivationProbe;
use crate::tmux::{pane_target, window_target, TmuxCommand};

/// Just the editor window
pub struct SingleWindowLayout<'a> {
    options: &'a TmuxOptions,
    probe: &'a dyn ActivationProbe,
}

impl<'a> SingleWindowLayout<'a> {
    pub fn new(options: &'a TmuxOptions, probe: &'a dyn ActivationProbe) -> Self {
        Self { options, probe }
    }
}

impl LayoutFactory for SingleWindowLayout<'_> {
    fn produce_layout(&self, session_name: &str, path: &Path) -> LayoutPlan {
        let window = self.options.base_index;
        let activation = self.probe.activation(path).map(|words| words.join(" "));

        let mut plan = LayoutPlan::new();
        plan.push(TmuxCommand::rename_window(
            window_target(session_name, window),
            EDITOR_WINDOW,
        ));
        if let Some(keys) = chain_keys(
            activation.as_deref(),
            Some(self.options.editor_command.as_str()),
        ) {
            plan.push(TmuxCommand::send_keys(
                pane_target(session_name, window, self.options.pane_base_index),
                keys,
            ));
        }
        plan.push(TmuxCommand::select_window(window_target(session_name, window)));
        plan
    }
}
