use std::path::Path;

use super::{chain_keys, LayoutFactory, LayoutPlan, DEV_WINDOW, EDITOR_WINDOW, SHELL_WINDOW};
use crate::config::TmuxOptions;
use crate::paths;
use crate::probe::ActivationProbe;
use crate::tmux::{pane_target, window_target, TmuxCommand};

/// Three windows: the editor, a vertically split dev window and a shell.
///
/// Every pane gets the directory's activation command first, when there is one.
pub struct StandardLayout<'a> {
    options: &'a TmuxOptions,
    probe: &'a dyn ActivationProbe,
}

impl<'a> StandardLayout<'a> {
    pub fn new(options: &'a TmuxOptions, probe: &'a dyn ActivationProbe) -> Self {
        Self { options, probe }
    }
}

impl LayoutFactory for StandardLayout<'_> {
    fn produce_layout(&self, session_name: &str, path: &Path) -> LayoutPlan {
        let cwd = paths::canonicalize(path);
        let editor = self.options.base_index;
        let dev = editor + 1;
        let shell = editor + 2;
        let first_pane = self.options.pane_base_index;

        let mut plan = LayoutPlan::new();
        plan.push(TmuxCommand::rename_window(
            window_target(session_name, editor),
            EDITOR_WINDOW,
        ));

        plan.push(TmuxCommand::new_window(session_name, DEV_WINDOW, &cwd));
        plan.push(TmuxCommand::split_vertical(window_target(session_name, dev), &cwd));
        plan.push(TmuxCommand::select_pane(pane_target(session_name, dev, first_pane)));

        plan.push(TmuxCommand::new_window(session_name, SHELL_WINDOW, &cwd));

        let activation = self.probe.activation(path).map(|words| words.join(" "));
        let panes = [
            (editor, first_pane, Some(self.options.editor_command.as_str())),
            (dev, first_pane, None),
            (dev, first_pane + 1, None),
            (shell, first_pane, None),
        ];
        for (window, pane, command) in panes {
            if let Some(keys) = chain_keys(activation.as_deref(), command) {
                plan.push(TmuxCommand::send_keys(
                    pane_target(session_name, window, pane),
                    keys,
                ));
            }
        }

        plan.push(TmuxCommand::select_window(window_target(session_name, editor)));
        plan
    }
}
