use std::path::Path;

use crate::process::Invocation;

/// `session:window`
pub fn window_target(session: &str, window: u32) -> String {
    format!("{}:{}", session, window)
}

/// `session:window.pane`
pub fn pane_target(session: &str, window: u32, pane: u32) -> String {
    format!("{}:{}.{}", session, window, pane)
}

/// A tmux subcommand aimed at one target: `tmux <verb> -t <target> <args...>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmuxCommand {
    pub verb: &'static str,
    pub target: String,
    pub args: Vec<String>,
}

impl TmuxCommand {
    pub fn new(verb: &'static str, target: impl Into<String>) -> Self {
        Self {
            verb,
            target: target.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn rename_window(target: impl Into<String>, name: &str) -> Self {
        Self::new("rename-window", target).arg(name)
    }

    /// Append a named window to `session`, starting in `cwd`
    pub fn new_window(session: &str, name: &str, cwd: &Path) -> Self {
        Self::new("new-window", session)
            .arg("-n")
            .arg(name)
            .arg("-c")
            .arg(cwd.to_string_lossy())
    }

    /// Split `target` top/bottom, the new pane starting in `cwd`
    pub fn split_vertical(target: impl Into<String>, cwd: &Path) -> Self {
        Self::new("split-window", target)
            .arg("-v")
            .arg("-c")
            .arg(cwd.to_string_lossy())
    }

    pub fn select_window(target: impl Into<String>) -> Self {
        Self::new("select-window", target)
    }

    pub fn select_pane(target: impl Into<String>) -> Self {
        Self::new("select-pane", target)
    }

    /// Type `keys` into a pane and press Enter
    pub fn send_keys(target: impl Into<String>, keys: impl Into<String>) -> Self {
        Self::new("send-keys", target).arg(keys).arg("C-m")
    }

    pub fn switch_client(session: &str) -> Self {
        Self::new("switch-client", session)
    }

    pub fn attach_session(session: &str) -> Self {
        Self::new("attach-session", session)
    }

    /// Full invocation through the given tmux binary
    pub fn invocation(&self, program: &str) -> Invocation {
        Invocation::new(program)
            .arg(self.verb)
            .arg("-t")
            .arg(&self.target)
            .args(&self.args)
    }
}
