//! Multiplexer command model, session registry and attach.

mod attach;
mod command;
mod registry;

pub use attach::{Attacher, INSIDE_TMUX_ENV};
pub use command::{pane_target, window_target, TmuxCommand};
pub use registry::{match_session, Session, SessionRegistry, NO_SERVER_MARKERS};

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// Characters tmux rewrites or rejects in session names
static SESSION_NAME_FORBIDDEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.:]").expect("Invalid SESSION_NAME_FORBIDDEN regex"));

/// Session name used for a new session rooted at `path`: its base name, tmux-safe
pub fn session_name_for(path: &Path) -> String {
    let base = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if base.is_empty() {
        return "root".to_string();
    }
    SESSION_NAME_FORBIDDEN.replace_all(&base, "_").into_owned()
}
