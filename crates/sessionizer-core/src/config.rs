//! Immutable configuration handed to every component.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default maximum walk depth below the parent directory
pub const DEFAULT_DEPTH: usize = 2;

/// Default fuzzy selector program
pub const DEFAULT_SELECTOR: &str = "fzf";

/// Default preview command, the selected directory is appended
pub const DEFAULT_PREVIEW: &str =
    "eza --color=always --icons --group-directories-first --git-ignore -T -L 2";

/// Default multiplexer program
pub const DEFAULT_TMUX: &str = "tmux";

/// Default command started in the editor window
pub const DEFAULT_EDITOR_COMMAND: &str = "nvim .";

/// Which layout a freshly created session receives
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    /// Editor window, two-pane dev window and a shell window
    #[default]
    Standard,
    /// Editor window only
    Single,
}

/// Fuzzy selector settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorOptions {
    pub command: String,
    pub options: Vec<String>,
    /// Preview command template; `None` disables the preview
    pub preview: Option<String>,
}

impl Default for SelectorOptions {
    fn default() -> Self {
        Self {
            command: DEFAULT_SELECTOR.to_string(),
            options: vec!["--cycle".to_string()],
            preview: Some(DEFAULT_PREVIEW.to_string()),
        }
    }
}

/// Multiplexer settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmuxOptions {
    pub command: String,
    /// Index of the first window of a session (tmux `base-index`)
    pub base_index: u32,
    /// Index of the first pane of a window (tmux `pane-base-index`)
    pub pane_base_index: u32,
    pub editor_command: String,
    pub layout: LayoutKind,
}

impl Default for TmuxOptions {
    fn default() -> Self {
        Self {
            command: DEFAULT_TMUX.to_string(),
            base_index: 1,
            pane_base_index: 1,
            editor_command: DEFAULT_EDITOR_COMMAND.to_string(),
            layout: LayoutKind::default(),
        }
    }
}

/// Configuration for one sessionizer run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionizerConfig {
    /// Canonical directory the walk starts from
    pub parent_dir: PathBuf,
    pub max_depth: usize,
    pub selector: SelectorOptions,
    /// Dot-directories that may one day be descended into. Currently unused:
    /// every dot-directory is a leaf.
    pub allowed_dotfiles: Vec<String>,
    pub tmux: TmuxOptions,
    /// Whether this process runs inside a tmux client
    pub inside_multiplexer: bool,
}

impl Default for SessionizerConfig {
    fn default() -> Self {
        Self {
            parent_dir: PathBuf::from("."),
            max_depth: DEFAULT_DEPTH,
            selector: SelectorOptions::default(),
            allowed_dotfiles: vec![".config".to_string(), ".dotfiles".to_string()],
            tmux: TmuxOptions::default(),
            inside_multiplexer: false,
        }
    }
}
