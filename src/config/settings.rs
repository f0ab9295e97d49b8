use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use sessionizer_core::config::{
    LayoutKind, SelectorOptions, SessionizerConfig, TmuxOptions, DEFAULT_DEPTH,
    DEFAULT_EDITOR_COMMAND, DEFAULT_PREVIEW, DEFAULT_SELECTOR, DEFAULT_TMUX,
};
use sessionizer_core::paths;
use sessionizer_core::tmux::INSIDE_TMUX_ENV;

use crate::app::Mode;

/// Environment variable overriding the default parent directory
pub const PARENT_DIR_ENV: &str = "TMUX_SESSIONIZER_PARENT_DIR";

/// Fallback parent directory when nothing else is configured
pub const HOME_ENV: &str = "HOME";

/// Upper bound for the walk depth
const MAX_DEPTH: usize = 32;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Fuzzy find a directory and start or attach a tmux session in it"
)]
pub struct Config {
    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Parent directory to search for subdirectories
    #[arg(short, long)]
    pub parent_dir: Option<PathBuf>,

    /// Depth of the subdirectories to search
    #[arg(short, long)]
    pub depth: Option<usize>,

    /// List and switch to active tmux sessions
    #[arg(long, conflicts_with = "directory")]
    pub sessions: bool,

    /// Directory to start the session in, skipping the selection
    pub directory: Option<PathBuf>,
}

impl Config {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// What this invocation should do
    pub fn mode(&self) -> Mode {
        if self.sessions {
            Mode::Sessions
        } else if let Some(dir) = &self.directory {
            Mode::Directory(dir.clone())
        } else {
            Mode::Discover
        }
    }
}

/// Application settings (from config file)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Parent directory to search (`~` allowed)
    #[serde(default)]
    pub parent_dir: Option<PathBuf>,

    /// Maximum walk depth
    #[serde(default = "default_depth")]
    pub depth: usize,

    /// Fuzzy selector settings
    #[serde(default)]
    pub selector: SelectorSettings,

    /// Dot-directories reserved for deeper scanning (not used yet)
    #[serde(default = "default_allowed_dotfiles")]
    pub allowed_dotfiles: Vec<String>,

    /// tmux settings
    #[serde(default)]
    pub tmux: TmuxSettings,
}

fn default_depth() -> usize {
    DEFAULT_DEPTH
}

fn default_allowed_dotfiles() -> Vec<String> {
    vec![".config".to_string(), ".dotfiles".to_string()]
}

/// Fuzzy selector settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorSettings {
    /// Selector program
    #[serde(default = "default_selector_command")]
    pub command: String,

    /// Extra selector options
    #[serde(default = "default_selector_options")]
    pub options: Vec<String>,

    /// Preview command, empty disables the preview
    #[serde(default = "default_preview")]
    pub preview: String,
}

fn default_selector_command() -> String {
    DEFAULT_SELECTOR.to_string()
}

fn default_selector_options() -> Vec<String> {
    vec!["--cycle".to_string()]
}

fn default_preview() -> String {
    DEFAULT_PREVIEW.to_string()
}

impl Default for SelectorSettings {
    fn default() -> Self {
        Self {
            command: default_selector_command(),
            options: default_selector_options(),
            preview: default_preview(),
        }
    }
}

/// tmux settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmuxSettings {
    /// tmux program
    #[serde(default = "default_tmux_command")]
    pub command: String,

    /// Index of the first window (tmux `base-index`)
    #[serde(default = "default_base_index")]
    pub base_index: u32,

    /// Index of the first pane (tmux `pane-base-index`)
    #[serde(default = "default_base_index")]
    pub pane_base_index: u32,

    /// Command typed into the editor window
    #[serde(default = "default_editor_command")]
    pub editor_command: String,

    /// Layout for new sessions
    #[serde(default)]
    pub layout: LayoutKind,
}

fn default_tmux_command() -> String {
    DEFAULT_TMUX.to_string()
}

fn default_base_index() -> u32 {
    1
}

fn default_editor_command() -> String {
    DEFAULT_EDITOR_COMMAND.to_string()
}

impl Default for TmuxSettings {
    fn default() -> Self {
        Self {
            command: default_tmux_command(),
            base_index: default_base_index(),
            pane_base_index: default_base_index(),
            editor_command: default_editor_command(),
            layout: LayoutKind::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            parent_dir: None,
            depth: default_depth(),
            selector: SelectorSettings::default(),
            allowed_dotfiles: default_allowed_dotfiles(),
            tmux: TmuxSettings::default(),
        }
    }
}

/// Replace a leading `~` component with the home directory
pub fn expand_tilde(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| path.to_path_buf()),
        Err(_) => path.to_path_buf(),
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

impl Settings {
    /// Load settings from config file or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        if let Some(p) = path {
            if p.exists() {
                return Self::read(p);
            }
            warn!(path = %p.display(), "config file not found, trying default locations");
        }

        let default_paths = [
            dirs::config_dir().map(|p| p.join("tmux-sessionizer/config.toml")),
            dirs::home_dir().map(|p| p.join(".config/tmux-sessionizer/config.toml")),
            dirs::home_dir().map(|p| p.join(".tmux-sessionizer.toml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                return Self::read(path);
            }
        }

        Ok(Self::default())
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Merge CLI config into settings (CLI takes precedence)
    pub fn merge_cli(&mut self, cli: &Config) {
        if let Some(parent_dir) = &cli.parent_dir {
            self.parent_dir = Some(parent_dir.clone());
        }
        if let Some(depth) = cli.depth {
            self.depth = depth;
        }
    }

    /// Validate and normalize settings values
    pub fn validate(&mut self) {
        if self.depth > MAX_DEPTH {
            warn!(depth = self.depth, max = MAX_DEPTH, "depth too large, clamping");
            self.depth = MAX_DEPTH;
        }
    }

    /// Parent directory: settings, then `TMUX_SESSIONIZER_PARENT_DIR`, then `HOME`, then `.`
    pub fn resolve_parent_dir(&self) -> PathBuf {
        let raw = self
            .parent_dir
            .clone()
            .or_else(|| env_path(PARENT_DIR_ENV))
            .or_else(|| env_path(HOME_ENV))
            .unwrap_or_else(|| PathBuf::from("."));
        paths::canonicalize(&expand_tilde(&raw))
    }

    /// Freeze into the configuration value passed to the core components
    pub fn to_core_config(&self) -> SessionizerConfig {
        let preview = Some(self.selector.preview.clone()).filter(|p| !p.trim().is_empty());
        SessionizerConfig {
            parent_dir: self.resolve_parent_dir(),
            max_depth: self.depth,
            selector: SelectorOptions {
                command: self.selector.command.clone(),
                options: self.selector.options.clone(),
                preview,
            },
            allowed_dotfiles: self.allowed_dotfiles.clone(),
            tmux: TmuxOptions {
                command: self.tmux.command.clone(),
                base_index: self.tmux.base_index,
                pane_base_index: self.tmux.pane_base_index,
                editor_command: self.tmux.editor_command.clone(),
                layout: self.tmux.layout,
            },
            inside_multiplexer: std::env::var_os(INSIDE_TMUX_ENV).is_some(),
        }
    }
}
