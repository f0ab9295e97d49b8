//! tmux-sessionizer: fuzzy find a project directory and open it in a tmux session.
//!
//! The discovery and session logic lives in `sessionizer-core`; this crate adds
//! the command line, the config file and the run orchestration.

pub mod app;
pub mod config;
