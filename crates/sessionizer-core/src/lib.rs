//! Core of tmux-sessionizer.
//!
//! Finds project directories below a parent, lets the user pick one through
//! a fuzzy selector, and maps the choice onto a tmux session: an existing
//! session rooted at the same canonical path is reused, otherwise a new one
//! is created with a fixed window/pane layout.
//!
//! ```text
//! walker ──▶ selector ──▶ registry ──hit──▶ attacher
//!                            └──miss──▶ launcher (+ layout, probe) ──▶ attacher
//! ```
//!
//! Everything is synchronous; external processes run one at a time through
//! a [`CommandRunner`].

pub mod config;
pub mod error;
pub mod launcher;
pub mod layout;
pub mod paths;
pub mod probe;
pub mod process;
pub mod selector;
pub mod tmux;
pub mod walker;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use config::{LayoutKind, SelectorOptions, SessionizerConfig, TmuxOptions};
pub use error::{
    AttachError, Error, LaunchError, RegistryQueryWarning, Result, SelectionError,
    ValidationError,
};
pub use launcher::SessionLauncher;
pub use layout::{factory_for, LayoutFactory, LayoutPlan, SingleWindowLayout, StandardLayout};
pub use probe::{ActivationProbe, MarkerProbe};
pub use process::{CommandRunner, Invocation, ProcessOutput, SystemRunner};
pub use selector::{CandidateList, CandidateSelector};
pub use tmux::{session_name_for, Attacher, Session, SessionRegistry, TmuxCommand};
pub use walker::{walk, ProjectDirectory};
