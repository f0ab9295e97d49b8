use tracing::debug;

use super::TmuxCommand;
use crate::config::SessionizerConfig;
use crate::error::AttachError;
use crate::process::{CommandRunner, Invocation};

/// Environment variable tmux sets inside its clients
pub const INSIDE_TMUX_ENV: &str = "TMUX";

/// Moves the controlling terminal onto a session
pub struct Attacher<'a> {
    program: &'a str,
    inside_multiplexer: bool,
    runner: &'a dyn CommandRunner,
}

impl<'a> Attacher<'a> {
    pub fn new(config: &'a SessionizerConfig, runner: &'a dyn CommandRunner) -> Self {
        Self {
            program: &config.tmux.command,
            inside_multiplexer: config.inside_multiplexer,
            runner,
        }
    }

    /// `switch-client` from inside tmux, `attach-session` otherwise
    pub fn invocation(&self, session: &str) -> Invocation {
        let command = if self.inside_multiplexer {
            TmuxCommand::switch_client(session)
        } else {
            TmuxCommand::attach_session(session)
        };
        command.invocation(self.program)
    }

    pub fn attach(&self, session: &str) -> Result<(), AttachError> {
        let invocation = self.invocation(session);
        debug!(session, inside = self.inside_multiplexer, "attaching");

        let code = self
            .runner
            .interactive(&invocation)
            .map_err(|source| AttachError::Spawn {
                command: invocation.to_string(),
                source,
            })?;
        if code != Some(0) {
            return Err(AttachError::Failed {
                command: invocation.to_string(),
                code,
            });
        }
        Ok(())
    }
}
