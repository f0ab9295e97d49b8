//! Creating a session and applying its layout, step by step.

use std::path::Path;

use tracing::{debug, info};

use crate::config::SessionizerConfig;
use crate::error::{describe_code, LaunchError};
use crate::layout::LayoutFactory;
use crate::process::{CommandRunner, Invocation};

/// Creates detached sessions and configures them through a [`LayoutFactory`]
pub struct SessionLauncher<'a> {
    program: &'a str,
    factory: &'a dyn LayoutFactory,
    runner: &'a dyn CommandRunner,
}

impl<'a> SessionLauncher<'a> {
    pub fn new(
        config: &'a SessionizerConfig,
        factory: &'a dyn LayoutFactory,
        runner: &'a dyn CommandRunner,
    ) -> Self {
        Self {
            program: &config.tmux.command,
            factory,
            runner,
        }
    }

    /// Create session `name` rooted at `path`, then run its layout plan.
    ///
    /// Stops at the first failing step. Steps already applied stay applied.
    pub fn launch(&self, name: &str, path: &Path) -> Result<(), LaunchError> {
        let create = Invocation::new(self.program)
            .args(["new-session", "-d", "-s", name, "-c"])
            .arg(path.to_string_lossy());
        self.run_step(0, &create)?;

        let plan = self.factory.produce_layout(name, path);
        debug!(session = name, steps = plan.len(), "applying layout");
        for (index, step) in plan.into_iter().enumerate() {
            self.run_step(index + 1, &step.invocation(self.program))?;
        }

        info!(session = name, path = %path.display(), "created session");
        Ok(())
    }

    fn run_step(&self, step: usize, invocation: &Invocation) -> Result<(), LaunchError> {
        let output = self
            .runner
            .output(invocation, None)
            .map_err(|e| LaunchError {
                step,
                command: invocation.to_string(),
                reason: e.to_string(),
            })?;

        if !output.is_success() {
            return Err(LaunchError {
                step,
                command: invocation.to_string(),
                reason: format!(
                    "terminated with {}: {}",
                    describe_code(&output.code),
                    output.stderr.trim()
                ),
            });
        }
        Ok(())
    }
}
