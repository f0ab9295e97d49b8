//! Top-level control flow: discover, select, then reuse or launch and attach.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing::{debug, info, warn};

use sessionizer_core::{
    factory_for, paths, session_name_for, walk, ActivationProbe, Attacher, CandidateSelector,
    CommandRunner, Result, SessionLauncher, SessionRegistry, SessionizerConfig, ValidationError,
};

/// What a run should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Walk the parent directory and let the user pick
    Discover,
    /// Open this directory directly
    Directory(PathBuf),
    /// Pick among already running sessions
    Sessions,
}

/// How a run ended without error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Attached to a session already rooted at the chosen directory
    Attached(String),
    /// Created a new session, then attached to it
    Launched(String),
    /// Switched to an active session
    Switched(String),
    /// The directory selection was cancelled
    NothingSelected,
    /// The session selection was cancelled or there were no sessions
    NoSwitch,
}

impl Outcome {
    /// Process exit status for this outcome
    pub fn status(&self) -> u8 {
        match self {
            Outcome::NothingSelected => 1,
            _ => 0,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.status())
    }
}

fn ensure_dir(path: &Path) -> std::result::Result<(), ValidationError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(ValidationError::InvalidDirectory {
            path: path.to_path_buf(),
        })
    }
}

/// Wires the core components together for one invocation
pub struct App<'a> {
    config: SessionizerConfig,
    runner: &'a dyn CommandRunner,
    probe: &'a dyn ActivationProbe,
}

impl<'a> App<'a> {
    pub fn new(
        config: SessionizerConfig,
        runner: &'a dyn CommandRunner,
        probe: &'a dyn ActivationProbe,
    ) -> Self {
        Self {
            config,
            runner,
            probe,
        }
    }

    pub fn run(&self, mode: Mode) -> Result<Outcome> {
        match mode {
            Mode::Discover => self.discover_and_open(),
            Mode::Directory(dir) => self.open(&paths::canonicalize(&dir)),
            Mode::Sessions => self.switch_active_session(),
        }
    }

    fn discover_and_open(&self) -> Result<Outcome> {
        let parent = paths::canonicalize(&self.config.parent_dir);
        ensure_dir(&parent)?;

        let candidates = walk(&parent, self.config.max_depth);
        debug!(count = candidates.len(), parent = %parent.display(), "discovered directories");
        // The parent itself is always recorded; it alone does not count
        if candidates.iter().all(|c| c.path == parent) {
            return Err(ValidationError::NoSubdirectories { path: parent }.into());
        }

        let selector = CandidateSelector::new(&self.config, self.runner);
        match selector.select(&candidates, &parent)? {
            Some(path) => self.open(&path),
            None => {
                info!("no directory selected");
                Ok(Outcome::NothingSelected)
            }
        }
    }

    /// Attach to the session rooted at `path`, creating it first if needed
    fn open(&self, path: &Path) -> Result<Outcome> {
        ensure_dir(path)?;
        let registry = SessionRegistry::new(&self.config, self.runner);
        let attacher = Attacher::new(&self.config, self.runner);

        if let Some(name) = registry.find_session_for_path(path) {
            info!(session = %name, "reusing existing session");
            attacher.attach(&name)?;
            return Ok(Outcome::Attached(name));
        }

        let name = session_name_for(path);
        let factory = factory_for(&self.config.tmux, self.probe);
        SessionLauncher::new(&self.config, factory.as_ref(), self.runner).launch(&name, path)?;
        attacher.attach(&name)?;
        Ok(Outcome::Launched(name))
    }

    fn switch_active_session(&self) -> Result<Outcome> {
        let registry = SessionRegistry::new(&self.config, self.runner);
        let names = registry.session_names().unwrap_or_else(|warning| {
            warn!(%warning, "could not query tmux sessions");
            Vec::new()
        });

        let selector = CandidateSelector::new(&self.config, self.runner);
        match selector.select_session(&names)? {
            Some(name) => {
                Attacher::new(&self.config, self.runner).attach(&name)?;
                Ok(Outcome::Switched(name))
            }
            None => Ok(Outcome::NoSwitch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sessionizer_core::testing::FakeRunner;
    use sessionizer_core::{Error, MarkerProbe, ProcessOutput};
    use std::fs;
    use tempfile::TempDir;

    fn project_tree(dirs: &[&str]) -> TempDir {
        // Not `TempDir::new()`: a `.tmpXXXX` parent would be a dot-named leaf
        let tmp = tempfile::Builder::new()
            .prefix("sessionizer")
            .tempdir()
            .unwrap();
        for dir in dirs {
            fs::create_dir_all(tmp.path().join(dir)).unwrap();
        }
        tmp
    }

    fn config_for(parent: &Path) -> SessionizerConfig {
        SessionizerConfig {
            parent_dir: parent.to_path_buf(),
            ..SessionizerConfig::default()
        }
    }

    #[test]
    fn test_cancelled_selection_skips_registry_and_launch() {
        let tmp = project_tree(&["a", "b"]);
        let runner = FakeRunner::with_outputs([ProcessOutput::exit(130, "")]);
        let app = App::new(config_for(tmp.path()), &runner, &MarkerProbe);

        let outcome = app.run(Mode::Discover).unwrap();

        assert_eq!(outcome, Outcome::NothingSelected);
        assert_eq!(outcome.status(), 1);
        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].invocation.program, "fzf");
        assert_eq!(calls[0].stdin.as_deref(), Some(".\na\nb"));
    }

    #[test]
    fn test_empty_parent_fails_before_selector() {
        let tmp = project_tree(&[]);
        let runner = FakeRunner::new();
        let app = App::new(config_for(tmp.path()), &runner, &MarkerProbe);

        let err = app.run(Mode::Discover).unwrap_err();

        assert!(matches!(
            err,
            Error::Validation(ValidationError::NoSubdirectories { .. })
        ));
        assert!(err.to_string().starts_with("no subdirectories found in"));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_missing_parent_is_invalid() {
        let runner = FakeRunner::new();
        let app = App::new(
            config_for(Path::new("/nonexistent-sessionizer-parent")),
            &runner,
            &MarkerProbe,
        );

        let err = app.run(Mode::Discover).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidDirectory { .. })
        ));
    }

    #[test]
    fn test_selection_reuses_existing_session() {
        let tmp = project_tree(&["a", "b"]);
        let b = paths::canonicalize(&tmp.path().join("b"));
        let runner = FakeRunner::with_outputs([
            ProcessOutput::ok("b\n"),
            ProcessOutput::ok(format!("dev:/elsewhere\nwork:{}/\n", b.display())),
        ]);
        let app = App::new(config_for(tmp.path()), &runner, &MarkerProbe);

        let outcome = app.run(Mode::Discover).unwrap();

        assert_eq!(outcome, Outcome::Attached("work".to_string()));
        let commands = runner.commands();
        assert_eq!(commands.len(), 3);
        assert!(commands[1].starts_with("tmux list-sessions"));
        assert_eq!(commands[2], "tmux attach-session -t work");
        assert!(runner.calls()[2].interactive);
    }

    #[test]
    fn test_selection_launches_new_session() {
        let tmp = project_tree(&["site.com"]);
        let runner = FakeRunner::with_outputs([
            ProcessOutput::ok("site.com\n"),
            ProcessOutput::exit(1, "no server running on /tmp/tmux-1000/default\n"),
        ]);
        let app = App::new(config_for(tmp.path()), &runner, &MarkerProbe);

        let outcome = app.run(Mode::Discover).unwrap();

        assert_eq!(outcome, Outcome::Launched("site_com".to_string()));
        let commands = runner.commands();
        // selector, registry, new-session, seven layout steps, attach
        assert_eq!(commands.len(), 11);
        assert!(commands[2].starts_with("tmux new-session -d -s site_com -c "));
        assert_eq!(commands[10], "tmux attach-session -t site_com");
    }

    #[test]
    fn test_launch_failure_surfaces_without_attach() {
        let tmp = project_tree(&["a"]);
        let runner = FakeRunner::with_outputs([
            ProcessOutput::ok("a\n"),
            ProcessOutput::ok(""),
            ProcessOutput::ok(""),
            ProcessOutput::ok(""),
            ProcessOutput::exit(1, "boom"),
        ]);
        let app = App::new(config_for(tmp.path()), &runner, &MarkerProbe);

        let err = app.run(Mode::Discover).unwrap_err();

        match err {
            Error::Launch(e) => assert_eq!(e.step, 2),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(runner.calls().len(), 5);
        assert!(runner.calls().iter().all(|c| !c.interactive));
    }

    #[test]
    fn test_directory_mode_bypasses_selector() {
        let tmp = project_tree(&["api"]);
        let runner = FakeRunner::new();
        let app = App::new(config_for(tmp.path()), &runner, &MarkerProbe);

        let outcome = app
            .run(Mode::Directory(tmp.path().join("api")))
            .unwrap();

        assert_eq!(outcome, Outcome::Launched("api".to_string()));
        assert!(runner.commands()[0].starts_with("tmux list-sessions"));
        assert!(runner.calls().iter().all(|c| c.invocation.program != "fzf"));
    }

    #[test]
    fn test_directory_mode_rejects_file() {
        let tmp = project_tree(&[]);
        let file = tmp.path().join("notes.txt");
        fs::write(&file, "").unwrap();
        let runner = FakeRunner::new();
        let app = App::new(config_for(tmp.path()), &runner, &MarkerProbe);

        let err = app.run(Mode::Directory(file)).unwrap_err();

        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidDirectory { .. })
        ));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_sessions_mode_switches_client() {
        let tmp = project_tree(&[]);
        let config = SessionizerConfig {
            inside_multiplexer: true,
            ..config_for(tmp.path())
        };
        let runner = FakeRunner::with_outputs([
            ProcessOutput::ok("dev\nwork\n"),
            ProcessOutput::ok("work\n"),
        ]);
        let app = App::new(config, &runner, &MarkerProbe);

        let outcome = app.run(Mode::Sessions).unwrap();

        assert_eq!(outcome, Outcome::Switched("work".to_string()));
        assert_eq!(
            runner.commands().last().map(String::as_str),
            Some("tmux switch-client -t work")
        );
    }

    #[test]
    fn test_sessions_mode_cancel_exits_cleanly() {
        let tmp = project_tree(&[]);
        let runner = FakeRunner::with_outputs([
            ProcessOutput::ok("dev\n"),
            ProcessOutput::exit(130, ""),
        ]);
        let app = App::new(config_for(tmp.path()), &runner, &MarkerProbe);

        let outcome = app.run(Mode::Sessions).unwrap();

        assert_eq!(outcome, Outcome::NoSwitch);
        assert_eq!(outcome.status(), 0);
        assert_eq!(runner.calls().len(), 2);
    }

    #[test]
    fn test_sessions_mode_without_server() {
        let tmp = project_tree(&[]);
        let runner = FakeRunner::with_outputs([ProcessOutput::exit(
            1,
            "no server running on /tmp/tmux-1000/default",
        )]);
        let app = App::new(config_for(tmp.path()), &runner, &MarkerProbe);

        assert_eq!(app.run(Mode::Sessions).unwrap(), Outcome::NoSwitch);
        assert_eq!(runner.calls().len(), 1);
    }
}
