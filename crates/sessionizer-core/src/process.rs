//! Blocking execution of external collaborator processes.
//!
//! Every multiplexer subcommand and every selector run goes through a
//! [`CommandRunner`], one call at a time.

use std::borrow::Cow;
use std::fmt;
use std::io::{self, Write};
use std::process::{Command, Stdio};

use tracing::debug;

/// Quote a word for display or for a shell-evaluated option value
pub fn shell_quote(word: &str) -> Cow<'_, str> {
    let safe = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "/._-+=:@,%".contains(c));
    if safe {
        Cow::Borrowed(word)
    } else {
        Cow::Owned(format!("'{}'", word.replace('\'', r"'\''")))
    }
}

/// A program plus its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", shell_quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(arg))?;
        }
        Ok(())
    }
}

/// Captured result of a finished process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    /// Successful exit with the given stdout
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Exit with an explicit code and stderr
    pub fn exit(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Seam between the sessionizer and the processes it drives
pub trait CommandRunner {
    /// Run to completion with captured output, feeding `stdin` if given
    fn output(&self, invocation: &Invocation, stdin: Option<&str>) -> io::Result<ProcessOutput>;

    /// Run to completion on the controlling terminal, returning the exit code
    fn interactive(&self, invocation: &Invocation) -> io::Result<Option<i32>>;
}

/// Runs invocations as real child processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn output(&self, invocation: &Invocation, stdin: Option<&str>) -> io::Result<ProcessOutput> {
        debug!(command = %invocation, "running");

        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let output = match stdin {
            Some(input) => {
                let mut child = command.stdin(Stdio::piped()).spawn()?;
                {
                    let mut pipe = child.stdin.take().ok_or_else(|| {
                        io::Error::new(io::ErrorKind::BrokenPipe, "child stdin not captured")
                    })?;
                    // The child may exit before consuming everything (e.g. --select-1)
                    if let Err(e) = pipe.write_all(input.as_bytes()) {
                        if e.kind() != io::ErrorKind::BrokenPipe {
                            return Err(e);
                        }
                    }
                    // pipe dropped here to signal EOF
                }
                child.wait_with_output()?
            }
            None => command.stdin(Stdio::null()).output()?,
        };

        Ok(ProcessOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn interactive(&self, invocation: &Invocation) -> io::Result<Option<i32>> {
        debug!(command = %invocation, "running interactively");
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .status()?;
        Ok(status.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_quote() {
        assert_eq!(shell_quote("/home/user/code"), "/home/user/code");
        assert_eq!(shell_quote("my project"), "'my project'");
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
        assert_eq!(shell_quote(""), "''");
    }

    #[test]
    fn test_invocation_display() {
        let inv = Invocation::new("tmux")
            .args(["send-keys", "-t", "api:1.1"])
            .arg("nvim .")
            .arg("C-m");
        assert_eq!(inv.to_string(), "tmux send-keys -t api:1.1 'nvim .' C-m");
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_feeds_stdin() {
        let output = SystemRunner
            .output(&Invocation::new("cat"), Some("a\nb"))
            .expect("cat should run");
        assert!(output.is_success());
        assert_eq!(output.stdout, "a\nb");
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_reports_exit_code() {
        let output = SystemRunner
            .output(&Invocation::new("sh").args(["-c", "echo oops >&2; exit 3"]), None)
            .expect("sh should run");
        assert_eq!(output.code, Some(3));
        assert_eq!(output.stderr.trim(), "oops");
    }

    #[test]
    fn test_system_runner_missing_program() {
        let missing = Invocation::new("definitely-not-a-real-binary-xyz");
        let result = SystemRunner.output(&missing, None);
        assert!(result.is_err());
    }
}
