//! External program invocation.
//!
//! Commands describe what to run as an [`Invocation`] and hand it to a
//! [`Runner`]. [`SystemRunner`] spawns real processes; tests substitute a
//! scripted runner so no `az`, `func` or `git` is ever needed.

use std::fmt;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::error::CommandError;

/// A program and its arguments, plus how to run it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
    pub dir: Option<PathBuf>,
    /// Capture stdout/stderr instead of inheriting the terminal.
    pub capture: bool,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
            dir: None,
            capture: true,
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

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// Let the child write straight to the terminal.
    pub fn interactive(mut self) -> Self {
        self.capture = false;
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Outcome of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completed {
    /// Exit code, `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl Completed {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs invocations. A non-zero exit is not an error at this level.
pub trait Runner {
    fn run(&mut self, invocation: &Invocation) -> Result<Completed, CommandError>;

    /// Run and fail with [`CommandError::Failed`] on a non-zero exit.
    fn run_checked(&mut self, invocation: &Invocation) -> Result<Completed, CommandError> {
        let completed = self.run(invocation)?;
        checked(invocation, completed)
    }

    /// Whether `program` can be found, judged by `<program> --version`.
    fn available(&mut self, program: &str) -> bool {
        matches!(
            self.run(&Invocation::new(program).arg("--version")),
            Ok(completed) if completed.success()
        )
    }
}

/// Turn a non-zero exit into [`CommandError::Failed`].
pub fn checked(invocation: &Invocation, completed: Completed) -> Result<Completed, CommandError> {
    if completed.success() {
        Ok(completed)
    } else {
        Err(CommandError::Failed {
            command: invocation.to_string(),
            code: completed.code,
            stderr: completed.stderr,
        })
    }
}

/// Spawns real child processes with `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl Runner for SystemRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<Completed, CommandError> {
        tracing::debug!(command = %invocation, capture = invocation.capture, "running");

        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args);
        command.envs(invocation.env.iter().map(|(k, v)| (k, v)));
        if let Some(dir) = &invocation.dir {
            command.current_dir(dir);
        }

        let spawn_error = |source: std::io::Error| CommandError::Spawn {
            program: invocation.program.clone(),
            source,
        };

        let completed = if invocation.capture {
            let output = command
                .stdin(Stdio::null())
                .output()
                .map_err(spawn_error)?;
            Completed {
                code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }
        } else {
            let status = command.status().map_err(spawn_error)?;
            Completed {
                code: status.code(),
                ..Completed::default()
            }
        };

        tracing::debug!(command = %invocation, code = ?completed.code, "finished");
        Ok(completed)
    }
}


#[cfg(test)]
mod tests {
    use super::fake::ScriptedRunner;
    use super::*;

    #[test]
    fn display_quotes_arguments_with_spaces() {
        let inv = Invocation::new("func")
            .args(["new", "--template"])
            .arg("HTTP trigger");
        assert_eq!(inv.to_string(), "func new --template \"HTTP trigger\"");
    }

    #[test]
    fn builders_accumulate() {
        let inv = Invocation::new("python")
            .args(["-m", "pytest"])
            .env("LEGEND_ENVIRONMENT", "test")
            .current_dir("/tmp")
            .interactive();
        assert_eq!(inv.args, vec!["-m", "pytest"]);
        assert_eq!(inv.env, vec![("LEGEND_ENVIRONMENT".into(), "test".into())]);
        assert_eq!(inv.dir, Some(PathBuf::from("/tmp")));
        assert!(!inv.capture);
    }

    #[test]
    fn checked_maps_failure() {
        let inv = Invocation::new("az").arg("login");
        let result = checked(
            &inv,
            Completed {
                code: Some(1),
                stdout: String::new(),
                stderr: "no subscription".into(),
            },
        );
        match result {
            Err(CommandError::Failed {
                command,
                code,
                stderr,
            }) => {
                assert_eq!(command, "az login");
                assert_eq!(code, Some(1));
                assert_eq!(stderr, "no subscription");
            }
            other => panic!("Expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn available_checks_version_exit_code() {
        let mut runner = ScriptedRunner::new().ok("4.0.1").fail(127, "not found");
        assert!(runner.available("func"));
        assert!(!runner.available("az"));
        assert_eq!(runner.commands(), vec!["func --version", "az --version"]);
    }

    #[test]
    fn system_runner_reports_missing_program() {
        let result = SystemRunner.run(&Invocation::new("legend-test-no-such-program"));
        assert!(matches!(result, Err(CommandError::Spawn { .. })));
    }
}
