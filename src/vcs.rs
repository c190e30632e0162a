//! Version-control command wrappers.
//!
//! Every git and svn invocation is described as an [`Invocation`] and handed
//! to a [`CommandRunner`]. The process-backed [`SystemRunner`] is used by the
//! binary; tests substitute a recording runner.

use crate::error::UpdateError;
use anyhow::Context;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Callback invoked with each invocation right before it runs.
pub type CommandLogger = fn(&Invocation);

/// Echoes the command line to stdout.
pub fn echo_logger(invocation: &Invocation) {
    // A closed stdout must not abort the update itself.
    let _ = write_echo(&mut std::io::stdout().lock(), invocation);
}

fn write_echo(out: &mut impl Write, invocation: &Invocation) -> std::io::Result<()> {
    writeln!(out, "{}", invocation)?;
    out.flush()
}

pub fn no_op_logger(_invocation: &Invocation) {}

/// A single external command: program plus arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Narrow seam over process execution.
pub trait CommandRunner {
    /// Runs the command with inherited stdio and returns its exit code.
    fn status(&self, invocation: &Invocation) -> anyhow::Result<i32>;

    /// Runs the command, capturing stdout. Fails on a nonzero exit.
    fn output(&self, invocation: &Invocation) -> anyhow::Result<String>;
}

/// Runs commands as child processes of this one.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    working_dir: Option<PathBuf>,
}

impl SystemRunner {
    /// Runner whose children start in `dir` instead of the current directory.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            working_dir: Some(dir.to_path_buf()),
        }
    }

    fn command(&self, invocation: &Invocation) -> Command {
        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args);
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }
        command
    }
}

impl CommandRunner for SystemRunner {
    fn status(&self, invocation: &Invocation) -> anyhow::Result<i32> {
        let status = self
            .command(invocation)
            .status()
            .with_context(|| format!("Failed to execute {}", invocation.program))?;

        // Killed by a signal: no code to forward.
        Ok(status.code().unwrap_or(crate::constants::GENERIC_FAILURE_CODE))
    }

    fn output(&self, invocation: &Invocation) -> anyhow::Result<String> {
        let output = self
            .command(invocation)
            .output()
            .with_context(|| format!("Failed to execute {}", invocation.program))?;

        if output.status.success() {
            let result = String::from_utf8_lossy(&output.stdout);
            Ok(result.as_ref().trim().to_string())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("{} failed: {}", invocation, stderr.trim())
        }
    }
}

/// Logs and runs `invocation`, turning anything but exit code 0 into an error.
pub fn call(
    runner: &dyn CommandRunner,
    logger: CommandLogger,
    invocation: &Invocation,
) -> Result<(), UpdateError> {
    logger(invocation);
    let code = runner.status(invocation).map_err(|source| UpdateError::Spawn {
        command: invocation.to_string(),
        source,
    })?;

    if code == 0 {
        Ok(())
    } else {
        Err(UpdateError::CommandFailed {
            command: invocation.to_string(),
            code,
        })
    }
}

fn path_arg(path: &Path) -> String {
    path.display().to_string()
}

pub mod git {
    use super::Invocation;

    pub fn current_branch(git: &str) -> Invocation {
        Invocation::new(git, ["rev-parse", "--abbrev-ref", "HEAD"])
    }

    pub fn pull_rebase(git: &str) -> Invocation {
        Invocation::new(git, ["pull", "--rebase"])
    }

    pub fn submodule_update(git: &str) -> Invocation {
        Invocation::new(git, ["submodule", "update", "--init", "--recursive"])
    }

    /// `git submodule foreach git checkout <branch>`
    pub fn submodule_checkout(git: &str, branch: &str) -> Invocation {
        Invocation::new(git, ["submodule", "foreach", git, "checkout", branch])
    }

    /// `git submodule foreach git pull --rebase <remote> <branch>`
    pub fn submodule_pull_rebase(git: &str, remote: &str, branch: &str) -> Invocation {
        Invocation::new(
            git,
            ["submodule", "foreach", git, "pull", "--rebase", remote, branch],
        )
    }
}

pub mod svn {
    use super::{Invocation, path_arg};
    use std::path::Path;

    pub fn checkout(svn: &str, url: &str, dir: &Path) -> Invocation {
        Invocation::new(svn, ["checkout".to_string(), url.to_string(), path_arg(dir)])
    }

    pub fn cleanup(svn: &str, dir: &Path) -> Invocation {
        Invocation::new(svn, ["cleanup".to_string(), path_arg(dir)])
    }

    pub fn switch(svn: &str, url: &str, dir: &Path) -> Invocation {
        Invocation::new(svn, ["switch".to_string(), url.to_string(), path_arg(dir)])
    }

    pub fn update(svn: &str, dir: &Path) -> Invocation {
        Invocation::new(svn, ["update".to_string(), path_arg(dir)])
    }
}
