//! Test infrastructure for make-update integration tests.

#![allow(dead_code)]

use anyhow::Result;
use make_update::config::{Config, Verbosity};
use make_update::vcs::{CommandRunner, Invocation, SystemRunner};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Config for tests: quiet, with the library tree rooted at `lib_dir`.
pub fn test_config(lib_dir: &Path) -> Config {
    Config {
        verbosity: Verbosity::Quiet,
        lib_dir: lib_dir.to_path_buf(),
        ..Config::default()
    }
}

/// Records every invocation instead of running it.
///
/// The branch query answers with `branch`; a status command whose command
/// line starts with the configured prefix exits with the configured code.
pub struct RecordingRunner {
    branch: Result<String, String>,
    fail_on: Option<(String, i32)>,
    calls: RefCell<Vec<Invocation>>,
}

impl RecordingRunner {
    pub fn on_branch(branch: &str) -> Self {
        Self {
            branch: Ok(branch.to_string()),
            fail_on: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Runner whose branch query fails the way git does outside a repository.
    pub fn without_branch() -> Self {
        Self {
            branch: Err("fatal: not a git repository".to_string()),
            fail_on: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn failing_on(mut self, prefix: &str, code: i32) -> Self {
        self.fail_on = Some((prefix.to_string(), code));
        self
    }

    /// Command lines run so far, including the branch query.
    pub fn command_lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(ToString::to_string).collect()
    }

    pub fn count_starting_with(&self, prefix: &str) -> usize {
        self.command_lines()
            .iter()
            .filter(|line| line.starts_with(prefix))
            .count()
    }
}

impl CommandRunner for RecordingRunner {
    fn status(&self, invocation: &Invocation) -> anyhow::Result<i32> {
        self.calls.borrow_mut().push(invocation.clone());
        let line = invocation.to_string();
        match &self.fail_on {
            Some((prefix, code)) if line.starts_with(prefix.as_str()) => Ok(*code),
            _ => Ok(0),
        }
    }

    fn output(&self, invocation: &Invocation) -> anyhow::Result<String> {
        self.calls.borrow_mut().push(invocation.clone());
        match &self.branch {
            Ok(branch) => Ok(format!("{}\n", branch)),
            Err(message) => anyhow::bail!("{}", message),
        }
    }
}

/// A temporary library tree standing in for `../lib`.
pub struct LibTree {
    _temp_dir: TempDir,
    path: PathBuf,
}

impl LibTree {
    /// Creates the parent directory only; the library root does not exist yet.
    pub fn missing() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("lib");
        Ok(Self {
            _temp_dir: temp_dir,
            path,
        })
    }

    pub fn new() -> Result<Self> {
        let tree = Self::missing()?;
        std::fs::create_dir_all(&tree.path)?;
        Ok(tree)
    }

    /// Adds a subdirectory that is its own svn working copy.
    pub fn add_working_copy(&self, name: &str) -> Result<PathBuf> {
        let dir = self.path.join(name);
        std::fs::create_dir_all(dir.join(".svn"))?;
        Ok(dir)
    }

    pub fn add_dir(&self, name: &str) -> Result<PathBuf> {
        let dir = self.path.join(name);
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    pub fn add_file(&self, name: &str) -> Result<()> {
        std::fs::write(self.path.join(name), "precompiled libraries\n")?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Runs git in `repo`, failing on a nonzero exit.
pub fn run_git(repo: &Path, args: &[&str]) -> Result<String> {
    SystemRunner::in_dir(repo).output(&Invocation::new("git", args.iter().copied()))
}

/// A temporary git repository for testing.
/// Automatically cleaned up when dropped.
pub struct TestRepo {
    _temp_dir: TempDir,
    path: PathBuf,
}

impl TestRepo {
    /// Creates a new test repository with an initial commit on `branch`.
    pub fn on_branch(branch: &str) -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().to_path_buf();

        run_git(&path, &["init", "-b", branch])?;
        run_git(&path, &["config", "user.email", "test@example.com"])?;
        run_git(&path, &["config", "user.name", "Test User"])?;

        std::fs::write(path.join("README.md"), "# Test Repo\n")?;
        run_git(&path, &["add", "README.md"])?;
        run_git(&path, &["commit", "-m", "Initial commit"])?;

        Ok(Self {
            _temp_dir: temp_dir,
            path,
        })
    }

    /// Creates a test repository tracking a bare remote.
    /// Returns the repo and the remote TempDir (must be kept alive).
    pub fn with_remote(branch: &str) -> Result<(Self, TempDir)> {
        let remote_dir = TempDir::new()?;
        run_git(remote_dir.path(), &["init", "--bare"])?;

        let local = Self::on_branch(branch)?;
        let remote = remote_dir.path().display().to_string();
        run_git(&local.path, &["remote", "add", "origin", &remote])?;
        run_git(&local.path, &["push", "-u", "origin", branch])?;

        Ok((local, remote_dir))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
