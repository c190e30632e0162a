// Update steps, orchestration, result types

use crate::config::Config;
use crate::constants::{MAINLINE_BRANCH, MAINLINE_REMOTE, SVN_DIR};
use crate::context::{BranchContext, Platform, UpdateContext};
use crate::error::UpdateError;
use crate::vcs::{self, CommandLogger, CommandRunner, git, svn};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateStep {
    DetectingBranch,
    CheckingOutLibraries { platform: Platform },
    UpdatingLibraries,
    UpdatingRepository,
    UpdatingSubmodules,
    TrackingSubmodules,
    Completed,
}

impl std::fmt::Display for UpdateStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdateStep::DetectingBranch => write!(f, "Detecting current branch"),
            UpdateStep::CheckingOutLibraries { platform } => {
                write!(f, "Checking out {} libraries", platform.lib_dir_name())
            }
            UpdateStep::UpdatingLibraries => write!(f, "Updating libraries"),
            UpdateStep::UpdatingRepository => write!(f, "Pulling with rebase"),
            UpdateStep::UpdatingSubmodules => write!(f, "Updating submodules"),
            UpdateStep::TrackingSubmodules => {
                write!(f, "Moving submodules to {}", MAINLINE_BRANCH)
            }
            UpdateStep::Completed => write!(f, "Completed"),
        }
    }
}

/// Progress notifications emitted during an update.
pub trait UpdateCallbacks {
    /// Called once the branch context has been resolved.
    fn on_context(&self, _ctx: &UpdateContext) {}

    /// Called before each step starts.
    fn on_step(&self, step: &UpdateStep);

    fn on_complete(&self, _result: &UpdateResult) {}
}

#[derive(Debug)]
pub struct UpdateResult {
    pub outcome: UpdateOutcome,
    pub duration: Duration,
}

impl UpdateResult {
    /// Process exit code for this result.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match &self.outcome {
            UpdateOutcome::Success(_) => 0,
            UpdateOutcome::Failed(failure) => failure.error.exit_code(),
        }
    }
}

#[derive(Debug)]
pub struct UpdateSuccess {
    pub release_version: Option<String>,
    pub platform: Option<Platform>,
    /// Library directories that were cleaned up, switched and updated.
    pub updated_libraries: Vec<String>,
}

#[derive(Debug)]
pub struct UpdateFailure {
    pub error: UpdateError,
    pub step: UpdateStep,
}

#[derive(Debug)]
pub enum UpdateOutcome {
    Success(UpdateSuccess),
    Failed(UpdateFailure),
}

fn at_step<T>(step: &UpdateStep, result: Result<T, UpdateError>) -> Result<T, UpdateFailure> {
    result.map_err(|error| UpdateFailure {
        error,
        step: step.clone(),
    })
}

/// Queries git for the current branch and derives the release version.
pub fn detect_branch(
    runner: &dyn CommandRunner,
    config: &Config,
) -> Result<BranchContext, UpdateError> {
    let output = runner
        .output(&git::current_branch(&config.git_command))
        .map_err(UpdateError::BranchUnavailable)?;

    let branch = output.trim();
    if branch.is_empty() || branch == "HEAD" {
        return Err(UpdateError::BranchUnavailable(anyhow::anyhow!(
            "HEAD is not on a branch"
        )));
    }
    Ok(BranchContext::new(branch))
}

/// The platform whose library directory is missing and needs a fresh checkout.
#[must_use]
pub fn pending_library_checkout(ctx: &UpdateContext) -> Option<Platform> {
    ctx.platform
        .filter(|&platform| !ctx.lib_dir_for(platform).exists())
}

/// Checks out the libraries for `platform` into the library tree.
pub fn checkout_libraries(
    runner: &dyn CommandRunner,
    config: &Config,
    ctx: &UpdateContext,
    platform: Platform,
    logger: CommandLogger,
) -> Result<(), UpdateError> {
    let url = ctx.remote_for(platform.lib_dir_name());
    let dir = ctx.lib_dir_for(platform);
    vcs::call(runner, logger, &svn::checkout(&config.svn_command, &url, &dir))
}

/// Library subdirectories that are svn working copies, sorted by name.
///
/// A child qualifies when it is a directory and either it or the library
/// root carries svn metadata. A missing root yields no directories; a root
/// that cannot be read is an error.
pub fn library_dirs(lib_dir: &Path) -> Result<Vec<PathBuf>, UpdateError> {
    if !lib_dir.is_dir() {
        return Ok(Vec::new());
    }
    let root_is_working_copy = lib_dir.join(SVN_DIR).exists();
    let scan_error = |source: std::io::Error| UpdateError::LibraryScan {
        dir: lib_dir.display().to_string(),
        source,
    };

    let mut dirs = Vec::new();
    for entry in std::fs::read_dir(lib_dir).map_err(scan_error)? {
        let entry = entry.map_err(scan_error)?;
        if entry.file_name() == SVN_DIR {
            continue;
        }
        let path = entry.path();
        if path.is_dir() && (root_is_working_copy || path.join(SVN_DIR).exists()) {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Cleans up, switches and updates each library working copy.
/// Returns the names of the directories that were updated.
pub fn update_libraries(
    runner: &dyn CommandRunner,
    config: &Config,
    ctx: &UpdateContext,
    logger: CommandLogger,
) -> Result<Vec<String>, UpdateError> {
    let svn_command = &config.svn_command;
    let mut updated = Vec::new();

    for dir in library_dirs(&ctx.lib_dir)? {
        let Some(name) = dir.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            continue;
        };
        vcs::call(runner, logger, &svn::cleanup(svn_command, &dir))?;
        vcs::call(
            runner,
            logger,
            &svn::switch(svn_command, &ctx.remote_for(&name), &dir),
        )?;
        vcs::call(runner, logger, &svn::update(svn_command, &dir))?;
        updated.push(name);
    }

    Ok(updated)
}

pub fn update_repository(
    runner: &dyn CommandRunner,
    config: &Config,
    logger: CommandLogger,
) -> Result<(), UpdateError> {
    vcs::call(runner, logger, &git::pull_rebase(&config.git_command))
}

pub fn update_submodules(
    runner: &dyn CommandRunner,
    config: &Config,
    logger: CommandLogger,
) -> Result<(), UpdateError> {
    vcs::call(runner, logger, &git::submodule_update(&config.git_command))
}

/// Moves every submodule to the tip of its mainline branch.
///
/// Release builds keep the revisions pinned by `update_submodules`.
pub fn track_submodules(
    runner: &dyn CommandRunner,
    config: &Config,
    logger: CommandLogger,
) -> Result<(), UpdateError> {
    let git_command = &config.git_command;
    vcs::call(
        runner,
        logger,
        &git::submodule_checkout(git_command, MAINLINE_BRANCH),
    )?;
    vcs::call(
        runner,
        logger,
        &git::submodule_pull_rebase(git_command, MAINLINE_REMOTE, MAINLINE_BRANCH),
    )
}

/// Runs the whole update for the host platform.
pub fn update(
    runner: &dyn CommandRunner,
    callbacks: &dyn UpdateCallbacks,
    config: &Config,
) -> UpdateResult {
    update_for_platform(runner, callbacks, config, Platform::detect())
}

/// Runs the whole update as if on `platform`.
pub fn update_for_platform(
    runner: &dyn CommandRunner,
    callbacks: &dyn UpdateCallbacks,
    config: &Config,
    platform: Option<Platform>,
) -> UpdateResult {
    let start = Instant::now();

    let outcome = match do_update(runner, callbacks, config, platform) {
        Ok(success) => UpdateOutcome::Success(success),
        Err(failure) => UpdateOutcome::Failed(failure),
    };

    let result = UpdateResult {
        outcome,
        duration: start.elapsed(),
    };
    callbacks.on_complete(&result);
    result
}

fn do_update(
    runner: &dyn CommandRunner,
    callbacks: &dyn UpdateCallbacks,
    config: &Config,
    platform: Option<Platform>,
) -> Result<UpdateSuccess, UpdateFailure> {
    let logger = config.command_logger();

    let step = UpdateStep::DetectingBranch;
    callbacks.on_step(&step);
    let branch = at_step(&step, detect_branch(runner, config))?;

    let ctx = UpdateContext::new(branch, platform, &config.lib_dir);
    callbacks.on_context(&ctx);

    let mut updated_libraries = Vec::new();
    if !config.skip_libraries {
        if let Some(platform) = pending_library_checkout(&ctx) {
            let step = UpdateStep::CheckingOutLibraries { platform };
            callbacks.on_step(&step);
            at_step(&step, checkout_libraries(runner, config, &ctx, platform, logger))?;
        }

        let step = UpdateStep::UpdatingLibraries;
        callbacks.on_step(&step);
        updated_libraries = at_step(&step, update_libraries(runner, config, &ctx, logger))?;
    }

    let step = UpdateStep::UpdatingRepository;
    callbacks.on_step(&step);
    at_step(&step, update_repository(runner, config, logger))?;

    if !config.skip_submodules {
        let step = UpdateStep::UpdatingSubmodules;
        callbacks.on_step(&step);
        at_step(&step, update_submodules(runner, config, logger))?;

        if !ctx.branch.is_release() {
            let step = UpdateStep::TrackingSubmodules;
            callbacks.on_step(&step);
            at_step(&step, track_submodules(runner, config, logger))?;
        }
    }

    callbacks.on_step(&UpdateStep::Completed);

    Ok(UpdateSuccess {
        release_version: ctx.branch.release_version,
        platform: ctx.platform,
        updated_libraries,
    })
}
