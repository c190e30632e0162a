//! Stage banners, colored status lines and the final summary.

use crate::config::Config;
use crate::context::UpdateContext;
use crate::error::UpdateError;
use crate::constants::SVN_TRUNK;
use crate::update::{UpdateCallbacks, UpdateOutcome, UpdateResult, UpdateStep, UpdateSuccess};
use colored::Colorize;
use std::error::Error;
use std::path::Path;
use std::time::Duration;

/// No-op callbacks for when progress tracking is not needed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoOpCallbacks;

impl UpdateCallbacks for NoOpCallbacks {
    fn on_step(&self, _step: &UpdateStep) {}
}

/// Callbacks used by the binary: stage banners on stdout, step detail in
/// verbose mode.
pub struct ConsoleCallbacks {
    config: Config,
}

impl ConsoleCallbacks {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl UpdateCallbacks for ConsoleCallbacks {
    fn on_context(&self, ctx: &UpdateContext) {
        if self.config.is_verbose() {
            eprintln!(
                "  {}",
                format!("On branch {}", ctx.branch.branch).dimmed()
            );
        }
        if let Some(version) = ctx.release_version() {
            print_release_version(&self.config, version);
        }
    }

    fn on_step(&self, step: &UpdateStep) {
        if let Some(title) = stage_title(step) {
            print_stage(&self.config, title);
        }
        print_step(&self.config, step);
    }
}

/// Banner shown before a group of commands, if the step opens one.
fn stage_title(step: &UpdateStep) -> Option<&'static str> {
    match step {
        UpdateStep::CheckingOutLibraries { .. } => Some("Checking out Precompiled Libraries"),
        UpdateStep::UpdatingLibraries => Some("Updating Precompiled Libraries and Tests"),
        UpdateStep::UpdatingRepository => Some("Updating Blender Git Repository and Submodules"),
        _ => None,
    }
}

pub fn print_stage(config: &Config, title: &str) {
    if config.is_quiet() {
        return;
    }
    println!("\n{}\n", title.cyan().bold());
}

/// Prints a step progress message in verbose mode.
pub fn print_step(config: &Config, step: &UpdateStep) {
    if !config.is_verbose() {
        return;
    }
    eprintln!("  {}...", step.to_string().dimmed());
}

pub fn print_release_version(config: &Config, version: &str) {
    if config.is_quiet() {
        return;
    }
    println!("{}", release_notice(version).yellow());
}

fn release_notice(version: &str) -> String {
    format!("Using Release Blender v{}", version)
}

pub fn print_working_dir(path: &Path, config: &Config) {
    if !config.is_verbose() {
        return;
    }
    println!(
        "{} {}",
        "Working in:".cyan(),
        path.display().to_string().white().bold()
    )
}

/// Prints the outcome. Failures always reach stderr, even in quiet mode.
pub fn print_summary(result: &UpdateResult, config: &Config) {
    match &result.outcome {
        UpdateOutcome::Success(success) => {
            if config.is_quiet() {
                return;
            }
            println!(
                "\n{} {}",
                "✓".green(),
                format_success(success, result.duration)
            );
        }
        UpdateOutcome::Failed(failure) => {
            eprintln!("{}", format_failure(&failure.step, &failure.error).red());
        }
    }
}

/// `Updated <trunk|Blender vX> [for <platform>] in <secs>[ (<libraries>)]`
fn format_success(success: &UpdateSuccess, duration: Duration) -> String {
    let mut message = match &success.release_version {
        Some(version) => format!("Updated Blender v{}", version),
        None => format!("Updated {}", SVN_TRUNK),
    };
    if let Some(platform) = success.platform {
        message.push_str(&format!(" for {}", platform.lib_dir_name()));
    }
    message.push_str(&format!(" in {}", format_duration(duration)));
    if !success.updated_libraries.is_empty() {
        message.push_str(&format!(" ({})", success.updated_libraries.join(", ")));
    }
    message
}

fn format_failure(step: &UpdateStep, error: &UpdateError) -> String {
    let mut message = format!("✗ {} failed: {}", step, error);
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(&format!(": {}", cause));
        source = cause.source();
    }
    message
}

fn format_duration(duration: Duration) -> String {
    format!("{:.2}s", duration.as_secs_f32())
}
