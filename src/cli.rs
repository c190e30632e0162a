//! Command-line interface.

use crate::config::{Config, Verbosity};
use crate::constants::{GIT_COMMAND, LIB_DIR, SVN_COMMAND};
use clap::Parser;
use std::path::PathBuf;

/// Update a Blender checkout, its submodules and the precompiled libraries.
#[derive(Debug, Parser)]
#[command(name = "make-update", version, about)]
pub struct Cli {
    /// Only print errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print each step as it runs
    #[arg(short, long)]
    pub verbose: bool,

    /// Skip the precompiled library checkout and update
    #[arg(long)]
    pub no_libraries: bool,

    /// Skip updating git submodules
    #[arg(long)]
    pub no_submodules: bool,

    /// Git executable to use
    #[arg(long, value_name = "PATH", default_value = GIT_COMMAND)]
    pub git_command: String,

    /// Subversion executable to use
    #[arg(long, value_name = "PATH", default_value = SVN_COMMAND)]
    pub svn_command: String,
}

impl Cli {
    fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else if self.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }

    #[must_use]
    pub fn config(&self) -> Config {
        Config {
            verbosity: self.verbosity(),
            lib_dir: PathBuf::from(LIB_DIR),
            git_command: self.git_command.clone(),
            svn_command: self.svn_command.clone(),
            skip_libraries: self.no_libraries,
            skip_submodules: self.no_submodules,
        }
    }
}
