//! Configuration types for CLI verbosity and options.

use crate::constants::{GIT_COMMAND, LIB_DIR, SVN_COMMAND};
use crate::vcs::{self, CommandLogger};
use std::path::PathBuf;

/// Runtime configuration derived from CLI arguments.
#[derive(Debug, Clone)]
pub struct Config {
    /// Controls the verbosity level of CLI output.
    pub verbosity: Verbosity,
    /// Root of the precompiled library tree.
    pub lib_dir: PathBuf,
    pub git_command: String,
    pub svn_command: String,
    pub skip_libraries: bool,
    pub skip_submodules: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::default(),
            lib_dir: PathBuf::from(LIB_DIR),
            git_command: GIT_COMMAND.to_string(),
            svn_command: SVN_COMMAND.to_string(),
            skip_libraries: false,
            skip_submodules: false,
        }
    }
}

impl Config {
    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.verbosity == Verbosity::Quiet
    }

    #[must_use]
    pub fn is_verbose(&self) -> bool {
        self.verbosity == Verbosity::Verbose
    }

    /// Returns the logger that echoes commands before they run.
    ///
    /// Quiet mode silences the echo; the commands' own output still reaches
    /// the terminal since children inherit stdio.
    #[must_use]
    pub fn command_logger(&self) -> CommandLogger {
        if self.is_quiet() {
            vcs::no_op_logger
        } else {
            vcs::echo_logger
        }
    }
}

/// Verbosity level for CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}
