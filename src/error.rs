//! Error taxonomy for an update run.
//!
//! The caller mostly cares whether the branch could not be determined or an
//! external command did not succeed. Each error maps to the process exit code
//! the binary should use.

use crate::constants::GENERIC_FAILURE_CODE;

#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    #[error("Failed to get Blender git branch")]
    BranchUnavailable(#[source] anyhow::Error),

    #[error("`{command}` exited with status {code}")]
    CommandFailed { command: String, code: i32 },

    #[error("Failed to run `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to read library directory {dir}")]
    LibraryScan {
        dir: String,
        #[source]
        source: std::io::Error,
    },
}

impl UpdateError {
    /// Exit code the process should terminate with for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            UpdateError::CommandFailed { code, .. } => *code,
            UpdateError::BranchUnavailable(_)
            | UpdateError::Spawn { .. }
            | UpdateError::LibraryScan { .. } => GENERIC_FAILURE_CODE,
        }
    }
}
