//! Application-wide constants.
//!
//! Fixed names and locations shared by the context resolution and update steps.

/// Root of the Blender Subversion repository holding precompiled libraries.
pub const SVN_BASE_URL: &str = "https://svn.blender.org/svnroot/bf-blender/";

/// Subversion path used when the checkout is not on a release branch.
pub const SVN_TRUNK: &str = "trunk";

/// Library tree location, relative to the git working copy.
pub const LIB_DIR: &str = "../lib";

/// Subversion metadata directory name.
pub const SVN_DIR: &str = ".svn";

/// Branch that submodules track when not building a release.
pub const MAINLINE_BRANCH: &str = "master";

/// Remote that submodules pull their mainline from.
pub const MAINLINE_REMOTE: &str = "origin";

/// Library directory names for platforms that ship precompiled libraries.
pub const DARWIN_LIB_DIR: &str = "darwin";
pub const WINDOWS_LIB_DIR: &str = "win64_vc14";

/// Default executables for the two version-control tools.
pub const GIT_COMMAND: &str = "git";
pub const SVN_COMMAND: &str = "svn";

/// Exit code used when a failure has no child exit status of its own.
pub const GENERIC_FAILURE_CODE: i32 = 1;
