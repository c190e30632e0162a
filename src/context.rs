//! Branch, platform and remote location resolution.
//!
//! Everything here is derived once at startup and then passed, unchanged, to
//! each update step.

use crate::constants::{DARWIN_LIB_DIR, SVN_BASE_URL, SVN_TRUNK, WINDOWS_LIB_DIR};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static RELEASE_BRANCH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^blender-v(.*)-release$").expect("valid release pattern"));

/// Extracts `<V>` from a `blender-v<V>-release` branch name.
/// An empty `<V>` is not a release.
#[must_use]
pub fn parse_release_version(branch: &str) -> Option<String> {
    RELEASE_BRANCH
        .captures(branch)
        .and_then(|caps| caps.get(1))
        .map(|version| version.as_str())
        .filter(|version| !version.is_empty())
        .map(str::to_string)
}

/// The current git branch and the release version it encodes, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchContext {
    pub branch: String,
    pub release_version: Option<String>,
}

impl BranchContext {
    pub fn new(branch: &str) -> Self {
        Self {
            branch: branch.to_string(),
            release_version: parse_release_version(branch),
        }
    }

    #[must_use]
    pub fn is_release(&self) -> bool {
        self.release_version.is_some()
    }
}

/// Hosts for which precompiled libraries are published.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Darwin,
    Windows,
}

impl Platform {
    /// Maps a `std::env::consts::OS` value to a platform.
    /// Linux and everything else build against system libraries.
    #[must_use]
    pub fn from_os(os: &str) -> Option<Self> {
        match os {
            "macos" => Some(Platform::Darwin),
            "windows" => Some(Platform::Windows),
            _ => None,
        }
    }

    #[must_use]
    pub fn detect() -> Option<Self> {
        Self::from_os(std::env::consts::OS)
    }

    /// Name of this platform's directory in the library tree.
    #[must_use]
    pub fn lib_dir_name(self) -> &'static str {
        match self {
            Platform::Darwin => DARWIN_LIB_DIR,
            Platform::Windows => WINDOWS_LIB_DIR,
        }
    }
}

/// Subversion location of the library tree for the given release, ending in `/lib/`.
#[must_use]
pub fn svn_lib_url(release_version: Option<&str>) -> String {
    let svn_branch = match release_version {
        Some(version) => format!("tags/blender-{}-release", version),
        None => SVN_TRUNK.to_string(),
    };
    format!("{}{}/lib/", SVN_BASE_URL, svn_branch)
}

/// Immutable inputs shared by all update steps.
#[derive(Debug, Clone)]
pub struct UpdateContext {
    pub branch: BranchContext,
    pub platform: Option<Platform>,
    pub lib_dir: PathBuf,
    pub svn_url: String,
}

impl UpdateContext {
    pub fn new(branch: BranchContext, platform: Option<Platform>, lib_dir: &Path) -> Self {
        let svn_url = svn_lib_url(branch.release_version.as_deref());
        Self {
            branch,
            platform,
            lib_dir: lib_dir.to_path_buf(),
            svn_url,
        }
    }

    /// Remote location for one directory of the library tree.
    #[must_use]
    pub fn remote_for(&self, dir_name: &str) -> String {
        format!("{}{}", self.svn_url, dir_name)
    }

    /// Local library directory for `platform`.
    #[must_use]
    pub fn lib_dir_for(&self, platform: Platform) -> PathBuf {
        self.lib_dir.join(platform.lib_dir_name())
    }

    #[must_use]
    pub fn release_version(&self) -> Option<&str> {
        self.branch.release_version.as_deref()
    }
}
