//! Blender checkout updater library.
//!
//! This crate keeps a development checkout in sync by:
//! - Detecting the current branch and whether it is a release branch
//! - Checking out precompiled libraries for the host platform from svn
//! - Switching and updating every library working copy to trunk or the release tag
//! - Pulling the git repository with rebase and updating its submodules
//! - Moving submodules to their mainline branch outside of release branches

pub mod cli;
pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod output;
pub mod update;
pub mod vcs;
