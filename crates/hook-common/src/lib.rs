//! Common utilities for formatter pre-commit hooks.
//!
//! This crate provides shared functionality for all Rust-based hooks:
//! - Command-line input parsing
//! - Subprocess execution
//! - Formatter artifact download and caching
//! - Check reports and exit status
//! - Error handling
//! - Debug logging

pub mod cache;
pub mod config;
pub mod debug;
pub mod download;
pub mod error;
pub mod input;
pub mod report;
pub mod subprocess;
pub mod version;

pub use cache::{Artifact, ArtifactCache};
pub use config::HookConfig;
pub use debug::{HookDebugLog, log_decision};
pub use download::{Downloader, HttpDownloader};
pub use error::HookError;
pub use input::{CommonArgs, normalize_paths, shell_join};
pub use report::{CheckReport, HookStatus};
pub use subprocess::{CommandResult, CommandRunner, SystemRunner, run_command};
pub use version::RuntimeVersion;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::cache::{Artifact, ArtifactCache};
    pub use crate::config::HookConfig;
    pub use crate::debug::{HookDebugLog, log_decision};
    pub use crate::download::{Downloader, HttpDownloader};
    pub use crate::error::HookError;
    pub use crate::input::{CommonArgs, normalize_paths, shell_join};
    pub use crate::report::{CheckReport, HookStatus};
    pub use crate::subprocess::{CommandResult, CommandRunner, SystemRunner, run_command};
    pub use crate::version::RuntimeVersion;
    pub use anyhow::{Context, Result};
}
