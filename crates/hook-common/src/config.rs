//! Hook configuration.
//!
//! Built once at startup and passed to the runners, so nothing reads global
//! state while a hook is running.

use crate::debug::{DEBUG_ENV, LOG_PATH_ENV};
use camino::Utf8PathBuf;

/// ktlint release used when neither the command line nor the environment
/// asks for another one.
pub const DEFAULT_KTLINT_VERSION: &str = "1.5.0";

/// Overrides the default ktlint version.
pub const KTLINT_VERSION_ENV: &str = "FORMAT_HOOKS_KTLINT_VERSION";

/// Overrides the artifact cache directory.
pub const CACHE_DIR_ENV: &str = "FORMAT_HOOKS_CACHE_DIR";

const CACHE_DIR_NAME: &str = "format-hooks";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookConfig {
    /// Default ktlint release
    pub ktlint_version: String,
    /// Where downloaded formatter artifacts are kept
    pub cache_dir: Utf8PathBuf,
    /// JSONL debug log, `None` when debug logging is off
    pub debug_log: Option<Utf8PathBuf>,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            ktlint_version: DEFAULT_KTLINT_VERSION.to_string(),
            cache_dir: default_cache_dir(),
            debug_log: None,
        }
    }
}

impl HookConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides taken from `lookup`. Empty values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let cache_dir = get(CACHE_DIR_ENV)
            .map(Utf8PathBuf::from)
            .unwrap_or(defaults.cache_dir);

        let debug_log = lookup(DEBUG_ENV).map(|_| {
            get(LOG_PATH_ENV)
                .map(Utf8PathBuf::from)
                .unwrap_or_else(|| cache_dir.join("logs").join("hook-debug.jsonl"))
        });

        Self {
            ktlint_version: get(KTLINT_VERSION_ENV).unwrap_or(defaults.ktlint_version),
            cache_dir,
            debug_log,
        }
    }

    /// Use `version` when given, otherwise the configured default.
    pub fn ktlint_version_or_default(&self, version: Option<&str>) -> String {
        version
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(&self.ktlint_version)
            .to_string()
    }
}

/// `~/.cache/format-hooks` on Linux, the platform equivalent elsewhere.
fn default_cache_dir() -> Utf8PathBuf {
    dirs::cache_dir()
        .and_then(|dir| Utf8PathBuf::from_path_buf(dir).ok())
        .map(|dir| dir.join(CACHE_DIR_NAME))
        .unwrap_or_else(|| Utf8PathBuf::from(".cache").join(CACHE_DIR_NAME))
}
