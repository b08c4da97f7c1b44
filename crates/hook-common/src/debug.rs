//! Debug logging for hooks.
//!
//! Logs hook decisions to a JSONL file. Disabled unless `FORMAT_HOOKS_DEBUG`
//! is set, and never allowed to fail a hook. The log location is resolved
//! once into [`HookConfig::debug_log`].

use crate::config::HookConfig;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;

/// Enables debug logging when set to any value.
pub const DEBUG_ENV: &str = "FORMAT_HOOKS_DEBUG";

/// Overrides the debug log location.
pub const LOG_PATH_ENV: &str = "FORMAT_HOOKS_LOG";

/// Debug log entry for hook execution
#[derive(Debug, Serialize)]
pub struct HookDebugLog {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Hook name (e.g., "pretty-format-kotlin")
    pub hook_name: String,
    /// Step being logged (e.g., "artifact", "check", "fix", "result")
    pub step: String,
    /// Outcome of the step
    pub decision: String,
    /// Reason for the decision
    pub reason: String,
    /// Files involved, if any
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,
    /// Additional context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl HookDebugLog {
    pub fn new(hook_name: &str, step: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            hook_name: hook_name.to_string(),
            step: step.to_string(),
            decision: String::new(),
            reason: String::new(),
            files: Vec::new(),
            context: None,
        }
    }

    pub fn with_decision(mut self, decision: &str, reason: &str) -> Self {
        self.decision = decision.to_string();
        self.reason = reason.to_string();
        self
    }

    pub fn with_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files = files.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_context(mut self, context: &str) -> Self {
        // Truncate to 200 chars to avoid huge logs
        self.context = Some(if context.chars().count() > 200 {
            format!("{}...", context.chars().take(200).collect::<String>())
        } else {
            context.to_string()
        });
        self
    }

    /// Write log entry to the configured debug log, if enabled.
    pub fn write(&self, config: &HookConfig) -> std::io::Result<()> {
        match &config.debug_log {
            Some(path) => self.write_to(path),
            None => Ok(()),
        }
    }

    /// Append this entry to `log_path` unconditionally.
    pub fn write_to(&self, log_path: &camino::Utf8Path) -> std::io::Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let json = serde_json::to_string(self).unwrap_or_default();
        writeln!(file, "{}", json)?;

        Ok(())
    }
}

/// Quick helper to log a hook decision
pub fn log_decision(config: &HookConfig, hook_name: &str, step: &str, decision: &str, reason: &str) {
    let log = HookDebugLog::new(hook_name, step).with_decision(decision, reason);
    let _ = log.write(config);
}
