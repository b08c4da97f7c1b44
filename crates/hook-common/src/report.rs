//! Check results and exit status.

use std::collections::BTreeSet;
use std::fmt;
use std::process::ExitCode;

/// Outcome of a hook run, mapped onto the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookStatus {
    /// Every file conforms (exit 0)
    Clean,
    /// Some file did not conform, or the tool could not run (exit 1)
    Unformatted,
}

impl HookStatus {
    pub fn code(self) -> u8 {
        match self {
            Self::Clean => 0,
            Self::Unformatted => 1,
        }
    }

    /// Apply `--fail-never`: when set, the hook always succeeds.
    pub fn overridden(self, fail_never: bool) -> Self {
        if fail_never { Self::Clean } else { self }
    }
}

impl From<HookStatus> for ExitCode {
    fn from(status: HookStatus) -> Self {
        ExitCode::from(status.code())
    }
}

/// Files a formatter reported as not conforming to its style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// Tool name used in the summary (e.g., "ktlint", "gofmt")
    pub tool: String,
    /// Whether the files were rewritten in place
    pub autofix: bool,
    /// Offending paths, deduplicated and sorted
    pub files: BTreeSet<String>,
}

impl CheckReport {
    pub fn new(tool: impl Into<String>, autofix: bool) -> Self {
        Self {
            tool: tool.into(),
            autofix,
            files: BTreeSet::new(),
        }
    }

    pub fn with_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files.extend(files.into_iter().map(Into::into));
        self
    }

    pub fn is_clean(&self) -> bool {
        self.files.is_empty()
    }

    pub fn status(&self) -> HookStatus {
        if self.is_clean() {
            HookStatus::Clean
        } else {
            HookStatus::Unformatted
        }
    }

    /// Human-readable summary, or `None` when nothing was reported.
    pub fn summary(&self) -> Option<String> {
        if self.is_clean() {
            return None;
        }

        let headline = if self.autofix {
            format!("The following files have been fixed by {}", self.tool)
        } else {
            "The following files are not properly formatted".to_string()
        };

        Some(format!("{}: {}", headline, self.file_list()))
    }

    /// Comma-separated, sorted file list.
    pub fn file_list(&self) -> String {
        self.files.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.summary() {
            Some(summary) => f.write_str(&summary),
            None => Ok(()),
        }
    }
}

/// Paths from diagnostic lines like `src/Foo.kt:1:1: Unexpected blank line`.
///
/// Each non-blank line contributes the text before its first colon.
pub fn parse_diagnostic_paths(output: &str) -> BTreeSet<String> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split_once(':').map_or(line, |(path, _)| path))
        .map(|path| path.trim().to_string())
        .collect()
}

/// Paths from tools that print one file per line.
pub fn parse_listed_paths(output: &str) -> BTreeSet<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
