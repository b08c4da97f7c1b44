//! Runtime version parsing and comparison.

use crate::error::HookError;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

static NUMERIC_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*v?(\d+(?:\.\d+)*)").expect("valid version regex"));

static JAVA_VERSION_PROPERTY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*java\.version\s*=\s*(\S+)").expect("valid property regex"));

/// A dotted numeric version such as `17.0.2`.
///
/// Only the leading numeric components take part in comparisons, and
/// trailing zeros are insignificant: `16`, `16.0` and `16.0.0` are equal.
/// Vendor suffixes (`1.8.0_292`, `21-ea`, `17.0.2+8`) are kept for display.
#[derive(Debug, Clone)]
pub struct RuntimeVersion {
    raw: String,
    parts: Vec<u64>,
}

impl RuntimeVersion {
    /// Parse a version string, returning `None` if it has no numeric prefix.
    pub fn parse(raw: &str) -> Option<Self> {
        let captures = NUMERIC_PREFIX.captures(raw)?;
        let mut parts = captures[1]
            .split('.')
            .map(|p| p.parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .ok()?;

        while parts.len() > 1 && parts.last() == Some(&0) {
            parts.pop();
        }

        Some(Self {
            raw: raw.trim().to_string(),
            parts,
        })
    }

    /// Version made of a single major component, displayed as `{major}.0`.
    pub fn major(major: u64) -> Self {
        Self {
            raw: format!("{major}.0"),
            parts: vec![major],
        }
    }

    /// Extract `java.version` from `java -XshowSettings:properties -version`.
    pub fn from_java_properties(output: &str) -> Result<Self, HookError> {
        JAVA_VERSION_PROPERTY
            .captures(output)
            .and_then(|c| Self::parse(&c[1]))
            .ok_or_else(|| HookError::RuntimeVersionUnknown {
                output: output.trim().to_string(),
            })
    }
}

impl fmt::Display for RuntimeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl PartialEq for RuntimeVersion {
    fn eq(&self, other: &Self) -> bool {
        self.parts == other.parts
    }
}

impl Eq for RuntimeVersion {}

impl PartialOrd for RuntimeVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RuntimeVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.parts.cmp(&other.parts)
    }
}
