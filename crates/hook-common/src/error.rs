//! Fatal hook errors.
//!
//! Unformatted files are not errors; they are reported through
//! [`crate::report::HookStatus`]. Everything here aborts the hook.

use thiserror::Error;

/// Errors that stop a hook before it can give a verdict.
#[derive(Debug, Error)]
pub enum HookError {
    /// Required runtime is not on PATH.
    #[error("{program} is required to run this hook, but it was not found on PATH")]
    RuntimeMissing { program: String },

    /// Runtime is at or above the supported ceiling.
    #[error("Java version {found} is not supported, the maximum supported version is below {ceiling}")]
    RuntimeTooNew { found: String, ceiling: String },

    /// Runtime version output could not be parsed.
    #[error("Unable to determine the runtime version from:\n{output}")]
    RuntimeVersionUnknown { output: String },

    /// Artifact download failed; not retried.
    #[error(
        "Failed to download {url}. Probably the requested version, {version}, is not valid or you have some network issue."
    )]
    DownloadFailed {
        url: String,
        version: String,
        #[source]
        source: anyhow::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_message_names_url_and_version() {
        let err = HookError::DownloadFailed {
            url: "https://example.invalid/ktlint".to_string(),
            version: "0.0.0".to_string(),
            source: anyhow::anyhow!("404 Not Found"),
        };
        let message = err.to_string();
        assert!(message.contains("https://example.invalid/ktlint"));
        assert!(message.contains("0.0.0"));
    }

    #[test]
    fn test_too_new_message() {
        let err = HookError::RuntimeTooNew {
            found: "17.0.2".to_string(),
            ceiling: "16.0".to_string(),
        };
        assert!(err.to_string().contains("17.0.2"));
    }
}
