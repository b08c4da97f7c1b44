//! Artifact download.

use anyhow::{Context, Result};
use std::io::Write;
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Capability to fetch a remote artifact.
pub trait Downloader {
    /// Stream the body at `url` into `dest`, returning the number of bytes written.
    fn download(&self, url: &str, dest: &mut dyn Write) -> Result<u64>;
}

/// Blocking HTTP downloader. Makes a single attempt, no retries.
///
/// The client is only built when a download actually happens, so cache hits
/// never touch the network stack.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpDownloader;

impl HttpDownloader {
    fn client() -> Result<reqwest::blocking::Client> {
        reqwest::blocking::Client::builder()
            .user_agent(concat!("format-hooks/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(None::<Duration>)
            .build()
            .context("Failed to build HTTP client")
    }
}

impl Downloader for HttpDownloader {
    fn download(&self, url: &str, dest: &mut dyn Write) -> Result<u64> {
        let mut response = Self::client()?
            .get(url)
            .send()
            .with_context(|| format!("Request to {} failed", url))?
            .error_for_status()
            .with_context(|| format!("Server rejected request to {}", url))?;

        let written = response
            .copy_to(dest)
            .with_context(|| format!("Failed to read response body from {}", url))?;
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreachable_host_is_error() {
        let mut sink = Vec::new();
        let result = HttpDownloader.download("http://127.0.0.1:9/ktlint", &mut sink);
        assert!(result.is_err());
        assert!(sink.is_empty());
    }
}
