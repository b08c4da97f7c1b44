//! On-disk cache of downloaded formatter artifacts.

use crate::download::Downloader;
use crate::error::HookError;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use tempfile::NamedTempFile;

/// Artifact cache rooted at a directory. Artifacts are keyed by file name,
/// which embeds the tool version.
#[derive(Debug, Clone)]
pub struct ArtifactCache {
    /// Base directory for artifacts
    dir: Utf8PathBuf,
}

/// A cached artifact ready to be executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: Utf8PathBuf,
    /// Whether this call had to download it
    pub downloaded: bool,
}

impl ArtifactCache {
    pub fn new(dir: impl Into<Utf8PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    /// Get the path an artifact is (or would be) stored at.
    pub fn artifact_path(&self, name: &str) -> Utf8PathBuf {
        self.dir.join(name)
    }

    /// Check if an artifact is already cached.
    pub fn contains(&self, name: &str) -> bool {
        self.artifact_path(name).is_file()
    }

    /// Return the cached artifact, downloading it from `url` first if needed.
    ///
    /// Concurrent hook runs serialize on a lock file next to the artifact.
    /// The download lands in a temporary file that is renamed into place, so
    /// a failed download never leaves a truncated artifact behind.
    pub fn fetch(
        &self,
        name: &str,
        url: &str,
        version: &str,
        downloader: &dyn Downloader,
    ) -> Result<Artifact> {
        let path = self.artifact_path(name);
        if path.is_file() {
            return Ok(Artifact {
                path,
                downloaded: false,
            });
        }

        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create cache directory: {}", self.dir))?;

        let lock = self.lock(name)?;

        // Another hook run may have finished the download while we waited.
        if path.is_file() {
            drop(lock);
            return Ok(Artifact {
                path,
                downloaded: false,
            });
        }

        let mut tmp = NamedTempFile::new_in(&self.dir)
            .with_context(|| format!("Failed to create temporary file in: {}", self.dir))?;

        downloader
            .download(url, tmp.as_file_mut())
            .and_then(|_| tmp.as_file_mut().flush().map_err(Into::into))
            .map_err(|source| HookError::DownloadFailed {
                url: url.to_string(),
                version: version.to_string(),
                source,
            })?;

        tmp.persist(&path)
            .with_context(|| format!("Failed to write artifact: {}", path))?;

        drop(lock);

        Ok(Artifact {
            path,
            downloaded: true,
        })
    }

    fn lock(&self, name: &str) -> Result<File> {
        let lock_path = self.dir.join(format!("{}.lock", name));
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .with_context(|| format!("Failed to open lock file: {}", lock_path))?;
        file.lock_exclusive()
            .with_context(|| format!("Failed to lock: {}", lock_path))?;
        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tempfile::tempdir;

    struct FakeDownloader {
        body: Option<&'static [u8]>,
        calls: Cell<usize>,
    }

    impl FakeDownloader {
        fn serving(body: &'static [u8]) -> Self {
            Self {
                body: Some(body),
                calls: Cell::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                body: None,
                calls: Cell::new(0),
            }
        }
    }

    impl Downloader for FakeDownloader {
        fn download(&self, _url: &str, dest: &mut dyn Write) -> Result<u64> {
            self.calls.set(self.calls.get() + 1);
            match self.body {
                Some(body) => {
                    dest.write_all(body)?;
                    Ok(body.len() as u64)
                }
                None => anyhow::bail!("connection refused"),
            }
        }
    }

    fn cache_in(dir: &tempfile::TempDir) -> ArtifactCache {
        ArtifactCache::new(Utf8PathBuf::from_path_buf(dir.path().join("cache")).unwrap())
    }

    #[test]
    fn test_fetch_downloads_once() {
        let dir = tempdir().unwrap();
        let cache = cache_in(&dir);
        let downloader = FakeDownloader::serving(b"jar-bytes");

        let first = cache
            .fetch("ktlint1.0.0.jar", "https://example.invalid/1.0.0", "1.0.0", &downloader)
            .unwrap();
        assert!(first.downloaded);
        assert_eq!(fs::read(&first.path).unwrap(), b"jar-bytes");

        let second = cache
            .fetch("ktlint1.0.0.jar", "https://example.invalid/1.0.0", "1.0.0", &downloader)
            .unwrap();
        assert!(!second.downloaded);
        assert_eq!(second.path, first.path);
        assert_eq!(downloader.calls.get(), 1);
    }

    #[test]
    fn test_existing_artifact_is_not_downloaded() {
        let dir = tempdir().unwrap();
        let cache = cache_in(&dir);
        fs::create_dir_all(cache.dir()).unwrap();
        fs::write(cache.artifact_path("ktlint2.0.0.jar"), b"cached").unwrap();
        assert!(cache.contains("ktlint2.0.0.jar"));

        let downloader = FakeDownloader::failing();
        let artifact = cache
            .fetch("ktlint2.0.0.jar", "https://example.invalid/2.0.0", "2.0.0", &downloader)
            .unwrap();
        assert!(!artifact.downloaded);
        assert_eq!(downloader.calls.get(), 0);
    }

    #[test]
    fn test_failed_download_leaves_nothing_behind() {
        let dir = tempdir().unwrap();
        let cache = cache_in(&dir);
        let downloader = FakeDownloader::failing();

        let err = cache
            .fetch("ktlint9.9.9.jar", "https://example.invalid/9.9.9", "9.9.9", &downloader)
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("https://example.invalid/9.9.9"));
        assert!(message.contains("9.9.9"));
        assert!(matches!(
            err.downcast_ref::<HookError>(),
            Some(HookError::DownloadFailed { .. })
        ));

        assert!(!cache.contains("ktlint9.9.9.jar"));
        let leftovers: Vec<_> = fs::read_dir(cache.dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .filter(|name| !name.ends_with(".lock"))
            .collect();
        assert!(leftovers.is_empty(), "unexpected files: {:?}", leftovers);
    }
}
