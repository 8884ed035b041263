//! File-based card image cache with oldest-mtime eviction

use crate::error::{CacheError, Result};
use crate::types::{CacheEntry, CacheSummary, ResolvedArtifact};
use chrono::{DateTime, Utc};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, UNIX_EPOCH};
use tokio::fs;
use tracing::{debug, info, warn};
use url::Url;

/// An image cache holding at most `capacity` files in one directory
pub struct CardImageCache {
    http: reqwest::Client,
    /// Directory where cached images are stored
    cache_dir: PathBuf,
    /// Maximum number of cached files
    capacity: usize,
}

impl CardImageCache {
    /// Extension of every cached file
    pub const FILE_EXTENSION: &'static str = "png";

    /// Create a new cache rooted at `cache_dir`
    ///
    /// The directory is created lazily, on the first insertion or
    /// [`describe`](Self::describe).
    pub fn new(cache_dir: PathBuf, capacity: usize) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            cache_dir,
            capacity,
        }
    }

    /// Use a preconfigured HTTP client for image downloads
    pub fn with_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Deterministic file path for an identity
    pub fn artifact_path(&self, identity: &str) -> Result<PathBuf> {
        if !is_plain_file_name(identity) {
            return Err(CacheError::InvalidKey(identity.to_string()));
        }
        Ok(self
            .cache_dir
            .join(format!("{}.{}", identity, Self::FILE_EXTENSION)))
    }

    /// Resolve the local image for a card, downloading it on a miss
    ///
    /// Never fails: any problem is logged and reported as
    /// [`ResolvedArtifact::Fallback`].
    pub async fn resolve(&self, identity: &str, image_ref: Option<&str>) -> ResolvedArtifact {
        match self.try_resolve(identity, image_ref).await {
            Ok(artifact) => artifact,
            Err(e) => {
                warn!(identity, error = %e, "Failed to cache card image");
                ResolvedArtifact::Fallback
            }
        }
    }

    /// Resolve the local image for a card, surfacing the underlying error
    pub async fn try_resolve(
        &self,
        identity: &str,
        image_ref: Option<&str>,
    ) -> Result<ResolvedArtifact> {
        let path = self.artifact_path(identity)?;

        // Hits are not recency touches; the mtime stays at write time
        if matches!(fs::try_exists(&path).await, Ok(true)) {
            debug!(identity, "Cache hit");
            return Ok(ResolvedArtifact::Cached(path));
        }

        let Some(image_ref) = image_ref else {
            debug!(identity, "Card has no image");
            return Ok(ResolvedArtifact::Fallback);
        };

        if self.capacity == 0 {
            debug!(identity, "Image cache disabled");
            return Ok(ResolvedArtifact::Fallback);
        }

        let url = parse_image_url(image_ref)?;

        fs::create_dir_all(&self.cache_dir).await?;
        self.evict_if_needed().await?;

        let data = self.fetch(url).await?;

        if let Err(e) = fs::write(&path, &data).await {
            // Do not leave a truncated image behind to be served as a hit
            let _ = fs::remove_file(&path).await;
            return Err(e.into());
        }

        debug!(identity, size = data.len(), "Cached card image");
        Ok(ResolvedArtifact::Cached(path))
    }

    /// Evict the oldest files so one more fits under the capacity
    ///
    /// Returns how many files were removed. Individual deletion failures are
    /// logged and skipped.
    async fn evict_if_needed(&self) -> Result<usize> {
        let entries = self.entries().await?;

        if entries.len() < self.capacity {
            return Ok(0);
        }

        let remove_count = entries.len() - self.capacity + 1;
        let removed = remove_entries(&entries[..remove_count]).await;

        info!(
            removed,
            requested = remove_count,
            capacity = self.capacity,
            "Evicted oldest cached images"
        );

        Ok(removed)
    }

    async fn fetch(&self, url: Url) -> Result<Vec<u8>> {
        debug!(url = %url, "Fetching card image");

        let response = self.http.get(url.clone()).send().await?;

        if !response.status().is_success() {
            warn!(status = %response.status(), url = %url, "Failed to fetch card image");
            return Err(CacheError::Status(response.status().as_u16()));
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// List cached files, oldest modification time first
    ///
    /// Files whose mtime cannot be read sort as oldest. A missing directory
    /// lists as empty.
    pub async fn entries(&self) -> Result<Vec<CacheEntry>> {
        let mut dir = match fs::read_dir(&self.cache_dir).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut entries = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            let metadata = match entry.metadata().await {
                Ok(metadata) => metadata,
                Err(e) => {
                    warn!(path = ?entry.path(), error = %e, "Failed to stat cached file");
                    continue;
                }
            };
            if !metadata.is_file() {
                continue;
            }

            let modified: DateTime<Utc> = metadata
                .modified()
                .unwrap_or(UNIX_EPOCH)
                .into();

            entries.push(CacheEntry {
                path: entry.path(),
                size: metadata.len(),
                modified,
            });
        }

        entries.sort_by(|a, b| a.modified.cmp(&b.modified).then_with(|| a.path.cmp(&b.path)));
        Ok(entries)
    }

    /// Count the cached files, creating the directory if needed
    pub async fn describe(&self) -> Result<CacheSummary> {
        fs::create_dir_all(&self.cache_dir).await?;
        let count = self.entries().await?.len();

        Ok(CacheSummary {
            count,
            directory: self.cache_dir.clone(),
        })
    }

    /// Remove the whole cache directory; a missing directory is not an error
    pub async fn delete_all(&self) -> Result<()> {
        match fs::remove_dir_all(&self.cache_dir).await {
            Ok(()) => {
                info!(cache_dir = ?self.cache_dir, "Deleted image cache");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(cache_dir = ?self.cache_dir, "Image cache already absent");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Delete each entry, logging and skipping the ones that fail
async fn remove_entries(entries: &[CacheEntry]) -> usize {
    let mut removed = 0;

    for entry in entries {
        match fs::remove_file(&entry.path).await {
            Ok(()) => {
                removed += 1;
                debug!(path = ?entry.path, modified = %entry.modified, "Evicted cached image");
            }
            Err(e) => {
                warn!(path = ?entry.path, error = %e, "Failed to remove cached image");
            }
        }
    }

    removed
}

/// A key must name a single file directly inside the cache directory
fn is_plain_file_name(key: &str) -> bool {
    !key.is_empty()
        && key != "."
        && key != ".."
        && !key
            .chars()
            .any(|c| matches!(c, '/' | '\\' | ':' | '\0') || c.is_control())
}

fn parse_image_url(image_ref: &str) -> Result<Url> {
    let url = Url::parse(image_ref).map_err(|e| CacheError::InvalidUrl(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(CacheError::InvalidUrl(format!(
            "unsupported scheme {}",
            scheme
        ))),
    }
}
