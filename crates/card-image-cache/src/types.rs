//! Cache types

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Outcome of resolving a card image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedArtifact {
    /// Image is on disk at this path
    Cached(PathBuf),
    /// No image available; callers show their default icon
    Fallback,
}

impl ResolvedArtifact {
    pub fn cached_path(&self) -> Option<&Path> {
        match self {
            ResolvedArtifact::Cached(path) => Some(path),
            ResolvedArtifact::Fallback => None,
        }
    }

    /// Path to display, substituting `default` for a fallback
    pub fn path_or<'a>(&'a self, default: &'a Path) -> &'a Path {
        self.cached_path().unwrap_or(default)
    }
}

/// A file currently held in the cache directory
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub path: PathBuf,
    pub size: u64,
    pub modified: DateTime<Utc>,
}

/// Snapshot of the cache directory for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSummary {
    pub count: usize,
    pub directory: PathBuf,
}
