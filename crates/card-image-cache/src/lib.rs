//! Count-bounded on-disk image cache
//!
//! Stores one image file per card identity and keeps at most `capacity`
//! files in the cache directory. When an insertion would overflow, the files
//! with the oldest modification time are evicted first. File mtimes are the
//! only recency signal; a cache hit does not touch the file.

mod cache;
mod error;
mod types;

pub use cache::CardImageCache;
pub use error::{CacheError, Result};
pub use types::{CacheEntry, CacheSummary, ResolvedArtifact};
