use crate::types::{CacheSnapshot, Result, SourceDescriptor, SourceFetchResult};
use async_trait::async_trait;
use std::path::Path;

/// Trait for pulling articles from a declared source (RSS feed, API, ...)
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Fetch and normalize the articles of one source.
    ///
    /// Never fails: unreachable or unparsable sources come back as an
    /// unsuccessful result with zero articles.
    async fn fetch(&self, descriptor: &SourceDescriptor) -> SourceFetchResult;
}

/// Storage for the single aggregated snapshot.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// `Ok(None)` when nothing is stored; `Err` when stored data is unreadable.
    async fn read(&self) -> Result<Option<CacheSnapshot>>;

    /// Replace the stored snapshot. A failed write leaves nothing behind.
    async fn write(&self, snapshot: &CacheSnapshot) -> Result<()>;

    /// Remove the stored snapshot, succeeding when it is already gone.
    async fn invalidate(&self) -> Result<()>;

    /// Backing file, for stores that have one.
    fn path(&self) -> Option<&Path> {
        None
    }
}
