use crate::traits::CacheStore;
use crate::types::{AggregatorError, CacheSnapshot, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

/// A snapshot is fresh while it is younger than `ttl_seconds`.
pub fn is_fresh(snapshot: &CacheSnapshot, now: i64, ttl_seconds: i64) -> bool {
    now - snapshot.timestamp < ttl_seconds
}

/// JSON file holding `{ "timestamp": ..., "articles": [...] }`.
pub struct FileCacheStore {
    path: PathBuf,
}

impl FileCacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn corrupt(&self, reason: impl ToString) -> AggregatorError {
        AggregatorError::CacheCorrupt {
            path: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    async fn remove_quietly(&self) {
        if let Err(e) = tokio::fs::remove_file(&self.path).await {
            if e.kind() != ErrorKind::NotFound {
                warn!("Failed to remove cache file {}: {}", self.path.display(), e);
            }
        }
    }

    async fn write_and_verify(&self, snapshot: &CacheSnapshot) -> Result<()> {
        let bytes = serde_json::to_vec(snapshot)?;
        tokio::fs::write(&self.path, &bytes).await?;

        let written = tokio::fs::read(&self.path).await?;
        serde_json::from_slice::<CacheSnapshot>(&written).map_err(|e| self.corrupt(e))?;
        Ok(())
    }
}

#[async_trait]
impl CacheStore for FileCacheStore {
    async fn read(&self) -> Result<Option<CacheSnapshot>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No cache file at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(self.corrupt(e)),
        };

        let snapshot: CacheSnapshot = serde_json::from_slice(&bytes).map_err(|e| self.corrupt(e))?;
        debug!(
            "Read cache snapshot from {} ({} articles)",
            self.path.display(),
            snapshot.articles.len()
        );
        Ok(Some(snapshot))
    }

    async fn write(&self, snapshot: &CacheSnapshot) -> Result<()> {
        match self.write_and_verify(snapshot).await {
            Ok(()) => {
                info!(
                    "Cached {} articles to {}",
                    snapshot.articles.len(),
                    self.path.display()
                );
                Ok(())
            }
            Err(e) => {
                error!("Failed to write cache {}: {}", self.path.display(), e);
                self.remove_quietly().await;
                Err(e)
            }
        }
    }

    async fn invalidate(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                info!("Removed cache file {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AggregatorError::Io(e)),
        }
    }

    fn path(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

/// In-process store, used by tests and by callers that do not want a file.
#[derive(Default)]
pub struct MemoryCacheStore {
    slot: RwLock<Option<CacheSnapshot>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: CacheSnapshot) -> Self {
        Self {
            slot: RwLock::new(Some(snapshot)),
        }
    }

    /// Copy of the stored snapshot.
    pub async fn snapshot(&self) -> Option<CacheSnapshot> {
        self.slot.read().await.clone()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn read(&self) -> Result<Option<CacheSnapshot>> {
        Ok(self.slot.read().await.clone())
    }

    async fn write(&self, snapshot: &CacheSnapshot) -> Result<()> {
        *self.slot.write().await = Some(snapshot.clone());
        Ok(())
    }

    async fn invalidate(&self) -> Result<()> {
        *self.slot.write().await = None;
        Ok(())
    }
}
