mod common;

use common::{articles, init_tracing, temp_cache_path, StubSource};
use news_aggregator::cache::is_fresh;
use news_aggregator::{
    AggregatorConfig, AggregatorError, CacheSnapshot, CacheStore, Category, FeedManager,
    FileCacheStore, MemoryCacheStore, NewsAggregator, Result, SourceDescriptor,
};
use std::sync::Arc;

#[test]
fn test_freshness_boundary() {
    let now = 1_700_000_000;
    assert!(is_fresh(&CacheSnapshot::new(now - 3599, Vec::new()), now, 3600));
    assert!(!is_fresh(&CacheSnapshot::new(now - 3600, Vec::new()), now, 3600));
    assert!(!is_fresh(&CacheSnapshot::new(now - 3601, Vec::new()), now, 3600));
}

#[tokio::test]
async fn test_memory_store_round_trip_and_invalidate() {
    let store = MemoryCacheStore::new();
    assert!(store.read().await.unwrap().is_none());

    store.write(&CacheSnapshot::new(5, Vec::new())).await.unwrap();
    assert_eq!(store.read().await.unwrap().map(|s| s.timestamp), Some(5));

    store.invalidate().await.unwrap();
    store.invalidate().await.unwrap();
    assert!(store.snapshot().await.is_none());
}

#[tokio::test]
async fn test_missing_file_is_a_miss() -> Result<()> {
    init_tracing();

    let store = FileCacheStore::new(temp_cache_path());
    assert!(store.read().await?.is_none());

    // Invalidating an absent file is fine
    store.invalidate().await?;
    Ok(())
}

#[tokio::test]
async fn test_write_then_read_back() -> Result<()> {
    init_tracing();

    let path = temp_cache_path();
    let store = FileCacheStore::new(&path);
    let snapshot = CacheSnapshot::new(1_700_000_000, articles("Newswire", Category::Sports, 2));

    store.write(&snapshot).await?;
    let raw: serde_json::Value = serde_json::from_slice(&std::fs::read(&path)?)?;
    assert_eq!(raw["timestamp"], 1_700_000_000);
    assert_eq!(raw["articles"][0]["category"], "sports");
    assert!(raw["articles"][0]["keywords"].is_array());

    assert_eq!(store.read().await?, Some(snapshot));

    store.invalidate().await?;
    assert!(!path.exists());
    Ok(())
}

#[tokio::test]
async fn test_corrupt_file_is_reported() -> Result<()> {
    init_tracing();

    let path = temp_cache_path();
    std::fs::write(&path, b"{\"timestamp\": 17, \"articles\": [")?;
    let store = FileCacheStore::new(&path);

    let result = store.read().await;
    assert!(matches!(result, Err(AggregatorError::CacheCorrupt { .. })));
    // Reading leaves the file for the caller to remove
    assert!(path.exists());

    store.invalidate().await?;
    Ok(())
}

#[tokio::test]
async fn test_failed_write_leaves_no_file() {
    init_tracing();

    let path = std::env::temp_dir()
        .join(format!("missing-dir-{}", uuid::Uuid::new_v4()))
        .join("cache.json");
    let store = FileCacheStore::new(&path);

    let result = store.write(&CacheSnapshot::new(1, Vec::new())).await;

    assert!(result.is_err());
    assert!(!path.exists());
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn test_failed_write_removes_previous_cache_entry() -> Result<()> {
    init_tracing();

    let path = temp_cache_path();
    let store = FileCacheStore::new(&path);
    store.write(&CacheSnapshot::new(1, articles("Newswire", Category::General, 2))).await?;
    assert_eq!(store.read().await?.map(|s| s.timestamp), Some(1));

    // Swap the entry for a link to a device that rejects every write
    std::fs::remove_file(&path)?;
    std::os::unix::fs::symlink("/dev/full", &path)?;

    let result = store.write(&CacheSnapshot::new(2, articles("Newswire", Category::General, 3))).await;

    assert!(result.is_err());
    assert!(std::fs::symlink_metadata(&path).is_err());
    assert!(store.read().await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_corrupt_cache_self_heals_on_next_request() -> Result<()> {
    init_tracing();

    let path = temp_cache_path();
    std::fs::write(&path, b"not json at all")?;

    let stub = Arc::new(StubSource::new().with_articles("Newswire", articles("Newswire", Category::General, 3)));
    let feed_manager = FeedManager::new(vec![SourceDescriptor::feed(
        "Newswire",
        "https://wire.test/rss",
        Category::General,
    )]);
    let config = AggregatorConfig::default().with_cache_file(&path);
    let aggregator = NewsAggregator::with_components(
        config,
        feed_manager,
        stub.clone(),
        Arc::new(FileCacheStore::new(&path)),
    );
    assert_eq!(aggregator.cache_path(), Some(path.as_path()));

    let result = aggregator.get_articles(None, false).await;

    assert_eq!(result.len(), 3);
    assert_eq!(stub.calls(), vec!["Newswire"]);

    let healed: CacheSnapshot = serde_json::from_slice(&std::fs::read(&path)?)?;
    assert_eq!(healed.articles.len(), 3);

    std::fs::remove_file(&path)?;
    Ok(())
}
