use crate::cache::{is_fresh, FileCacheStore};
use crate::categorizer::filter_by_category;
use crate::config::AggregatorConfig;
use crate::dedup::dedupe;
use crate::sources::RssFeedSource;
use crate::traits::{ArticleSource, CacheStore};
use crate::types::{AggregatorError, Article, ArticleFeed, CacheSnapshot, Category, Result, SourceDescriptor};
use crate::FeedManager;
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

pub const UNAVAILABLE_ADVISORY: &str =
    "We couldn't load the news right now. Please try again in a few minutes.";

/// Orchestrates fetch, categorize, dedupe and cache, and answers article queries.
pub struct NewsAggregator {
    feed_manager: FeedManager,
    source: Arc<dyn ArticleSource>,
    cache: Arc<dyn CacheStore>,
    config: AggregatorConfig,
    // Single-flight guard around refreshes of the one cache slot
    refresh_guard: Mutex<()>,
}

/// Articles gathered by one or more fetch passes.
#[derive(Default)]
struct FetchPass {
    articles: Vec<Article>,
    attempted: usize,
    succeeded: usize,
}

impl FetchPass {
    fn absorb(&mut self, other: FetchPass) {
        self.articles.extend(other.articles);
        self.attempted += other.attempted;
        self.succeeded += other.succeeded;
    }
}

impl NewsAggregator {
    /// Aggregator over the default sources, fetching RSS and caching to `config.cache_file`.
    pub fn new(config: AggregatorConfig) -> Result<Self> {
        let source = RssFeedSource::new(config.fetch.clone(), config.max_entries_per_source)?;
        let cache = FileCacheStore::new(config.cache_file.clone());

        Ok(Self::with_components(
            config,
            FeedManager::with_default_sources(),
            Arc::new(source),
            Arc::new(cache),
        ))
    }

    pub fn with_components(
        config: AggregatorConfig,
        feed_manager: FeedManager,
        source: Arc<dyn ArticleSource>,
        cache: Arc<dyn CacheStore>,
    ) -> Self {
        Self {
            feed_manager,
            source,
            cache,
            config,
            refresh_guard: Mutex::new(()),
        }
    }

    pub fn feed_manager(&self) -> &FeedManager {
        &self.feed_manager
    }

    /// Path of the cache file, so a front end can delete it directly.
    pub fn cache_path(&self) -> Option<&Path> {
        self.cache.path()
    }

    /// Articles for `category` (or all), with an advisory when the pipeline degraded.
    pub async fn get_feed(&self, category: Option<Category>, force_refresh: bool) -> ArticleFeed {
        match self.collect(category, force_refresh).await {
            Ok(articles) => ArticleFeed {
                articles: index(articles),
                advisory: None,
            },
            Err(e) => {
                error!("Failed to aggregate articles: {}", e);
                ArticleFeed {
                    articles: Vec::new(),
                    advisory: Some(UNAVAILABLE_ADVISORY.to_string()),
                }
            }
        }
    }

    pub async fn get_articles(&self, category: Option<Category>, force_refresh: bool) -> Vec<Article> {
        self.get_feed(category, force_refresh).await.articles
    }

    /// Article at position `id` of the full, unfiltered list.
    pub async fn get_article_by_id(&self, id: usize) -> Result<Article> {
        let articles = self.collect(None, false).await?;
        articles
            .into_iter()
            .nth(id)
            .map(|article| article.indexed(id))
            .ok_or(AggregatorError::ArticleNotFound { id })
    }

    /// Articles whose title or text contains `query`, keeping their ids from the full list.
    pub async fn search_articles(&self, query: &str) -> Vec<Article> {
        let query = query.to_lowercase();
        self.get_articles(None, false)
            .await
            .into_iter()
            .filter(|article| {
                article.title.to_lowercase().contains(&query) || article.text.to_lowercase().contains(&query)
            })
            .collect()
    }

    async fn collect(&self, category: Option<Category>, force_refresh: bool) -> Result<Vec<Article>> {
        if force_refresh {
            if let Err(e) = self.cache.invalidate().await {
                warn!("Failed to invalidate cache before refresh: {}", e);
            }
        }

        if let Some(articles) = self.cached_articles().await {
            return Ok(view(articles, category));
        }

        let _guard = self.refresh_guard.lock().await;

        // Another request may have refreshed while we waited
        if let Some(articles) = self.cached_articles().await {
            debug!("Cache was refreshed by a concurrent request");
            return Ok(view(articles, category));
        }

        let articles = self.refresh(category).await?;
        Ok(view(articles, category))
    }

    /// Fresh cached articles, or `None` on miss, staleness or corruption.
    async fn cached_articles(&self) -> Option<Vec<Article>> {
        match self.cache.read().await {
            Ok(Some(snapshot)) => {
                if is_fresh(&snapshot, Utc::now().timestamp(), self.config.cache_ttl_seconds) {
                    debug!("Serving {} articles from cache", snapshot.articles.len());
                    Some(snapshot.articles)
                } else {
                    info!("Cache snapshot is stale");
                    None
                }
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Discarding unreadable cache: {}", e);
                if let Err(e) = self.cache.invalidate().await {
                    warn!("Failed to delete corrupt cache: {}", e);
                }
                None
            }
        }
    }

    async fn refresh(&self, category: Option<Category>) -> Result<Vec<Article>> {
        let pass = match category {
            Some(category) => self.fetch_category(category).await,
            None => {
                let all: Vec<&SourceDescriptor> = self.feed_manager.sources().iter().collect();
                self.fetch_sources(&all).await
            }
        };

        if pass.attempted > 0 && pass.succeeded == 0 {
            return Err(AggregatorError::General(format!(
                "all {} sources failed to fetch",
                pass.attempted
            )));
        }

        let mut articles = pass.articles;
        articles.sort_by(|a, b| b.published.cmp(&a.published));
        let articles = dedupe(articles);

        let snapshot = CacheSnapshot::now(articles);
        if let Err(e) = self.cache.write(&snapshot).await {
            error!("Failed to cache articles: {}", e);
        }

        info!(
            "Aggregated {} articles from {}/{} sources",
            snapshot.articles.len(),
            pass.succeeded,
            pass.attempted
        );
        Ok(snapshot.articles)
    }

    async fn fetch_category(&self, category: Category) -> FetchPass {
        let selected = self.feed_manager.category_sources(category);
        let mut pass = self.fetch_sources(&selected).await;

        if pass.articles.len() < self.config.backfill_threshold {
            let general = self.feed_manager.backfill_sources(&selected);
            if general.is_empty() {
                debug!(
                    "Only {} {} articles and every general source was already fetched",
                    pass.articles.len(),
                    category
                );
            } else {
                info!(
                    "Only {} {} articles; backfilling from {} general sources",
                    pass.articles.len(),
                    category,
                    general.len()
                );
                pass.absorb(self.fetch_sources(&general).await);
            }
        }

        pass
    }

    async fn fetch_sources(&self, descriptors: &[&SourceDescriptor]) -> FetchPass {
        let mut pass = FetchPass::default();

        for descriptor in descriptors {
            let result = self.source.fetch(descriptor).await;
            pass.attempted += 1;
            if result.success {
                pass.succeeded += 1;
                debug!(
                    "Source {} returned {} entries ({} from feed summaries) in {}ms at {}",
                    result.source,
                    result.entries_found,
                    result.fallback_entries,
                    result.response_time_ms,
                    result.fetch_time.format("%H:%M:%S")
                );
            } else {
                warn!(
                    "Source {} contributed no articles after {}ms: {}",
                    result.source,
                    result.response_time_ms,
                    result.error.as_deref().unwrap_or("unknown error")
                );
            }
            pass.articles.extend(result.articles);
        }

        pass
    }
}

fn view(articles: Vec<Article>, category: Option<Category>) -> Vec<Article> {
    match category {
        Some(category) => filter_by_category(&articles, category),
        None => articles,
    }
}

fn index(articles: Vec<Article>) -> Vec<Article> {
    articles
        .into_iter()
        .enumerate()
        .map(|(id, article)| article.indexed(id))
        .collect()
}
