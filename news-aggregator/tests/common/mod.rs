#![allow(dead_code)]

use async_trait::async_trait;
use news_aggregator::{
    AggregatorConfig, Article, ArticleSource, Category, SourceDescriptor, SourceFetchResult,
};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, Once};

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .try_init()
            .ok();
    });
}

/// Source double: canned articles per source name, records every fetch.
#[derive(Default)]
pub struct StubSource {
    articles: HashMap<String, Vec<Article>>,
    failing: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_articles(mut self, source: &str, articles: Vec<Article>) -> Self {
        self.articles.insert(source.to_string(), articles);
        self
    }

    pub fn failing(mut self, source: &str) -> Self {
        self.failing.push(source.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArticleSource for StubSource {
    async fn fetch(&self, descriptor: &SourceDescriptor) -> SourceFetchResult {
        self.calls.lock().unwrap().push(descriptor.name.clone());

        if self.failing.contains(&descriptor.name) {
            return SourceFetchResult::failed(&descriptor.name, "connection refused", chrono::Utc::now(), 0);
        }

        let mut result = SourceFetchResult::empty(&descriptor.name);
        result.articles = self.articles.get(&descriptor.name).cloned().unwrap_or_default();
        result.entries_found = result.articles.len();
        result
    }
}

pub fn article(source: &str, title: &str, category: Category, published: &str) -> Article {
    Article::new(
        title,
        format!("https://{}.test/{}", source.to_lowercase().replace(' ', "-"), title.len()),
        source,
        category,
        published,
    )
}

/// `count` distinct articles with descending timestamps on the same day.
pub fn articles(source: &str, category: Category, count: usize) -> Vec<Article> {
    (0..count)
        .map(|i| {
            article(
                source,
                &format!("{} story number {} of the day", source, i),
                category,
                &format!("2024-05-01 {:02}:00:00", 23 - i),
            )
        })
        .collect()
}

pub fn temp_cache_path() -> PathBuf {
    std::env::temp_dir().join(format!("news-aggregator-test-{}.json", uuid::Uuid::new_v4()))
}

pub fn test_config() -> AggregatorConfig {
    AggregatorConfig::default().with_cache_file(temp_cache_path())
}
