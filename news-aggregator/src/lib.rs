pub mod types;
pub mod config;
pub mod traits;
pub mod fetcher;
pub mod parser;
pub mod extractor;
pub mod nlp;
pub mod categorizer;
pub mod dedup;
pub mod cache;
pub mod sources;
pub mod feed_manager;
pub mod aggregator;

pub use types::*;
pub use config::AggregatorConfig;
pub use traits::{ArticleSource, CacheStore};
pub use fetcher::Fetcher;
pub use parser::FeedParser;
pub use cache::{FileCacheStore, MemoryCacheStore};
pub use sources::RssFeedSource;
pub use feed_manager::FeedManager;
pub use aggregator::NewsAggregator;
