use crate::types::FetchConfig;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::warn;

pub const DEFAULT_CACHE_FILE: &str = "article_cache.json";
pub const DEFAULT_CACHE_TTL_SECONDS: i64 = 3600;
pub const DEFAULT_MAX_ENTRIES_PER_SOURCE: usize = 10;
pub const DEFAULT_BACKFILL_THRESHOLD: usize = 10;

#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    pub cache_file: PathBuf,
    pub cache_ttl_seconds: i64,
    pub max_entries_per_source: usize,
    /// A category fetch yielding fewer articles than this also pulls general sources.
    pub backfill_threshold: usize,
    pub fetch: FetchConfig,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            cache_file: PathBuf::from(DEFAULT_CACHE_FILE),
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
            max_entries_per_source: DEFAULT_MAX_ENTRIES_PER_SOURCE,
            backfill_threshold: DEFAULT_BACKFILL_THRESHOLD,
            fetch: FetchConfig::default(),
        }
    }
}

impl AggregatorConfig {
    /// Build a config from `NEWS_*` environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = env::var("NEWS_CACHE_FILE") {
            if !path.trim().is_empty() {
                config.cache_file = PathBuf::from(path);
            }
        }
        if let Some(ttl) = parse_var("NEWS_CACHE_TTL_SECONDS") {
            config.cache_ttl_seconds = ttl;
        }
        if let Some(max) = parse_var("NEWS_MAX_ENTRIES_PER_SOURCE") {
            config.max_entries_per_source = max;
        }
        if let Ok(agent) = env::var("NEWS_USER_AGENT") {
            if !agent.trim().is_empty() {
                config.fetch.user_agent = agent;
            }
        }
        if let Some(timeout) = parse_var("NEWS_FETCH_TIMEOUT_SECONDS") {
            config.fetch.timeout_seconds = timeout;
        }
        if let Some(retries) = parse_var("NEWS_FETCH_MAX_RETRIES") {
            config.fetch.max_retries = retries;
        }

        config
    }

    pub fn with_cache_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_file = path.into();
        self
    }
}

fn parse_var<T: FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring unparsable value for {}: {:?}", key, raw);
            None
        }
    }
}
