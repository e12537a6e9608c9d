use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Topical category of a source or an article.
///
/// `General` is the fallback and is never matched by keyword heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    World,
    Business,
    Technology,
    Science,
    Health,
    Sports,
    Entertainment,
    General,
}

impl Category {
    /// Keyword-matched categories in tie-break order.
    pub const KEYWORDED: [Category; 7] = [
        Category::World,
        Category::Business,
        Category::Technology,
        Category::Science,
        Category::Health,
        Category::Sports,
        Category::Entertainment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::World => "world",
            Category::Business => "business",
            Category::Technology => "technology",
            Category::Science => "science",
            Category::Health => "health",
            Category::Sports => "sports",
            Category::Entertainment => "entertainment",
            Category::General => "general",
        }
    }

    pub fn is_general(&self) -> bool {
        matches!(self, Category::General)
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::General
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Category {
    type Err = AggregatorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "world" => Ok(Category::World),
            "business" => Ok(Category::Business),
            "technology" => Ok(Category::Technology),
            "science" => Ok(Category::Science),
            "health" => Ok(Category::Health),
            "sports" => Ok(Category::Sports),
            "entertainment" => Ok(Category::Entertainment),
            "general" => Ok(Category::General),
            other => Err(AggregatorError::UnknownCategory(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Feed,
    Api,
}

/// Static declaration of one news source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    pub name: String,
    pub location: String,
    pub kind: SourceKind,
    pub category: Category,
}

impl SourceDescriptor {
    pub fn feed(name: impl Into<String>, location: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            kind: SourceKind::Feed,
            category,
        }
    }

    pub fn api(name: impl Into<String>, location: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            kind: SourceKind::Api,
            category,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub url: String,
    pub source: String,
    pub category: Category,
    // Source-native string, compared lexicographically only
    pub published: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub full_content: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Position in the result set of the query that returned this article.
    #[serde(skip)]
    pub id: Option<usize>,
    #[serde(skip)]
    pub paragraphs: Vec<String>,
}

impl Article {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        source: impl Into<String>,
        category: Category,
        published: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            source: source.into(),
            category,
            published: published.into(),
            summary: String::new(),
            full_content: None,
            text: String::new(),
            image: None,
            images: Vec::new(),
            authors: Vec::new(),
            keywords: Vec::new(),
            id: None,
            paragraphs: Vec::new(),
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Attach the query-time fields: positional id and the text split into paragraphs.
    pub fn indexed(mut self, id: usize) -> Self {
        self.paragraphs = self
            .text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        self.id = Some(id);
        self
    }
}

/// The persisted cache record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheSnapshot {
    /// Seconds since the unix epoch at fetch time.
    pub timestamp: i64,
    pub articles: Vec<Article>,
}

impl CacheSnapshot {
    pub fn new(timestamp: i64, articles: Vec<Article>) -> Self {
        Self { timestamp, articles }
    }

    pub fn now(articles: Vec<Article>) -> Self {
        Self::new(Utc::now().timestamp(), articles)
    }
}

/// Outcome of fetching one source. Failures are carried here instead of unwinding.
#[derive(Debug, Clone)]
pub struct SourceFetchResult {
    pub source: String,
    pub success: bool,
    pub articles: Vec<Article>,
    pub error: Option<String>,
    pub entries_found: usize,
    /// Entries whose page extraction failed and used the feed summary instead.
    pub fallback_entries: usize,
    pub fetch_time: DateTime<Utc>,
    pub response_time_ms: u64,
}

impl SourceFetchResult {
    pub fn failed(source: &str, error: impl Into<String>, fetch_time: DateTime<Utc>, response_time_ms: u64) -> Self {
        Self {
            source: source.to_string(),
            success: false,
            articles: Vec::new(),
            error: Some(error.into()),
            entries_found: 0,
            fallback_entries: 0,
            fetch_time,
            response_time_ms,
        }
    }

    pub fn empty(source: &str) -> Self {
        Self {
            source: source.to_string(),
            success: true,
            articles: Vec::new(),
            error: None,
            entries_found: 0,
            fallback_entries: 0,
            fetch_time: Utc::now(),
            response_time_ms: 0,
        }
    }
}

/// Articles plus an optional user-facing advisory when the pipeline degraded.
#[derive(Debug, Clone, Default)]
pub struct ArticleFeed {
    pub articles: Vec<Article>,
    pub advisory: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_retries: u32,
    pub retry_delay_seconds: u64,
    pub max_feed_size_mb: usize,
    pub max_redirects: usize,
    /// Minimum spacing between two requests to the same host.
    pub min_host_interval_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "News-Aggregator/1.0".to_string(),
            timeout_seconds: 30,
            max_retries: 3,
            retry_delay_seconds: 5,
            max_feed_size_mb: 10,
            max_redirects: 5,
            min_host_interval_ms: 1000,
        }
    }
}

#[derive(Debug)]
pub struct ParsedFeed {
    pub title: Option<String>,
    pub entries: Vec<ParsedEntry>,
}

#[derive(Debug, Clone)]
pub struct ParsedEntry {
    pub guid: Option<String>,
    pub url: String,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub authors: Vec<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AggregatorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("Extraction failed for {url}: {reason}")]
    Extraction { url: String, reason: String },

    #[error("Cache corrupt at {path}: {reason}")]
    CacheCorrupt { path: String, reason: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Article not found: {id}")]
    ArticleNotFound { id: usize },

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Feed size exceeds limit: {size_mb}MB")]
    FeedTooLarge { size_mb: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("General error: {0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, AggregatorError>;
