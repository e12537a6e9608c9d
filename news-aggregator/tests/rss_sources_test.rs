use news_aggregator::sources::{default_sources, google_news_feed};
use news_aggregator::{
    AggregatorError, ArticleSource, Category, FeedParser, FetchConfig, Fetcher, RssFeedSource,
    SourceDescriptor, SourceKind,
};

const RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
<title>Example News</title>
<link>https://example.com</link>
<description>Example</description>
<item>
  <title>First story</title>
  <link>https://example.com/1</link>
  <guid>id-1</guid>
  <description>One</description>
  <pubDate>Tue, 02 Jan 2024 10:30:00 GMT</pubDate>
</item>
<item>
  <title>First story again</title>
  <link>https://example.com/1</link>
  <description>Duplicate link</description>
</item>
<item>
  <link>https://example.com/2</link>
  <description>No title or date</description>
</item>
<item>
  <title>Third story</title>
  <link>https://example.com/3</link>
</item>
  </channel>
</rss>"#;

#[test]
fn test_parse_feed_skips_duplicate_links() {
    let parsed = FeedParser::new(10).parse_feed(RSS).unwrap();

    assert_eq!(parsed.title.as_deref(), Some("Example News"));
    let urls: Vec<&str> = parsed.entries.iter().map(|e| e.url.as_str()).collect();
    assert_eq!(urls, vec!["https://example.com/1", "https://example.com/2", "https://example.com/3"]);
    assert_eq!(parsed.entries[0].guid.as_deref(), Some("id-1"));
    assert_eq!(parsed.entries[1].title, None);
}

#[test]
fn test_parse_feed_limits_entries() {
    let parsed = FeedParser::new(2).parse_feed(RSS).unwrap();
    assert_eq!(parsed.entries.len(), 2);
}

#[test]
fn test_published_string_is_sortable() {
    let parsed = FeedParser::new(10).parse_feed(RSS).unwrap();
    assert_eq!(parsed.entries[0].published_string(), "2024-01-02 10:30:00");

    // Missing dates default to "now" in the same shape
    let fallback = parsed.entries[1].published_string();
    assert_eq!(fallback.len(), "YYYY-MM-DD HH:MM:SS".len());
    assert!(fallback.as_str() > "2024-01-02 10:30:00");
}

#[test]
fn test_garbage_is_a_parse_error() {
    let result = FeedParser::new(10).parse_feed("definitely not xml");
    assert!(matches!(result, Err(AggregatorError::Parse(_))));
}

fn quick_config() -> FetchConfig {
    FetchConfig {
        max_retries: 0,
        retry_delay_seconds: 0,
        timeout_seconds: 2,
        min_host_interval_ms: 0,
        ..FetchConfig::default()
    }
}

#[tokio::test]
async fn test_invalid_url_is_an_error() {
    let fetcher = Fetcher::new(quick_config()).unwrap();
    let result = fetcher.fetch_feed("not a url").await;
    assert!(matches!(result, Err(AggregatorError::InvalidUrl(_))));
}

#[tokio::test]
async fn test_unreachable_page_is_an_error() {
    let fetcher = Fetcher::new(quick_config()).unwrap();
    let result = fetcher.fetch_full_content("http://127.0.0.1:9/article").await;
    assert!(result.is_err());
}

fn offline_source() -> RssFeedSource {
    let config = FetchConfig {
        max_retries: 0,
        retry_delay_seconds: 0,
        timeout_seconds: 2,
        min_host_interval_ms: 0,
        ..FetchConfig::default()
    };
    RssFeedSource::new(config, 10).unwrap()
}

// Links point at a closed local port so every page fetch fails fast
const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
<title>Offline</title>
<item>
  <title>Vaccine rollout expands nationwide</title>
  <link>http://127.0.0.1:9/vaccine</link>
  <description>&lt;p&gt;Clinics &lt;b&gt;open&lt;/b&gt; early.&lt;/p&gt;&lt;img src="http://img.test/v.jpg"&gt;</description>
  <pubDate>Wed, 03 Jan 2024 08:00:00 GMT</pubDate>
</item>
<item>
  <title></title>
  <link>http://127.0.0.1:9/untitled</link>
  <description>Plain summary</description>
</item>
  </channel>
</rss>"#;

#[tokio::test]
async fn test_failed_extraction_falls_back_to_summary() {
    let source = offline_source();
    let descriptor = SourceDescriptor::feed("Offline", "http://127.0.0.1:9/feed", Category::General);

    let (articles, fallback_entries) = source.articles_from_feed(&descriptor, FEED).await.unwrap();

    assert_eq!(articles.len(), 2);
    assert_eq!(fallback_entries, 2);

    let first = &articles[0];
    assert_eq!(first.source, "Offline");
    assert_eq!(first.published, "2024-01-03 08:00:00");
    assert_eq!(first.text, "Clinics open early.");
    assert_eq!(first.images, vec!["http://img.test/v.jpg".to_string()]);
    assert_eq!(first.image.as_deref(), Some("http://img.test/v.jpg"));
    assert!(first.full_content.as_deref().unwrap_or("").contains("<b>open</b>"));
    assert_eq!(first.category, Category::Health);

    let second = &articles[1];
    assert_eq!(second.title, "No title");
    assert_eq!(second.text, "Plain summary");
    assert_eq!(second.full_content, None);
    assert_eq!(second.category, Category::General);
}

#[tokio::test]
async fn test_feed_tags_feed_categorization() {
    let source = offline_source();
    let descriptor = SourceDescriptor::feed("Offline", "http://127.0.0.1:9/feed", Category::General);
    let feed = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
<title>Offline</title>
<item>
  <title>Weekend results</title>
  <link>http://127.0.0.1:9/weekend</link>
  <description>Scores from Saturday</description>
  <category>Football</category>
</item>
  </channel>
</rss>"#;

    let (articles, _) = source.articles_from_feed(&descriptor, feed).await.unwrap();

    assert_eq!(articles[0].keywords, vec!["Football".to_string()]);
    assert_eq!(articles[0].category, Category::Sports);
}

#[tokio::test]
async fn test_api_sources_yield_nothing() {
    let source = offline_source();
    let descriptor = SourceDescriptor::api("Some API", "http://127.0.0.1:9/api", Category::World);

    let result = source.fetch(&descriptor).await;

    assert!(result.success);
    assert!(result.articles.is_empty());
}

#[tokio::test]
async fn test_unreachable_feed_reports_failure() {
    let source = offline_source();
    let descriptor = SourceDescriptor::feed("Down", "http://127.0.0.1:9/feed", Category::World);

    let result = source.fetch(&descriptor).await;

    assert!(!result.success);
    assert!(result.articles.is_empty());
    assert!(result.error.is_some());
}

#[test]
fn test_topic_feed_url_and_name() {
    let feed = google_news_feed(Category::Technology);
    assert_eq!(feed.name, "Google News - Technology");
    assert_eq!(feed.location, "https://news.google.com/rss/headlines/section/topic/TECHNOLOGY");
    assert_eq!(feed.category, Category::Technology);
}

#[test]
fn test_general_maps_to_top_stories() {
    let feed = google_news_feed(Category::General);
    assert_eq!(feed.location, "https://news.google.com/rss");
    assert_eq!(feed.category, Category::General);
}

#[test]
fn test_default_sources_cover_every_category() {
    let sources = default_sources();
    assert_eq!(sources.len(), 13);
    assert!(sources.iter().all(|s| s.kind == SourceKind::Feed));
    for category in Category::KEYWORDED {
        assert!(sources.iter().any(|s| s.category == category), "no source for {}", category);
    }
    assert!(sources.iter().any(|s| s.category == Category::General));
}
