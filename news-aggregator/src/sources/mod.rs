pub mod google_news;
pub mod rss_feed;

pub use google_news::{google_news_feed, google_news_top_stories};
pub use rss_feed::RssFeedSource;

use crate::types::{Category, SourceDescriptor};

/// The built-in source list: outlet feeds plus the Google News topic feeds.
pub fn default_sources() -> Vec<SourceDescriptor> {
    vec![
        SourceDescriptor::feed("BBC", "http://feeds.bbci.co.uk/news/world/rss.xml", Category::World),
        SourceDescriptor::feed("CNN", "http://rss.cnn.com/rss/edition.rss", Category::General),
        SourceDescriptor::feed("Reuters", "http://feeds.reuters.com/reuters/topNews", Category::General),
        SourceDescriptor::feed("NPR", "https://feeds.npr.org/1001/rss.xml", Category::General),
        SourceDescriptor::feed("Washington Post", "http://feeds.washingtonpost.com/rss/world", Category::World),
        google_news_top_stories(),
        google_news_feed(Category::World),
        google_news_feed(Category::Business),
        google_news_feed(Category::Technology),
        google_news_feed(Category::Entertainment),
        google_news_feed(Category::Sports),
        google_news_feed(Category::Science),
        google_news_feed(Category::Health),
    ]
}
