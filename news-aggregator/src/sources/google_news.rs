use crate::types::{Category, SourceDescriptor};

const GOOGLE_NEWS_RSS: &str = "https://news.google.com/rss";

/// Google News headline feed for the overall top stories.
pub fn google_news_top_stories() -> SourceDescriptor {
    SourceDescriptor::feed("Google News - Top Stories", GOOGLE_NEWS_RSS, Category::General)
}

/// Google News topic section feed, e.g. `/headlines/section/topic/TECHNOLOGY`.
///
/// `Category::General` maps to the top stories feed since Google has no such topic.
pub fn google_news_feed(category: Category) -> SourceDescriptor {
    if category.is_general() {
        return google_news_top_stories();
    }

    let topic = category.as_str().to_uppercase();
    let mut label = category.as_str().to_string();
    if let Some(first) = label.get_mut(0..1) {
        first.make_ascii_uppercase();
    }

    SourceDescriptor::feed(
        format!("Google News - {}", label),
        format!("{}/headlines/section/topic/{}", GOOGLE_NEWS_RSS, topic),
        category,
    )
}
