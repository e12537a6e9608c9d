use crate::types::Article;
use tracing::{debug, info};

/// Titles at or below this many characters are never treated as duplicates.
pub const MIN_COMPARABLE_TITLE_CHARS: usize = 20;

/// Two lowercased titles are similar when both are long enough and one contains the other.
pub fn similar_titles(a: &str, b: &str) -> bool {
    if a.chars().count() > MIN_COMPARABLE_TITLE_CHARS && b.chars().count() > MIN_COMPARABLE_TITLE_CHARS {
        a.contains(b) || b.contains(a)
    } else {
        false
    }
}

/// Drop articles whose title is similar to an already kept one.
///
/// Input order decides which of two similar articles survives, so callers sort
/// newest-first beforehand to keep the newest copy of a story.
pub fn dedupe(articles: Vec<Article>) -> Vec<Article> {
    let total = articles.len();

    let (unique, _kept_titles) = articles.into_iter().fold(
        (Vec::with_capacity(total), Vec::<String>::new()),
        |(mut unique, mut kept_titles), article| {
            let title = article.title.to_lowercase();
            if kept_titles.iter().any(|kept| similar_titles(&title, kept)) {
                debug!("Removing duplicate article: {} ({})", article.title, article.url);
            } else {
                kept_titles.push(title);
                unique.push(article);
            }
            (unique, kept_titles)
        },
    );

    let removed_count = total - unique.len();
    if removed_count > 0 {
        info!("Removed {} duplicate articles", removed_count);
    }

    unique
}
