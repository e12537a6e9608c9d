use crate::types::{Article, Category};
use tracing::debug;

/// Curated keywords per category. Matching is a substring test over lowercased text.
pub fn keywords_for(category: Category) -> &'static [&'static str] {
    match category {
        Category::World => &[
            "international", "foreign", "diplomat", "united nations", "embassy", "refugee",
            "ceasefire", "border", "sanctions", "prime minister", "treaty", "war ",
        ],
        Category::Business => &[
            "economy", "economic", "market", "stocks", "shares", "investor", "inflation",
            "interest rate", "earnings", "revenue", "profit", "merger", "acquisition",
            "startup", "finance", "bank", "trade",
        ],
        Category::Technology => &[
            "technology", "tech ", "software", "hardware", "smartphone", "iphone", "android",
            "artificial intelligence", "computer", "cyber", "internet", "silicon valley",
            "robot", "semiconductor", "chip", "app ", "google", "apple", "microsoft",
        ],
        Category::Science => &[
            "science", "scientist", "research", "study finds", "space", "nasa", "planet",
            "climate", "physics", "chemistry", "biology", "fossil", "species", "telescope",
            "astronomer",
        ],
        Category::Health => &[
            "health", "medical", "medicine", "hospital", "doctor", "patient", "disease",
            "virus", "vaccine", "cancer", "covid", "pandemic", "mental health", "nutrition",
            "drug",
        ],
        Category::Sports => &[
            "sport", "football", "soccer", "basketball", "baseball", "tennis", "golf",
            "cricket", "olympic", "championship", "tournament", "league", "coach", "nba",
            "nfl", "world cup",
        ],
        Category::Entertainment => &[
            "entertainment", "movie", "film", "celebrity", "music", "album", "concert",
            "television", "tv show", "actor", "actress", "hollywood", "netflix", "box office",
            "award",
        ],
        Category::General => &[],
    }
}

/// True when any keyword of `category` occurs in `haystack` (already lowercased).
///
/// Punctuation reads as a space and the text ends in one, so `"war "` also
/// matches "the war." at the end of a sentence.
fn mentions(category: Category, haystack: &str) -> bool {
    let mut padded: String = haystack
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    padded.push(' ');
    keywords_for(category).iter().any(|keyword| padded.contains(keyword))
}

/// First keyword-matched category in table order, if any.
pub fn classify(text: &str) -> Option<Category> {
    let haystack = text.to_lowercase();
    Category::KEYWORDED
        .into_iter()
        .find(|category| mentions(*category, &haystack))
}

/// Assign a category to a general article from its title, summary and `extra_text`.
///
/// Articles that already carry a specific category are returned untouched.
pub fn refine(mut article: Article, extra_text: &str) -> Article {
    if !article.category.is_general() {
        return article;
    }

    let content = format!("{} {} {}", article.title, article.summary, extra_text);
    if let Some(category) = classify(&content) {
        debug!("Categorized '{}' as {}", article.title, category);
        article.category = category;
    }
    article
}

/// Whether `article` belongs in a `category` view, either directly or by keyword.
pub fn matches_category(article: &Article, category: Category) -> CategoryMatch {
    if article.category == category {
        return CategoryMatch::Direct;
    }

    let haystack = format!("{} {} {}", article.title, article.text, article.summary).to_lowercase();
    if mentions(category, &haystack) {
        CategoryMatch::Keyword
    } else {
        CategoryMatch::None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryMatch {
    Direct,
    Keyword,
    None,
}

/// Build the category view of `articles`. Keyword matches are copies relabelled to `category`.
pub fn filter_by_category(articles: &[Article], category: Category) -> Vec<Article> {
    articles
        .iter()
        .filter_map(|article| match matches_category(article, category) {
            CategoryMatch::Direct => Some(article.clone()),
            CategoryMatch::Keyword => {
                let mut copy = article.clone();
                copy.category = category;
                Some(copy)
            }
            CategoryMatch::None => None,
        })
        .collect()
}
