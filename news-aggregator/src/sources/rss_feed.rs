use crate::categorizer;
use crate::extractor::{self, ExtractedArticle};
use crate::traits::ArticleSource;
use crate::types::{Article, FetchConfig, ParsedEntry, Result, SourceDescriptor, SourceFetchResult, SourceKind};
use crate::{FeedParser, Fetcher};
use async_trait::async_trait;
use chrono::Utc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Fetches RSS/Atom sources and enriches each entry from its article page.
pub struct RssFeedSource {
    fetcher: Fetcher,
    parser: FeedParser,
}

impl RssFeedSource {
    pub fn new(fetch_config: FetchConfig, max_entries: usize) -> Result<Self> {
        Ok(Self {
            fetcher: Fetcher::new(fetch_config)?,
            parser: FeedParser::new(max_entries),
        })
    }

    /// Turn a downloaded feed document into articles for `descriptor`.
    ///
    /// Returns the articles and how many of them fell back to feed content.
    pub async fn articles_from_feed(&self, descriptor: &SourceDescriptor, content: &str) -> Result<(Vec<Article>, usize)> {
        let parsed_feed = self.parser.parse_feed(content)?;

        let mut articles = Vec::with_capacity(parsed_feed.entries.len());
        let mut fallback_entries = 0;

        for entry in &parsed_feed.entries {
            let (article, fell_back) = self.build_article(descriptor, entry).await;
            if fell_back {
                fallback_entries += 1;
            }
            articles.push(article);
        }

        Ok((articles, fallback_entries))
    }

    async fn build_article(&self, descriptor: &SourceDescriptor, entry: &ParsedEntry) -> (Article, bool) {
        let title = entry
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or("No title");
        let summary = entry
            .summary
            .clone()
            .or_else(|| entry.content.clone())
            .unwrap_or_default();

        let mut article = Article::new(
            title,
            entry.url.clone(),
            descriptor.name.clone(),
            descriptor.category,
            entry.published_string(),
        )
        .with_summary(summary);
        article.authors = entry.authors.clone();
        article.keywords = entry.tags.clone();

        let fell_back = match self.extract(&entry.url, title).await {
            Ok(extracted) => {
                apply_extraction(&mut article, extracted);
                false
            }
            Err(e) => {
                warn!("Extraction failed for {}, using feed summary: {}", entry.url, e);
                apply_summary_fallback(&mut article);
                true
            }
        };

        let extra_text = format!("{} {}", article.text, article.keywords.join(" "));
        (categorizer::refine(article, &extra_text), fell_back)
    }

    async fn extract(&self, url: &str, title: &str) -> Result<ExtractedArticle> {
        let html = self.fetcher.fetch_full_content(url).await?;
        extractor::extract_article(&html, url, title)
    }
}

fn apply_extraction(article: &mut Article, extracted: ExtractedArticle) {
    article.full_content = Some(extracted.full_content);
    article.text = extracted.text;
    article.image = extracted.top_image;
    article.images = extracted.images;
    if !extracted.authors.is_empty() {
        article.authors = extracted.authors;
    }
    if !extracted.keywords.is_empty() {
        article.keywords = extracted.keywords;
    }
    if !extracted.summary.is_empty() {
        article.summary = extracted.summary;
    }
}

fn apply_summary_fallback(article: &mut Article) {
    match extractor::summary_content(&article.summary) {
        Ok(content) => {
            article.text = content.text;
            article.image = content.images.first().cloned();
            article.images = content.images;
            article.full_content = content.full_content;
        }
        Err(e) => {
            debug!("Could not render summary markup for {}: {}", article.url, e);
            article.text = article.summary.clone();
        }
    }
}

#[async_trait]
impl ArticleSource for RssFeedSource {
    async fn fetch(&self, descriptor: &SourceDescriptor) -> SourceFetchResult {
        if descriptor.kind != SourceKind::Feed {
            debug!("Source {} is not a feed; nothing to fetch", descriptor.name);
            return SourceFetchResult::empty(&descriptor.name);
        }

        let start_time = Instant::now();
        let fetch_time = Utc::now();
        info!("Pulling RSS feed: {} ({})", descriptor.name, descriptor.location);

        let outcome = match self.fetcher.fetch_feed(&descriptor.location).await {
            Ok(content) => self.articles_from_feed(descriptor, &content).await,
            Err(e) => Err(e),
        };
        let response_time_ms = start_time.elapsed().as_millis() as u64;

        match outcome {
            Ok((articles, fallback_entries)) => {
                info!(
                    "Pulled {} articles from {} ({} from feed summaries)",
                    articles.len(),
                    descriptor.name,
                    fallback_entries
                );
                SourceFetchResult {
                    source: descriptor.name.clone(),
                    success: true,
                    entries_found: articles.len(),
                    articles,
                    error: None,
                    fallback_entries,
                    fetch_time,
                    response_time_ms,
                }
            }
            Err(e) => {
                error!("Error fetching from {}: {}", descriptor.name, e);
                SourceFetchResult::failed(&descriptor.name, e.to_string(), fetch_time, response_time_ms)
            }
        }
    }
}
