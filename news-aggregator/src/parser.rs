use crate::types::{AggregatorError, ParsedEntry, ParsedFeed, Result};
use chrono::Utc;
use feed_rs::parser;
use std::collections::HashSet;
use tracing::debug;

/// Format used for every `published` value this crate produces.
pub const PUBLISHED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct FeedParser {
    max_entries: usize,
}

impl FeedParser {
    pub fn new(max_entries: usize) -> Self {
        Self { max_entries }
    }

    /// Parse an RSS/Atom document, keeping at most `max_entries` linked, unique entries.
    pub fn parse_feed(&self, content: &str) -> Result<ParsedFeed> {
        debug!("Parsing feed content ({} bytes)", content.len());

        let feed = parser::parse(content.as_bytes())
            .map_err(|e| AggregatorError::Parse(format!("Failed to parse feed: {}", e)))?;

        let title = feed.title.map(|t| t.content);

        let mut seen_guids = HashSet::new();
        let mut seen_urls = HashSet::new();
        let mut entries = Vec::new();

        for entry in feed.entries {
            if entries.len() >= self.max_entries {
                break;
            }
            if let Some(parsed) = Self::parse_entry(entry, &mut seen_guids, &mut seen_urls) {
                entries.push(parsed);
            }
        }

        debug!("Parsed feed with {} entries", entries.len());

        Ok(ParsedFeed { title, entries })
    }

    fn parse_entry(
        entry: feed_rs::model::Entry,
        seen_guids: &mut HashSet<String>,
        seen_urls: &mut HashSet<String>,
    ) -> Option<ParsedEntry> {
        let url = entry.links.first()?.href.clone();

        let guid = if !entry.id.is_empty() {
            Some(entry.id.clone())
        } else {
            None
        };

        if let Some(ref guid) = guid {
            if !seen_guids.insert(guid.clone()) {
                debug!("Skipping duplicate entry with GUID: {}", guid);
                return None;
            }
        }

        if !seen_urls.insert(url.clone()) {
            debug!("Skipping duplicate entry with URL: {}", url);
            return None;
        }

        let title = entry.title.map(|t| t.content);
        let summary = entry.summary.map(|s| s.content);
        let content = entry.content.and_then(|c| c.body);
        let authors = entry.authors.into_iter().map(|a| a.name).collect();
        let published_at = entry
            .published
            .or(entry.updated)
            .map(|dt| dt.with_timezone(&Utc));
        let tags = entry.categories.into_iter().map(|c| c.term).collect();

        Some(ParsedEntry {
            guid,
            url,
            title,
            summary,
            content,
            authors,
            published_at,
            tags,
        })
    }
}

impl ParsedEntry {
    /// The entry's timestamp as a sortable string, or the current time when the feed gave none.
    pub fn published_string(&self) -> String {
        self.published_at
            .unwrap_or_else(Utc::now)
            .format(PUBLISHED_FORMAT)
            .to_string()
    }
}
