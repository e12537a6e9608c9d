use crate::sources::default_sources;
use crate::types::{Category, SourceDescriptor};
use std::collections::HashMap;
use tracing::info;

/// Registry of the declared sources; fixed after construction.
pub struct FeedManager {
    sources: Vec<SourceDescriptor>,
}

impl FeedManager {
    pub fn new(sources: Vec<SourceDescriptor>) -> Self {
        info!("Registered {} news sources", sources.len());
        Self { sources }
    }

    pub fn with_default_sources() -> Self {
        Self::new(default_sources())
    }

    pub fn sources(&self) -> &[SourceDescriptor] {
        &self.sources
    }

    /// Sources declared for exactly `category`.
    pub fn sources_for(&self, category: Category) -> Vec<&SourceDescriptor> {
        self.sources
            .iter()
            .filter(|source| source.category == category)
            .collect()
    }

    /// First-pass sources for a `category` request: its own sources followed by
    /// every general source, without repeats.
    pub fn category_sources(&self, category: Category) -> Vec<&SourceDescriptor> {
        let mut selected = self.sources_for(category);
        let general = self.backfill_sources(&selected);
        selected.extend(general);
        selected
    }

    /// General sources not already part of `selected`.
    pub fn backfill_sources(&self, selected: &[&SourceDescriptor]) -> Vec<&SourceDescriptor> {
        self.sources_for(Category::General)
            .into_iter()
            .filter(|source| !selected.iter().any(|chosen| chosen == source))
            .collect()
    }

    /// Number of sources per category name.
    pub fn get_feed_stats(&self) -> HashMap<String, i64> {
        let mut stats = HashMap::new();
        stats.insert("total_sources".to_string(), self.sources.len() as i64);
        for source in &self.sources {
            *stats.entry(source.category.to_string()).or_insert(0) += 1;
        }
        stats
    }
}
