//! Context composition.
//!
//! [`ContextExtractor`] runs the extractors, location detector, keyword
//! extractor, and topic classifier over a [`PageSource`] and assembles one
//! [`PageContext`]. Extraction is synchronous and total: any page shape
//! yields a context.
//!
//! # Example
//!
//! ```rust
//! use page_context_core::compose::ContextExtractor;
//! use page_context_core::source::memory::StaticPage;
//!
//! let extractor = ContextExtractor::default();
//! let page = StaticPage::new("https://x.test/altadena/rebuild");
//! let ctx = extractor.extract(&page);
//! assert_eq!(ctx.location.city.as_deref(), Some("Altadena"));
//! ```

use std::sync::Arc;

use chrono::Utc;

use crate::extract;
use crate::keywords::extract_keywords;
use crate::location::detect_location;
use crate::models::PageContext;
use crate::source::PageSource;
use crate::tables::Tables;
use crate::topics::classify_topics;

/// Builds [`PageContext`] snapshots using a fixed set of [`Tables`].
#[derive(Debug, Clone)]
pub struct ContextExtractor {
    tables: Arc<Tables>,
}

impl Default for ContextExtractor {
    fn default() -> Self {
        Self::new(Arc::new(Tables::builtin()))
    }
}

impl ContextExtractor {
    pub fn new(tables: Arc<Tables>) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    /// Extract a fresh context from `page`.
    pub fn extract(&self, page: &dyn PageSource) -> PageContext {
        let url = page.url();
        let title = page.title();
        let description = extract::description(page);
        let headings = extract::headings(page);
        let content_blocks = extract::content_blocks(page, &self.tables.content_selectors);

        let location_headings: Vec<&str> = headings
            .h1
            .iter()
            .chain(headings.h2.iter())
            .map(String::as_str)
            .collect();
        let location = detect_location(&self.tables, &url, &title, &location_headings);

        let mut keyword_sources: Vec<&str> = vec![title.as_str(), description.as_str()];
        keyword_sources.extend(content_blocks.iter().map(String::as_str));
        let keywords = extract_keywords(&keyword_sources);

        let topics = classify_topics(&self.tables, &keywords, &content_blocks);
        let primary_topic = topics.first().copied();

        PageContext {
            form_elements: extract::form_elements(page),
            active_section: extract::active_section(page),
            last_updated: extract::last_updated(page, &self.tables.last_updated_selectors),
            url,
            title,
            description,
            headings,
            location,
            topics,
            primary_topic,
            content_blocks,
            keywords,
            timestamp: Utc::now(),
        }
    }
}
