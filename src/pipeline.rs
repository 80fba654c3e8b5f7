//! Wiring from configuration to a ready extractor and loader.

use std::sync::Arc;

use anyhow::{Context, Result};
use page_context_core::compose::ContextExtractor;
use page_context_core::models::PageContext;
use page_context_core::source::memory::StaticPage;

use crate::config::Config;
use crate::load::{DefaultLoader, PageLoader};

/// Tables, extractor, and loader built once per process.
pub struct Pipeline {
    pub extractor: Arc<ContextExtractor>,
    pub loader: DefaultLoader,
}

impl Pipeline {
    pub fn from_config(config: &Config) -> Result<Self> {
        let tables = Arc::new(config.load_tables()?);
        let loader = DefaultLoader::new(&config.fetch, tables.clone())?;
        Ok(Self {
            extractor: Arc::new(ContextExtractor::new(tables)),
            loader,
        })
    }

    /// Load `source` into a page snapshot.
    pub async fn load(&self, source: &str) -> Result<StaticPage> {
        self.loader
            .load(source)
            .await
            .with_context(|| format!("Failed to load page: {}", source))
    }

    /// Load `source` and extract its context.
    pub async fn extract(&self, source: &str) -> Result<PageContext> {
        let page = self.load(source).await?;
        let context = self.extractor.extract(&page);
        tracing::info!(
            url = %context.url,
            topics = ?context.topics,
            detected = context.location.detected,
            "extracted page context"
        );
        Ok(context)
    }
}
