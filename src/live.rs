//! Navigable page for long-running hosts.
//!
//! [`LivePage`] plays the role of the browser's current document: hosts
//! swap in a new snapshot on navigation, and the monitor reads whatever is
//! current when it checks.

use std::sync::{RwLock, RwLockReadGuard};

use page_context_core::models::HeadingLevel;
use page_context_core::source::memory::StaticPage;
use page_context_core::source::{FormField, MatchedElement, PageSource, SectionBox};

#[derive(Debug, Default)]
pub struct LivePage {
    current: RwLock<StaticPage>,
}

impl LivePage {
    pub fn new(page: StaticPage) -> Self {
        Self {
            current: RwLock::new(page),
        }
    }

    /// Replace the current document, as a navigation would.
    pub fn navigate(&self, page: StaticPage) {
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        *current = page;
    }

    /// Copy of the current document.
    pub fn snapshot(&self) -> StaticPage {
        self.read().clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, StaticPage> {
        self.current.read().unwrap_or_else(|e| e.into_inner())
    }
}

impl PageSource for LivePage {
    fn url(&self) -> String {
        self.read().url()
    }

    fn title(&self) -> String {
        self.read().title()
    }

    fn meta(&self, key: &str) -> Option<String> {
        self.read().meta(key)
    }

    fn headings(&self, level: HeadingLevel) -> Vec<String> {
        self.read().headings(level)
    }

    fn container_paragraphs(&self, selector: &str) -> Option<Vec<String>> {
        self.read().container_paragraphs(selector)
    }

    fn form_fields(&self) -> Vec<FormField> {
        self.read().form_fields()
    }

    fn first_match(&self, selector: &str) -> Option<MatchedElement> {
        self.read().first_match(selector)
    }

    fn sections(&self) -> Vec<SectionBox> {
        self.read().sections()
    }

    fn viewport_height(&self) -> Option<f64> {
        self.read().viewport_height()
    }
}
