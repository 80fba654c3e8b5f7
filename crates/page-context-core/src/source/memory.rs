//! In-memory [`PageSource`] for tests, fixtures, and parsed snapshots.
//!
//! A [`StaticPage`] owns copies of everything it reports. The app crate's
//! HTML parser produces one, and tests build them directly with the
//! `with_*` builder methods.

use crate::models::{HeadingLevel, Headings};

use super::{FormField, MatchedElement, PageSource, SectionBox};

/// Owned page snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticPage {
    pub url: String,
    pub title: String,
    /// `(name-or-property, content)` pairs in document order.
    pub meta: Vec<(String, String)>,
    /// Raw heading texts; trimming happens in the extractor.
    pub headings: Headings,
    /// `(selector, paragraphs)` for every selector that matched an element.
    pub containers: Vec<(String, Vec<String>)>,
    pub form_fields: Vec<FormField>,
    /// `(selector, element)` for every selector that matched an element.
    pub matches: Vec<(String, MatchedElement)>,
    pub sections: Vec<SectionBox>,
    pub viewport_height: Option<f64>,
}

impl StaticPage {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_meta(mut self, key: impl Into<String>, content: impl Into<String>) -> Self {
        self.meta.push((key.into(), content.into()));
        self
    }

    pub fn with_heading(mut self, level: HeadingLevel, text: impl Into<String>) -> Self {
        let text = text.into();
        match level {
            HeadingLevel::H1 => self.headings.h1.push(text),
            HeadingLevel::H2 => self.headings.h2.push(text),
            HeadingLevel::H3 => self.headings.h3.push(text),
        }
        self
    }

    pub fn with_container<I, S>(mut self, selector: impl Into<String>, paragraphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.containers.push((
            selector.into(),
            paragraphs.into_iter().map(Into::into).collect(),
        ));
        self
    }

    pub fn with_form_field(mut self, field: FormField) -> Self {
        self.form_fields.push(field);
        self
    }

    pub fn with_match(mut self, selector: impl Into<String>, element: MatchedElement) -> Self {
        self.matches.push((selector.into(), element));
        self
    }

    pub fn with_section(mut self, id: impl Into<String>, top: f64, bottom: f64) -> Self {
        self.sections.push(SectionBox {
            id: id.into(),
            top,
            bottom,
        });
        self
    }

    pub fn with_viewport_height(mut self, height: f64) -> Self {
        self.viewport_height = Some(height);
        self
    }
}

impl PageSource for StaticPage {
    fn url(&self) -> String {
        self.url.clone()
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn meta(&self, key: &str) -> Option<String> {
        self.meta
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    fn headings(&self, level: HeadingLevel) -> Vec<String> {
        match level {
            HeadingLevel::H1 => self.headings.h1.clone(),
            HeadingLevel::H2 => self.headings.h2.clone(),
            HeadingLevel::H3 => self.headings.h3.clone(),
        }
    }

    fn container_paragraphs(&self, selector: &str) -> Option<Vec<String>> {
        self.containers
            .iter()
            .find(|(s, _)| s == selector)
            .map(|(_, p)| p.clone())
    }

    fn form_fields(&self) -> Vec<FormField> {
        self.form_fields.clone()
    }

    fn first_match(&self, selector: &str) -> Option<MatchedElement> {
        self.matches
            .iter()
            .find(|(s, _)| s == selector)
            .map(|(_, e)| e.clone())
    }

    fn sections(&self) -> Vec<SectionBox> {
        self.sections.clone()
    }

    fn viewport_height(&self) -> Option<f64> {
        self.viewport_height
    }
}
