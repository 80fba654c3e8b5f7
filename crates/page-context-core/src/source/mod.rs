//! Page access abstraction.
//!
//! The [`PageSource`] trait exposes the read-only queries the extractors
//! need from "the current document", so the pipeline is a pure function of
//! an explicit page instead of ambient browser state. Hosts implement it
//! over whatever they have: a parsed HTML document, a headless browser, or
//! the in-memory [`StaticPage`](memory::StaticPage).
//!
//! Implementations must be cheap to query repeatedly and must never fail:
//! anything missing is reported as empty or `None`.

pub mod memory;

use serde::{Deserialize, Serialize};

use crate::models::HeadingLevel;

/// A form control that carries a `name` attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    pub aria_label: Option<String>,
    pub placeholder: Option<String>,
}

/// The parts of a matched element the last-updated lookup reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedElement {
    /// The machine-readable `datetime` attribute, if any.
    pub datetime: Option<String>,
    /// Text content, untrimmed.
    pub text: String,
}

/// Vertical extent of a page section relative to the viewport top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionBox {
    pub id: String,
    pub top: f64,
    pub bottom: f64,
}

/// Read-only view of the current document.
pub trait PageSource: Send + Sync {
    /// Current navigation URL.
    fn url(&self) -> String;

    /// Document title.
    fn title(&self) -> String;

    /// `content` of the first `<meta>` whose `name` or `property` equals `key`.
    fn meta(&self, key: &str) -> Option<String>;

    /// Raw text of every heading at `level`, in document order.
    fn headings(&self, level: HeadingLevel) -> Vec<String>;

    /// `<p>` texts inside the first element matching `selector`.
    ///
    /// Returns `None` when no element matches, and `Some(vec![])` when an
    /// element matches but holds no paragraphs.
    fn container_paragraphs(&self, selector: &str) -> Option<Vec<String>>;

    /// Named inputs, selects, and textareas inside forms, in document order.
    fn form_fields(&self) -> Vec<FormField>;

    /// First element matching `selector`.
    fn first_match(&self, selector: &str) -> Option<MatchedElement>;

    /// Candidate sections with their current layout boxes.
    fn sections(&self) -> Vec<SectionBox>;

    /// Viewport height, or `None` when the host has no layout.
    fn viewport_height(&self) -> Option<f64>;
}
