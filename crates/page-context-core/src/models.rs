//! Core data models produced by the extraction pipeline.
//!
//! A [`PageContext`] is built once per extraction run and never mutated.
//! Field names serialize in camelCase because the chat backend and the
//! browser consumers read the JSON form directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Heading text grouped by level, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headings {
    pub h1: Vec<String>,
    pub h2: Vec<String>,
    pub h3: Vec<String>,
}

/// Heading levels the extractor reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    pub const ALL: [HeadingLevel; 3] = [HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3];

    /// Tag name (`"h1"`, `"h2"`, `"h3"`).
    pub fn tag(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "h1",
            HeadingLevel::H2 => "h2",
            HeadingLevel::H3 => "h3",
        }
    }
}

/// Coarse geographic context detected from the page.
///
/// `detected` is true iff `city` or `county` is set. `state` is only set
/// when detected, and `jurisdiction` is derived from `city`/`county`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub detected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
}

/// The fixed set of topics a page can be classified under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Topic {
    DebrisRemoval,
    Permits,
    Insurance,
    FinancialAssistance,
    Housing,
    Legal,
    Rebuilding,
    Safety,
    Timeline,
    Contact,
}

impl Topic {
    /// Wire identifier, e.g. `"debris-removal"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Topic::DebrisRemoval => "debris-removal",
            Topic::Permits => "permits",
            Topic::Insurance => "insurance",
            Topic::FinancialAssistance => "financial-assistance",
            Topic::Housing => "housing",
            Topic::Legal => "legal",
            Topic::Rebuilding => "rebuilding",
            Topic::Safety => "safety",
            Topic::Timeline => "timeline",
            Topic::Contact => "contact",
        }
    }

    /// Human-readable label for badges and greetings.
    pub fn label(self) -> &'static str {
        match self {
            Topic::DebrisRemoval => "debris removal",
            Topic::Permits => "permits",
            Topic::Insurance => "insurance",
            Topic::FinancialAssistance => "financial assistance",
            Topic::Housing => "housing",
            Topic::Legal => "legal help",
            Topic::Rebuilding => "rebuilding",
            Topic::Safety => "safety",
            Topic::Timeline => "timelines",
            Topic::Contact => "contact information",
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable snapshot of the semantic information on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContext {
    pub url: String,
    pub title: String,
    pub description: String,
    pub headings: Headings,
    pub location: Location,
    pub topics: Vec<Topic>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_topic: Option<Topic>,
    pub content_blocks: Vec<String>,
    pub keywords: Vec<String>,
    pub form_elements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    pub timestamp: DateTime<Utc>,
}
