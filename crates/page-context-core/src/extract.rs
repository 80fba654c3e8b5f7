//! Text extractors.
//!
//! Each function reads one aspect of a [`PageSource`] and returns plain
//! data. None of them fail: missing elements produce empty collections or
//! `None`.

use crate::models::{HeadingLevel, Headings};
use crate::source::PageSource;

/// Paragraphs must be longer than this (in characters, after trimming).
pub const MIN_BLOCK_CHARS: usize = 50;
/// Each content block is truncated to this many characters.
pub const MAX_BLOCK_CHARS: usize = 500;
/// At most this many content blocks are kept.
pub const MAX_BLOCKS: usize = 5;

pub const META_DESCRIPTION: &str = "description";
pub const META_MODIFIED_TIME: &str = "article:modified_time";
pub const META_PUBLISHED_TIME: &str = "article:published_time";

/// `description` meta content, or an empty string.
pub fn description(page: &dyn PageSource) -> String {
    page.meta(META_DESCRIPTION).unwrap_or_default()
}

/// Trimmed, non-empty heading texts for levels 1 through 3.
pub fn headings(page: &dyn PageSource) -> Headings {
    let mut out = Headings::default();
    for level in HeadingLevel::ALL {
        let texts: Vec<String> = page
            .headings(level)
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        match level {
            HeadingLevel::H1 => out.h1 = texts,
            HeadingLevel::H2 => out.h2 = texts,
            HeadingLevel::H3 => out.h3 = texts,
        }
    }
    out
}

/// Main-content paragraphs.
///
/// The first selector that matches an element ends the search, even when
/// that element has no qualifying paragraphs.
pub fn content_blocks(page: &dyn PageSource, selectors: &[String]) -> Vec<String> {
    for selector in selectors {
        let Some(paragraphs) = page.container_paragraphs(selector) else {
            continue;
        };
        return paragraphs
            .iter()
            .map(|p| p.trim())
            .filter(|p| p.chars().count() > MIN_BLOCK_CHARS)
            .take(MAX_BLOCKS)
            .map(|p| truncate_chars(p, MAX_BLOCK_CHARS))
            .collect();
    }
    Vec::new()
}

/// Distinct field names and labels, in first-seen order.
///
/// Every named field contributes its name, then its `aria-label` or, when
/// that is absent, its `placeholder`.
pub fn form_elements(page: &dyn PageSource) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut push = |value: &str| {
        if !value.is_empty() && !out.iter().any(|v| v == value) {
            out.push(value.to_string());
        }
    };
    for field in page.form_fields() {
        if field.name.is_empty() {
            continue;
        }
        push(&field.name);
        if let Some(label) = field.aria_label.as_deref().or(field.placeholder.as_deref()) {
            push(label);
        }
    }
    out
}

/// Last-modified metadata: modified time, published time, then the first
/// element matching one of `selectors`. First match wins.
pub fn last_updated(page: &dyn PageSource, selectors: &[String]) -> Option<String> {
    if let Some(modified) = page.meta(META_MODIFIED_TIME) {
        return Some(modified);
    }
    if let Some(published) = page.meta(META_PUBLISHED_TIME) {
        return Some(published);
    }
    let element = selectors.iter().find_map(|s| page.first_match(s))?;
    // An empty `datetime` attribute counts as absent.
    match element.datetime.filter(|dt| !dt.trim().is_empty()) {
        Some(dt) => Some(dt),
        None => {
            let text = element.text.trim();
            (!text.is_empty()).then(|| text.to_string())
        }
    }
}

/// Id of the first section whose box contains the viewport's vertical
/// midpoint.
pub fn active_section(page: &dyn PageSource) -> Option<String> {
    let mid = page.viewport_height()? / 2.0;
    page.sections()
        .into_iter()
        .find(|s| s.top <= mid && s.bottom >= mid)
        .map(|s| s.id)
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::memory::StaticPage;
    use crate::source::{FormField, MatchedElement};
    use crate::tables::Tables;

    fn selectors() -> Vec<String> {
        Tables::builtin().content_selectors
    }

    fn long(prefix: &str) -> String {
        format!("{} {}", prefix, "x".repeat(60))
    }

    #[test]
    fn no_headings_gives_empty_levels() {
        let page = StaticPage::new("https://x.test/");
        assert_eq!(headings(&page), Headings::default());
    }

    #[test]
    fn headings_trimmed_and_empties_dropped() {
        let page = StaticPage::new("u")
            .with_heading(HeadingLevel::H1, "  Recovery  ")
            .with_heading(HeadingLevel::H2, "   ")
            .with_heading(HeadingLevel::H2, "Permits")
            .with_heading(HeadingLevel::H2, "Insurance");
        let h = headings(&page);
        assert_eq!(h.h1, vec!["Recovery"]);
        assert_eq!(h.h2, vec!["Permits", "Insurance"]);
        assert!(h.h3.is_empty());
    }

    #[test]
    fn short_paragraphs_excluded() {
        let exactly_fifty = "y".repeat(50);
        let page = StaticPage::new("u").with_container(
            "main",
            vec!["too short".to_string(), exactly_fifty, long("kept")],
        );
        let blocks = content_blocks(&page, &selectors());
        assert_eq!(blocks, vec![long("kept")]);
    }

    #[test]
    fn blocks_truncated_to_prefix() {
        let text = "a".repeat(400) + &"b".repeat(300);
        let page = StaticPage::new("u").with_container("article", vec![text.clone()]);
        let blocks = content_blocks(&page, &selectors());
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].chars().count(), MAX_BLOCK_CHARS);
        assert!(text.starts_with(&blocks[0]));
    }

    #[test]
    fn truncation_respects_multibyte_chars() {
        let text = "é".repeat(600);
        let page = StaticPage::new("u").with_container("main", vec![text]);
        let blocks = content_blocks(&page, &selectors());
        assert_eq!(blocks[0].chars().count(), MAX_BLOCK_CHARS);
    }

    #[test]
    fn at_most_five_blocks() {
        let paragraphs: Vec<String> = (0..8).map(|i| long(&format!("p{}", i))).collect();
        let page = StaticPage::new("u").with_container("main", paragraphs);
        let blocks = content_blocks(&page, &selectors());
        assert_eq!(blocks.len(), MAX_BLOCKS);
        assert!(blocks[0].starts_with("p0"));
    }

    #[test]
    fn first_matching_selector_stops_search() {
        let page = StaticPage::new("u")
            .with_container("main", vec!["short".to_string()])
            .with_container("article", vec![long("article body")]);
        assert!(content_blocks(&page, &selectors()).is_empty());
    }

    #[test]
    fn later_selector_used_when_earlier_absent() {
        let page = StaticPage::new("u").with_container("[role=\"main\"]", vec![long("role")]);
        assert_eq!(content_blocks(&page, &selectors()), vec![long("role")]);
    }

    #[test]
    fn form_elements_deduplicated_with_label_fallback() {
        let page = StaticPage::new("u")
            .with_form_field(FormField {
                name: "address".to_string(),
                aria_label: Some("Property address".to_string()),
                placeholder: Some("123 Main St".to_string()),
            })
            .with_form_field(FormField {
                name: "email".to_string(),
                aria_label: None,
                placeholder: Some("you@example.com".to_string()),
            })
            .with_form_field(FormField {
                name: "address".to_string(),
                aria_label: None,
                placeholder: None,
            });
        assert_eq!(
            form_elements(&page),
            vec!["address", "Property address", "email", "you@example.com"]
        );
    }

    #[test]
    fn last_updated_prefers_modified_meta() {
        let page = StaticPage::new("u")
            .with_meta(META_PUBLISHED_TIME, "2025-01-10")
            .with_meta(META_MODIFIED_TIME, "2025-02-01");
        let sel = Tables::builtin().last_updated_selectors;
        assert_eq!(last_updated(&page, &sel).as_deref(), Some("2025-02-01"));
    }

    #[test]
    fn last_updated_falls_back_to_element() {
        let sel = Tables::builtin().last_updated_selectors;
        let page = StaticPage::new("u").with_match(
            ".last-updated",
            MatchedElement {
                datetime: None,
                text: "  Updated March 3  ".to_string(),
            },
        );
        assert_eq!(last_updated(&page, &sel).as_deref(), Some("Updated March 3"));

        let page = StaticPage::new("u").with_match(
            "time.updated",
            MatchedElement {
                datetime: Some("2025-03-03T10:00:00Z".to_string()),
                text: "March 3".to_string(),
            },
        );
        assert_eq!(
            last_updated(&page, &sel).as_deref(),
            Some("2025-03-03T10:00:00Z")
        );
        assert_eq!(last_updated(&StaticPage::new("u"), &sel), None);
    }

    #[test]
    fn empty_datetime_falls_back_to_text() {
        let sel = Tables::builtin().last_updated_selectors;
        let page = StaticPage::new("u").with_match(
            "time.updated",
            MatchedElement {
                datetime: Some(String::new()),
                text: " March 3 ".to_string(),
            },
        );
        assert_eq!(last_updated(&page, &sel).as_deref(), Some("March 3"));
    }

    #[test]
    fn active_section_contains_midpoint() {
        let page = StaticPage::new("u")
            .with_viewport_height(800.0)
            .with_section("hero", -500.0, 100.0)
            .with_section("permits", 100.0, 900.0)
            .with_section("contact", 900.0, 1400.0);
        assert_eq!(active_section(&page).as_deref(), Some("permits"));
    }

    #[test]
    fn active_section_requires_viewport() {
        let page = StaticPage::new("u").with_section("permits", 0.0, 900.0);
        assert_eq!(active_section(&page), None);
    }
}
