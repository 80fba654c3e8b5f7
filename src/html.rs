//! HTML snapshot parsing.
//!
//! Turns an HTML document into a [`StaticPage`] by running every query the
//! extractors will make up front. The result owns plain strings only, so it
//! is `Send + Sync` and holds no reference to the parsed tree.
//!
//! Static HTML has no layout, so sections and viewport stay empty and
//! `activeSection` is never set for pages parsed here.

use page_context_core::models::HeadingLevel;
use page_context_core::source::memory::StaticPage;
use page_context_core::source::{FormField, MatchedElement};
use page_context_core::tables::Tables;
use scraper::{ElementRef, Html, Selector};

const FORM_FIELDS: &str = "form input[name], form select[name], form textarea[name]";

/// Parse `html` served from `url`.
///
/// Container and last-updated selectors come from `tables`. A selector that
/// fails to parse is logged and skipped.
pub fn parse_page(url: &str, html: &str, tables: &Tables) -> StaticPage {
    let document = Html::parse_document(html);
    let mut page = StaticPage::new(url);

    if let Some(sel) = selector("title") {
        if let Some(title) = document.select(&sel).next() {
            page.title = collapse_whitespace(&element_text(title));
        }
    }

    if let Some(sel) = selector("meta") {
        for meta in document.select(&sel) {
            let el = meta.value();
            let key = el.attr("name").or_else(|| el.attr("property"));
            if let (Some(key), Some(content)) = (key, el.attr("content")) {
                page.meta.push((key.to_string(), content.to_string()));
            }
        }
    }

    for level in HeadingLevel::ALL {
        let Some(sel) = selector(level.tag()) else {
            continue;
        };
        for heading in document.select(&sel) {
            page = page.with_heading(level, element_text(heading));
        }
    }

    if let Some(p) = selector("p") {
        for css in &tables.content_selectors {
            let Some(sel) = selector(css) else {
                continue;
            };
            if let Some(container) = document.select(&sel).next() {
                let paragraphs: Vec<String> = container.select(&p).map(element_text).collect();
                page.containers.push((css.clone(), paragraphs));
            }
        }
    }

    if let Some(sel) = selector(FORM_FIELDS) {
        for field in document.select(&sel) {
            let el = field.value();
            let Some(name) = el.attr("name") else {
                continue;
            };
            page.form_fields.push(FormField {
                name: name.to_string(),
                aria_label: el.attr("aria-label").map(str::to_string),
                placeholder: el.attr("placeholder").map(str::to_string),
            });
        }
    }

    for css in &tables.last_updated_selectors {
        let Some(sel) = selector(css) else {
            continue;
        };
        if let Some(el) = document.select(&sel).next() {
            page.matches.push((
                css.clone(),
                MatchedElement {
                    datetime: el.value().attr("datetime").map(str::to_string),
                    text: element_text(el),
                },
            ));
        }
    }

    page
}

fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(sel) => Some(sel),
        Err(e) => {
            tracing::warn!("Failed to parse selector '{}': {}", css, e);
            None
        }
    }
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
