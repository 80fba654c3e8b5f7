//! Gazetteer-based location detection.
//!
//! Matching is plain substring containment against the lower-cased URL and
//! a corpus of title plus h1/h2 text. The first city in table order that
//! matches wins, and counties are matched independently the same way.

use crate::models::Location;
use crate::tables::Tables;

/// Detect city, county, state, and jurisdiction.
pub fn detect_location(tables: &Tables, url: &str, title: &str, headings: &[&str]) -> Location {
    let url = url.to_lowercase();
    let mut corpus = title.to_lowercase();
    for heading in headings {
        corpus.push(' ');
        corpus.push_str(&heading.to_lowercase());
    }

    let matches = |name: &String| {
        let name = name.to_lowercase();
        url.contains(&name) || corpus.contains(&name)
    };
    let city = tables.cities.iter().find(|c| matches(c)).map(|c| title_case(c));
    let county = tables.counties.iter().find(|c| matches(c)).map(|c| title_case(c));

    let detected = city.is_some() || county.is_some();
    let jurisdiction = city
        .as_deref()
        .and_then(|c| tables.jurisdiction_override(c))
        .map(str::to_string)
        .or_else(|| county.clone());

    Location {
        detected,
        state: detected.then(|| tables.state.clone()),
        city,
        county,
        jurisdiction,
    }
}

/// Capitalize the first letter of every space-separated word.
fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
