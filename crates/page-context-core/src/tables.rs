//! Lookup tables driving location detection, topic classification, and
//! content selection.
//!
//! The tables are data, not code: [`Tables::builtin`] returns the shipped
//! defaults, and hosts may deserialize a replacement (the app crate reads
//! one from TOML). Once loaded they are shared behind an `Arc` and never
//! modified.
//!
//! Every list is ordered. Location detection takes the first city and the
//! first county that match, and topics are reported in table order.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::models::Topic;

/// Keywords that trigger one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicRule {
    pub topic: Topic,
    pub keywords: Vec<String>,
}

/// Replaces the derived jurisdiction for one city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JurisdictionOverride {
    /// Lower-case city name as it appears in [`Tables::cities`].
    pub city: String,
    pub jurisdiction: String,
}

/// All fixed configuration used by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tables {
    #[serde(default = "default_cities")]
    pub cities: Vec<String>,
    #[serde(default = "default_counties")]
    pub counties: Vec<String>,
    #[serde(default = "default_state")]
    pub state: String,
    #[serde(default = "default_overrides")]
    pub jurisdiction_overrides: Vec<JurisdictionOverride>,
    #[serde(default = "default_fire_keywords")]
    pub fire_keywords: Vec<String>,
    #[serde(default = "default_topics")]
    pub topics: Vec<TopicRule>,
    #[serde(default = "default_content_selectors")]
    pub content_selectors: Vec<String>,
    #[serde(default = "default_last_updated_selectors")]
    pub last_updated_selectors: Vec<String>,
}

impl Default for Tables {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Tables {
    /// The shipped tables.
    pub fn builtin() -> Self {
        Self {
            cities: default_cities(),
            counties: default_counties(),
            state: default_state(),
            jurisdiction_overrides: default_overrides(),
            fire_keywords: default_fire_keywords(),
            topics: default_topics(),
            content_selectors: default_content_selectors(),
            last_updated_selectors: default_last_updated_selectors(),
        }
    }

    /// Reject tables the pipeline cannot use.
    pub fn validate(&self) -> Result<()> {
        if self.cities.is_empty() && self.counties.is_empty() {
            bail!("tables: cities and counties must not both be empty");
        }
        if self.topics.is_empty() {
            bail!("tables: topics must not be empty");
        }
        for (i, rule) in self.topics.iter().enumerate() {
            if self.topics[..i].iter().any(|r| r.topic == rule.topic) {
                bail!("tables: topic '{}' is listed more than once", rule.topic);
            }
            if rule.keywords.iter().any(|k| k.trim().is_empty()) {
                bail!("tables: topic '{}' has an empty keyword", rule.topic);
            }
        }
        if self.content_selectors.is_empty() {
            bail!("tables: content_selectors must not be empty");
        }
        Ok(())
    }

    /// Override jurisdiction for `city`, compared case-insensitively.
    pub fn jurisdiction_override(&self, city: &str) -> Option<&str> {
        self.jurisdiction_overrides
            .iter()
            .find(|o| o.city.eq_ignore_ascii_case(city))
            .map(|o| o.jurisdiction.as_str())
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_cities() -> Vec<String> {
    strings(&[
        "altadena",
        "pasadena",
        "la canada flintridge",
        "glendale",
        "burbank",
        "los angeles",
    ])
}

fn default_counties() -> Vec<String> {
    strings(&["los angeles", "la county", "pasadena county"])
}

fn default_state() -> String {
    "California".to_string()
}

fn default_overrides() -> Vec<JurisdictionOverride> {
    vec![JurisdictionOverride {
        city: "pasadena".to_string(),
        jurisdiction: "Los Angeles County".to_string(),
    }]
}

fn default_fire_keywords() -> Vec<String> {
    strings(&["fire", "recovery", "rebuild", "debris", "eaton", "wildfire"])
}

fn rule(topic: Topic, keywords: &[&str]) -> TopicRule {
    TopicRule {
        topic,
        keywords: strings(keywords),
    }
}

fn default_topics() -> Vec<TopicRule> {
    vec![
        rule(
            Topic::DebrisRemoval,
            &["debris", "removal", "cleanup", "hazardous", "right of entry", "army corps"],
        ),
        rule(
            Topic::Permits,
            &["permit", "building", "construction", "plan check", "inspection", "zoning"],
        ),
        rule(
            Topic::Insurance,
            &["insurance", "claim", "policy", "coverage", "adjuster", "deductible"],
        ),
        rule(
            Topic::FinancialAssistance,
            &["financial", "assistance", "grant", "loan", "fema", "disaster relief"],
        ),
        rule(
            Topic::Housing,
            &["housing", "shelter", "rental", "temporary", "accommodation", "hotel"],
        ),
        rule(
            Topic::Legal,
            &["legal", "lawyer", "attorney", "lawsuit", "rights", "litigation"],
        ),
        rule(
            Topic::Rebuilding,
            &["rebuild", "reconstruction", "architect", "contractor", "design", "floor plan"],
        ),
        rule(
            Topic::Safety,
            &["safety", "hazard", "air quality", "water quality", "toxic", "asbestos"],
        ),
        rule(
            Topic::Timeline,
            &["timeline", "deadline", "schedule", "due date", "phase", "duration"],
        ),
        rule(
            Topic::Contact,
            &["contact", "phone", "email", "office", "hotline", "call center"],
        ),
    ]
}

fn default_content_selectors() -> Vec<String> {
    strings(&["main", "article", ".content", "#content", "[role=\"main\"]"])
}

fn default_last_updated_selectors() -> Vec<String> {
    strings(&[
        "[data-last-updated]",
        ".last-updated",
        ".updated-date",
        "time.updated",
    ])
}
