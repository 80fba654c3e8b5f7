//! Topic classification against the topic table.
//!
//! A topic qualifies when at least [`MIN_TOPIC_MATCHES`] of its keywords
//! occur as substrings of the combined keyword and content text. Results
//! follow table order, not match count.

use crate::models::Topic;
use crate::tables::Tables;

pub const MIN_TOPIC_MATCHES: usize = 2;

/// Qualifying topics in table order. The first one is the primary topic.
pub fn classify_topics<K, C>(tables: &Tables, keywords: &[K], content_blocks: &[C]) -> Vec<Topic>
where
    K: AsRef<str>,
    C: AsRef<str>,
{
    let haystack = keywords
        .iter()
        .map(AsRef::as_ref)
        .chain(content_blocks.iter().map(AsRef::as_ref))
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    tables
        .topics
        .iter()
        .filter(|rule| {
            let hits = rule
                .keywords
                .iter()
                .filter(|k| haystack.contains(&k.to_lowercase()))
                .count();
            hits >= MIN_TOPIC_MATCHES
        })
        .map(|rule| rule.topic)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_of_two_keywords() {
        let tables = Tables::builtin();
        let topics = classify_topics::<&str, &str>(
            &tables,
            &["permit", "building", "construction", "debris"],
            &[],
        );
        assert!(topics.contains(&Topic::Permits));
        assert!(!topics.contains(&Topic::DebrisRemoval));
        assert_eq!(topics, vec![Topic::Permits]);
    }

    #[test]
    fn table_order_not_match_count() {
        let tables = Tables::builtin();
        let topics = classify_topics(
            &tables,
            &["contact", "phone", "email", "office"],
            &["Insurance claim help for your policy and coverage questions."],
        );
        assert_eq!(topics, vec![Topic::Insurance, Topic::Contact]);
    }

    #[test]
    fn content_blocks_count_towards_matches() {
        let tables = Tables::builtin();
        let topics = classify_topics::<&str, &str>(
            &tables,
            &[],
            &["Temporary housing and shelter options are listed below."],
        );
        assert_eq!(topics, vec![Topic::Housing]);
    }

    #[test]
    fn no_topics_when_nothing_matches() {
        let tables = Tables::builtin();
        let topics = classify_topics::<&str, &str>(&tables, &["weather", "sunny"], &[]);
        assert!(topics.is_empty());
    }
}
