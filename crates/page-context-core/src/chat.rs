//! Consumers of [`PageContext`] on the chat side.
//!
//! The chat backend accepts `{message, conversationId, context, pageUrl,
//! isFirstMessage}`; [`ChatRequest`] is that body. [`greeting`] and
//! [`is_fire_related`] drive the assistant's opening line and badges. Every
//! context field is treated as optional here.

use serde::{Deserialize, Serialize};

use crate::models::PageContext;
use crate::tables::Tables;

/// Request body for the chat backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    pub context: PageContext,
    pub page_url: String,
    pub is_first_message: bool,
}

impl ChatRequest {
    /// A first message about `context`, with no conversation yet.
    pub fn new(message: impl Into<String>, context: PageContext) -> Self {
        Self {
            message: message.into(),
            conversation_id: None,
            page_url: context.url.clone(),
            context,
            is_first_message: true,
        }
    }

    /// Continue an existing conversation. Clears the first-message flag
    /// unless [`first_message`](Self::first_message) sets it afterwards.
    pub fn in_conversation(mut self, conversation_id: impl Into<String>) -> Self {
        self.conversation_id = Some(conversation_id.into());
        self.is_first_message = false;
        self
    }

    /// Set `isFirstMessage` explicitly. The backend treats it independently
    /// of `conversationId`.
    pub fn first_message(mut self, first: bool) -> Self {
        self.is_first_message = first;
        self
    }
}

/// Whether the page is about fire recovery: any fire keyword in the title,
/// h1/h2 headings, or extracted keywords.
pub fn is_fire_related(tables: &Tables, context: &PageContext) -> bool {
    let mut corpus = context.title.to_lowercase();
    for text in context
        .headings
        .h1
        .iter()
        .chain(&context.headings.h2)
        .chain(&context.keywords)
    {
        corpus.push(' ');
        corpus.push_str(&text.to_lowercase());
    }
    tables
        .fire_keywords
        .iter()
        .any(|k| corpus.contains(&k.to_lowercase()))
}

/// Opening line for the assistant on this page.
pub fn greeting(tables: &Tables, context: &PageContext) -> String {
    let place = context
        .location
        .city
        .as_deref()
        .or(context.location.county.as_deref());
    match (context.primary_topic, place) {
        (Some(topic), Some(place)) => format!(
            "Looking for help with {} in {}? Ask me anything about this page.",
            topic.label(),
            place
        ),
        (Some(topic), None) => format!(
            "Looking for help with {}? Ask me anything about this page.",
            topic.label()
        ),
        (None, Some(place)) => format!(
            "I see you're looking at information for {}. How can I help with your recovery?",
            place
        ),
        (None, None) if is_fire_related(tables, context) => {
            "How can I help with your fire recovery today?".to_string()
        }
        (None, None) => "How can I help you today?".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::ContextExtractor;
    use crate::models::HeadingLevel;
    use crate::source::memory::StaticPage;

    fn context(page: StaticPage) -> PageContext {
        ContextExtractor::default().extract(&page)
    }

    #[test]
    fn request_serializes_backend_shape() {
        let ctx = context(StaticPage::new("https://x.test/altadena"));
        let req = ChatRequest::new("Where do I start?", ctx);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["message"], "Where do I start?");
        assert_eq!(json["pageUrl"], "https://x.test/altadena");
        assert_eq!(json["isFirstMessage"], true);
        assert!(json.get("conversationId").is_none());
        assert_eq!(json["context"]["location"]["city"], "Altadena");
    }

    #[test]
    fn continuing_conversation_clears_first_flag() {
        let ctx = context(StaticPage::new("https://x.test/"));
        let req = ChatRequest::new("And then?", ctx).in_conversation("c-42");
        assert_eq!(req.conversation_id.as_deref(), Some("c-42"));
        assert!(!req.is_first_message);
    }

    #[test]
    fn explicit_first_flag_overrides_conversation() {
        let ctx = context(StaticPage::new("https://x.test/"));
        let req = ChatRequest::new("Hi", ctx)
            .in_conversation("c-7")
            .first_message(true);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["conversationId"], "c-7");
        assert_eq!(json["isFirstMessage"], true);
    }

    #[test]
    fn greeting_mentions_topic_and_place() {
        let ctx = context(
            StaticPage::new("https://x.test/altadena/insurance")
                .with_title("Insurance claim and policy coverage help"),
        );
        assert_eq!(
            greeting(&Tables::builtin(), &ctx),
            "Looking for help with insurance in Altadena? Ask me anything about this page."
        );
    }

    #[test]
    fn greeting_falls_back_to_fire_context() {
        let tables = Tables::builtin();
        let ctx = context(
            StaticPage::new("https://x.test/").with_heading(HeadingLevel::H1, "Eaton Fire updates"),
        );
        assert!(is_fire_related(&tables, &ctx));
        assert_eq!(
            greeting(&tables, &ctx),
            "How can I help with your fire recovery today?"
        );

        let ctx = context(StaticPage::new("https://x.test/").with_title("Bake sale"));
        assert!(!is_fire_related(&tables, &ctx));
        assert_eq!(greeting(&tables, &ctx), "How can I help you today?");
    }
}
