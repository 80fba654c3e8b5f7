//! One-shot commands: `pagectx extract`, `classify`, and `chat-payload`.
//!
//! Results go to stdout; logs go to stderr.

use anyhow::Result;
use page_context_core::chat::{greeting, ChatRequest};

use crate::config::Config;
use crate::pipeline::Pipeline;

/// Print the full context as pretty JSON.
pub async fn run_extract(config: &Config, source: &str) -> Result<()> {
    let pipeline = Pipeline::from_config(config)?;
    let context = pipeline.extract(source).await?;
    println!("{}", serde_json::to_string_pretty(&context)?);
    Ok(())
}

/// Print the classification summary, one field per line.
pub async fn run_classify(config: &Config, source: &str) -> Result<()> {
    let pipeline = Pipeline::from_config(config)?;
    let context = pipeline.extract(source).await?;

    let topics = context
        .topics
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let loc = &context.location;

    println!(
        "primary topic: {}",
        context.primary_topic.map(|t| t.as_str()).unwrap_or("none")
    );
    println!("topics: {}", if topics.is_empty() { "none" } else { topics.as_str() });
    println!("location detected: {}", loc.detected);
    println!("  city: {}", loc.city.as_deref().unwrap_or("-"));
    println!("  county: {}", loc.county.as_deref().unwrap_or("-"));
    println!("  state: {}", loc.state.as_deref().unwrap_or("-"));
    println!("  jurisdiction: {}", loc.jurisdiction.as_deref().unwrap_or("-"));
    println!("greeting: {}", greeting(pipeline.extractor.tables(), &context));
    Ok(())
}

/// Print the chat backend request body for `source`.
pub async fn run_chat_payload(
    config: &Config,
    source: &str,
    message: &str,
    conversation_id: Option<String>,
    first: Option<bool>,
) -> Result<()> {
    if message.trim().is_empty() {
        anyhow::bail!("message must not be empty");
    }
    let pipeline = Pipeline::from_config(config)?;
    let context = pipeline.extract(source).await?;
    let mut request = ChatRequest::new(message, context);
    if let Some(id) = conversation_id {
        request = request.in_conversation(id);
    }
    if let Some(first) = first {
        request = request.first_message(first);
    }
    println!("{}", serde_json::to_string_pretty(&request)?);
    Ok(())
}
