//! `pagectx watch`: run the monitor over a live page driven from stdin.
//!
//! The initial page is extracted once at start, as on mount. After that,
//! stdin lines act as browser events:
//!
//! | Line | Effect |
//! |------|--------|
//! | `goto <source>` | load `<source>` and make it the current page |
//! | `scroll` | dispatch a scroll event |
//! | `quit` | stop watching |
//!
//! Each context change prints one compact JSON line on stdout. EOF and
//! Ctrl-C also stop the monitor.

use std::sync::Arc;

use anyhow::Result;
use page_context_core::models::PageContext;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::config::Config;
use crate::live::LivePage;
use crate::monitor::{self, MonitorHandle, MonitorOptions};
use crate::pipeline::Pipeline;

/// A parsed stdin command.
#[derive(Debug, PartialEq, Eq)]
enum Event<'a> {
    Goto(&'a str),
    Scroll,
    Quit,
}

fn parse_event(line: &str) -> Option<Event<'_>> {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some(("goto", target)) if !target.trim().is_empty() => Some(Event::Goto(target.trim())),
        _ => match line {
            "scroll" => Some(Event::Scroll),
            "quit" | "exit" => Some(Event::Quit),
            _ => None,
        },
    }
}

fn print_context(context: &PageContext) {
    match serde_json::to_string(context) {
        Ok(line) => println!("{}", line),
        Err(e) => tracing::error!("failed to serialize context: {}", e),
    }
}

pub async fn run_watch(config: &Config, source: &str) -> Result<()> {
    let pipeline = Pipeline::from_config(config)?;
    let live = Arc::new(LivePage::new(pipeline.load(source).await?));
    print_context(&pipeline.extractor.extract(live.as_ref()));

    let handle = monitor::start(
        live.clone(),
        pipeline.extractor.clone(),
        MonitorOptions::from(&config.monitor),
        |context| print_context(&context),
    );

    tokio::select! {
        res = read_events(&pipeline, &live, &handle) => res?,
        _ = tokio::signal::ctrl_c() => tracing::info!("interrupted"),
    }

    handle.stop();
    Ok(())
}

async fn read_events(pipeline: &Pipeline, live: &LivePage, handle: &MonitorHandle) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_event(&line) {
            Some(Event::Goto(target)) => match pipeline.load(target).await {
                Ok(page) => {
                    tracing::info!(url = %page.url, "navigated");
                    live.navigate(page);
                }
                Err(e) => tracing::warn!("{:#}", e),
            },
            Some(Event::Scroll) => handle.notify_scroll(),
            Some(Event::Quit) => break,
            None if line.trim().is_empty() => {}
            None => tracing::warn!("unrecognised command: {}", line.trim()),
        }
    }
    Ok(())
}
