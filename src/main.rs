//! # Page Context CLI (`pagectx`)
//!
//! Extracts structured context (headings, content, keywords, location,
//! topics) from fire-recovery web pages.
//!
//! ## Usage
//!
//! ```bash
//! pagectx --config ./config/pagectx.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `pagectx extract <source>` | Print the page context as JSON |
//! | `pagectx classify <source>` | Print topics, location, and greeting |
//! | `pagectx chat-payload <source> --message <m> [--first]` | Print the chat backend request |
//! | `pagectx watch <source>` | Monitor a live page driven from stdin |
//! | `pagectx serve` | Start the HTTP server |
//!
//! A `<source>` is a file path or an `http(s)://` URL.
//!
//! Logs go to stderr; set `RUST_LOG` (e.g. `RUST_LOG=debug`) to change the
//! level.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use page_context::{config, inspect, pipeline, server, watch};

/// Page context extraction and topic classification.
#[derive(Parser)]
#[command(
    name = "pagectx",
    about = "Extract structured page context from fire-recovery web pages",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/pagectx.toml`. A missing file means built-in
    /// defaults.
    #[arg(long, global = true, default_value = "./config/pagectx.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the page context and print it as JSON.
    Extract {
        /// File path or http(s) URL.
        source: String,
    },

    /// Print primary topic, topics, detected location, and greeting.
    Classify {
        /// File path or http(s) URL.
        source: String,
    },

    /// Print the chat backend request body for a page.
    ChatPayload {
        /// File path or http(s) URL.
        source: String,

        /// The user's chat message.
        #[arg(long)]
        message: String,

        /// Continue an existing conversation.
        #[arg(long)]
        conversation_id: Option<String>,

        /// Set `isFirstMessage` explicitly (`--first` or `--first false`).
        /// Defaults to true unless `--conversation-id` is given.
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        first: Option<bool>,
    },

    /// Monitor a live page; read `goto <source>`, `scroll`, `quit` from stdin.
    ///
    /// Prints one JSON line for the initial page and one per context change.
    Watch {
        /// Initial file path or http(s) URL.
        source: String,
    },

    /// Start the HTTP server on `[server].bind`.
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Extract { source } => {
            inspect::run_extract(&cfg, &source).await?;
        }
        Commands::Classify { source } => {
            inspect::run_classify(&cfg, &source).await?;
        }
        Commands::ChatPayload {
            source,
            message,
            conversation_id,
            first,
        } => {
            inspect::run_chat_payload(&cfg, &source, &message, conversation_id, first).await?;
        }
        Commands::Watch { source } => {
            watch::run_watch(&cfg, &source).await?;
        }
        Commands::Serve => {
            let pipeline = pipeline::Pipeline::from_config(&cfg)?;
            server::run_server(&cfg, Arc::clone(&pipeline.extractor)).await?;
        }
    }

    Ok(())
}
