//! # Page Context Core
//!
//! Shared, host-agnostic logic for page-context: the [`PageContext`] data
//! model, the [`PageSource`] abstraction over "the current document", the
//! lookup tables, and the extraction pipeline.
//!
//! This crate contains no tokio, network, filesystem I/O, or HTML parser.
//! Hosts (the `page-context` app crate, a headless browser harness, a test)
//! provide a [`PageSource`] and call [`ContextExtractor::extract`].
//!
//! ```text
//! PageSource ──▶ extract ──▶ location / keywords ──▶ topics ──▶ PageContext
//! ```
//!
//! [`PageContext`]: models::PageContext
//! [`PageSource`]: source::PageSource
//! [`ContextExtractor::extract`]: compose::ContextExtractor::extract

pub mod chat;
pub mod compose;
pub mod extract;
pub mod keywords;
pub mod location;
pub mod models;
pub mod source;
pub mod tables;
pub mod topics;
