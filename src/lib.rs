//! # Page Context
//!
//! Page context extraction and topic classification for fire-recovery
//! assistance pages.
//!
//! The pure pipeline lives in [`page_context_core`]; this crate adds the
//! native host around it: HTML parsing, page loading, configuration, the
//! page-change monitor, the `pagectx` CLI, and an HTTP server.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌─────────────┐   ┌──────────────┐
//! │  Loaders    │──▶│ HTML parse  │──▶│ ContextExtr. │──▶ PageContext
//! │ file / HTTP │   │ StaticPage  │   │  (core)      │
//! └─────────────┘   └─────────────┘   └──────┬───────┘
//!                                            │
//!                  ┌──────────────┬──────────┤
//!                  ▼              ▼          ▼
//!             ┌─────────┐   ┌─────────┐  ┌─────────┐
//!             │   CLI   │   │ Monitor │  │  HTTP   │
//!             │(pagectx)│   │ (watch) │  │ server  │
//!             └─────────┘   └─────────┘  └─────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`html`] | HTML → page snapshot |
//! | [`load`] | File and HTTP page loaders |
//! | [`live`] | Navigable page for long-running hosts |
//! | [`monitor`] | URL-change monitor with scroll debounce |
//! | [`pipeline`] | Config → extractor + loader wiring |
//! | [`inspect`] | One-shot CLI commands |
//! | [`watch`] | `pagectx watch` |
//! | [`server`] | HTTP server |

pub mod config;
pub mod html;
pub mod inspect;
pub mod live;
pub mod load;
pub mod monitor;
pub mod pipeline;
pub mod server;
pub mod watch;
