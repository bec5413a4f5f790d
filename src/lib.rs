// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Client-side search for static sites.
//!
//! A static-site generator writes an elasticlunr-format index next to the
//! pages. This crate loads that index lazily, runs queries against it, and
//! turns each hit into a short teaser: the 30-word window of the body that
//! best covers the query, with matched words in bold.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  text.rs   │────▶│  index/     │────▶│ session/    │
//! │ (tokenize, │     │ (ElasticIdx,│     │ (loader,    │
//! │  stem)     │     │  builder)   │     │  state, UI) │
//! └────────────┘     └─────────────┘     └─────────────┘
//!        │                                      │
//!        ▼                                      ▼
//! ┌────────────┐                        ┌─────────────┐
//! │ teaser.rs  │───────────────────────▶│ render.rs   │
//! └────────────┘                        └─────────────┘
//! ```
//!
//! The UI layer is a pure state machine ([`session::SessionState`]) driven by
//! events and an explicit clock. The browser binding lives in `runtime::wasm`
//! behind the `wasm` feature; the `glean` binary drives the same code from a
//! terminal.
//!
//! # Usage
//!
//! ```
//! use glean::{make_teaser, IndexBuilder, IndexDocument, QueryOptions};
//!
//! let mut builder = IndexBuilder::new();
//! builder.add_document(&IndexDocument::new("/fox/", "Foxes", "The quick brown fox."));
//! let index = builder.build();
//!
//! let hits = index.search("fox", &QueryOptions::default());
//! assert_eq!(hits[0].doc_ref, "/fox/");
//! assert_eq!(
//!     make_teaser(&hits[0].doc.body, &["fox"]),
//!     "The quick brown <b>fox.</b>…"
//! );
//! ```

pub mod config;
pub mod error;
pub mod index;
pub mod session;
pub mod teaser;
pub mod testing;
pub mod text;
mod types;

#[cfg(feature = "wasm")]
mod runtime;

pub use config::SessionConfig;
pub use error::{Result, SearchError};
pub use index::{ElasticIndex, IndexBuilder};
pub use session::{Effect, Env, SearchSession, SessionState, UiEvent};
pub use teaser::make_teaser;
pub use types::{
    parse_terms, BoolMode, FieldOptions, IndexDocument, QueryOptions, SearchResult,
};
