// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.

#![doc(hidden)]

use crate::error::SearchError;
use crate::index::{ElasticIndex, IndexBuilder};
use crate::session::{FetchResponse, Fetcher};
use crate::types::IndexDocument;
use futures::channel::oneshot;
use futures::future::{FutureExt, LocalBoxFuture, Shared};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Shorthand for an [`IndexDocument`].
pub fn doc(doc_ref: &str, title: &str, body: &str) -> IndexDocument {
    IndexDocument::new(doc_ref, title, body)
}

/// A small site: three pages about search, one about Rust, one about bread.
pub fn sample_docs() -> Vec<IndexDocument> {
    vec![
        doc(
            "/rust/ownership/",
            "Ownership in Rust",
            "Rust manages memory through ownership. Every value has a single owner. \
             Search engines written in Rust benefit from this.",
        ),
        doc(
            "/search/intro/",
            "Introduction to search",
            "A search index maps terms to documents. Full-text search ranks documents by relevance.",
        ),
        doc(
            "/search/teasers/",
            "Search result teasers",
            "Teasers show the most relevant window of a document. Matched terms are highlighted in bold.",
        ),
        doc(
            "/cooking/bread/",
            "Baking bread",
            "Flour, water, salt and yeast. Knead the dough and let it rise overnight.",
        ),
    ]
}

pub fn sample_index() -> ElasticIndex {
    let mut builder = IndexBuilder::new();
    builder.add_documents(&sample_docs());
    builder.build()
}

/// An index of `n` pages that all mention cats and dogs.
pub fn pets_index(n: usize) -> ElasticIndex {
    let docs: Vec<IndexDocument> = (0..n)
        .map(|i| {
            doc(
                &format!("/pets/{}/", i),
                &format!("Pet note {}", i),
                "Cats and dogs can share a home. Dogs bark, cats purr.",
            )
        })
        .collect();
    let mut builder = IndexBuilder::new();
    builder.add_documents(&docs);
    builder.build()
}

/// A [`Fetcher`] answering from a fixed table. Unknown paths are 404.
///
/// Every requested path is recorded in order.
#[derive(Default)]
pub struct StaticFetcher {
    responses: HashMap<String, Result<FetchResponse, SearchError>>,
    calls: Rc<RefCell<Vec<String>>>,
    gate: Option<Shared<oneshot::Receiver<()>>>,
}

/// Holds every fetch of a gated [`StaticFetcher`] pending until opened.
pub struct Gate(oneshot::Sender<()>);

impl Gate {
    pub fn open(self) {
        let _ = self.0.send(());
    }
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: &str, status: u16, body: impl Into<String>) -> Self {
        self.responses
            .insert(path.to_string(), Ok(FetchResponse::new(status, body)));
        self
    }

    /// Make `path` fail at the transport level.
    pub fn failing(mut self, path: &str, message: &str) -> Self {
        self.responses.insert(
            path.to_string(),
            Err(SearchError::Fetch {
                path: path.to_string(),
                message: message.to_string(),
            }),
        );
        self
    }

    pub fn gated(mut self) -> (Self, Gate) {
        let (tx, rx) = oneshot::channel();
        self.gate = Some(rx.shared());
        (self, Gate(tx))
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl Fetcher for StaticFetcher {
    fn fetch(&self, path: &str) -> LocalBoxFuture<'static, Result<FetchResponse, SearchError>> {
        self.calls.borrow_mut().push(path.to_string());
        let response = self
            .responses
            .get(path)
            .cloned()
            .unwrap_or_else(|| Ok(FetchResponse::not_found()));
        let gate = self.gate.clone();
        async move {
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            response
        }
        .boxed_local()
    }
}
