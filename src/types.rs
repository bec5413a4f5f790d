// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Documents, results, and query options.
//!
//! The shapes here mirror what a static-site index file stores and what the
//! query function hands back. Nothing in this module owns behavior; it is the
//! vocabulary shared by the index, the teaser engine, and the session.
//!
//! # Invariants
//!
//! - **IndexDocument**: `ref` is unique within an index. Documents are immutable
//!   once the index is loaded.
//! - **SearchResult**: ephemeral. One set per query, superseded by the next one.
//! - **QueryOptions**: only fields listed in `fields` are searched. A field with
//!   `boost == 0` is skipped entirely.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A document stored in the index.
///
/// `ref` is the document's URL or path. It is what a selected result navigates to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDocument {
    #[serde(rename = "id", alias = "ref")]
    pub doc_ref: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl IndexDocument {
    pub fn new(doc_ref: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            doc_ref: doc_ref.into(),
            title: title.into(),
            body: body.into(),
        }
    }

    /// Text of a named field. Unknown fields read as empty.
    pub fn field(&self, name: &str) -> &str {
        match name {
            "title" => &self.title,
            "body" => &self.body,
            _ => "",
        }
    }
}

/// One hit returned by [`ElasticIndex::search`](crate::ElasticIndex::search).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    #[serde(rename = "ref")]
    pub doc_ref: String,
    pub score: f64,
    pub doc: IndexDocument,
}

/// How per-token matches combine within a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BoolMode {
    /// Every query token must match.
    #[default]
    And,
    /// Any query token may match.
    Or,
}

/// Per-field query configuration.
///
/// `bool` and `expand` fall back to the global values in [`QueryOptions`] when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOptions {
    #[serde(default = "default_boost")]
    pub boost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bool: Option<BoolMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expand: Option<bool>,
}

fn default_boost() -> f64 {
    1.0
}

impl FieldOptions {
    pub fn boost(boost: f64) -> Self {
        Self {
            boost,
            bool: None,
            expand: None,
        }
    }
}

/// Options passed to the query function, in the index library's own shape:
///
/// ```json
/// { "bool": "AND", "fields": { "title": { "boost": 2 }, "body": { "boost": 1 } } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryOptions {
    pub bool: BoolMode,
    pub expand: bool,
    pub fields: BTreeMap<String, FieldOptions>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        let mut fields = BTreeMap::new();
        fields.insert("title".to_string(), FieldOptions::boost(2.0));
        fields.insert("body".to_string(), FieldOptions::boost(1.0));
        Self {
            bool: BoolMode::And,
            expand: false,
            fields,
        }
    }
}

impl QueryOptions {
    /// Effective boolean mode for a field.
    pub fn bool_for(&self, field: &str) -> BoolMode {
        self.fields
            .get(field)
            .and_then(|f| f.bool)
            .unwrap_or(self.bool)
    }

    /// Effective prefix-expansion flag for a field.
    pub fn expand_for(&self, field: &str) -> bool {
        self.fields
            .get(field)
            .and_then(|f| f.expand)
            .unwrap_or(self.expand)
    }
}

/// Split a raw query into terms: trimmed, whitespace-separated, never empty.
pub fn parse_terms(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_string).collect()
}
