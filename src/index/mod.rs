// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The prebuilt inverted index the search session queries.
//!
//! Static-site generators emit `search_index.<lang>.json` in the elasticlunr
//! serialized format: a document store plus one character trie per field.
//! [`ElasticIndex`] loads that file as-is and answers queries with the same
//! scoring the browser library uses, so a page sees the same ranking whether
//! the query runs here or in JavaScript.
//!
//! # Scoring
//!
//! For each searched field and each query token:
//!
//! ```text
//! idf   = 1 + ln(N / (df + 1))
//! norm  = 1 / sqrt(fieldLength)          (1 when the field is empty)
//! score = tf * idf * norm * penalty      (penalty < 1 for prefix-expanded keys)
//! ```
//!
//! Token scores merge with AND (intersection) or OR (union), get scaled by the
//! fraction of query tokens the document matched, then by the field boost.
//! Field scores sum. Ranking is descending score; ties keep `ref` order.

mod builder;
mod inverted;
mod store;

pub use builder::IndexBuilder;
pub use inverted::{InvertedField, TermFrequency, TrieNode};
pub use store::{DocumentStore, StoredFields};

use crate::error::Result;
use crate::text::pipeline;
use crate::types::{BoolMode, IndexDocument, QueryOptions, SearchResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Serialized format version written by [`IndexBuilder`].
pub const FORMAT_VERSION: &str = "0.9.5";

/// Weight given to a prefix-expanded key relative to an exact one.
const EXPANSION_PENALTY: f64 = 0.15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElasticIndex {
    #[serde(default)]
    version: String,
    fields: Vec<String>,
    #[serde(rename = "ref", default = "default_ref_field")]
    ref_field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lang: Option<String>,
    #[serde(default)]
    pipeline: Vec<String>,
    #[serde(default)]
    document_store: DocumentStore,
    #[serde(default)]
    index: BTreeMap<String, InvertedField>,
}

fn default_ref_field() -> String {
    "id".to_string()
}

impl ElasticIndex {
    /// Parse an index file.
    pub fn load(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn lang(&self) -> Option<&str> {
        self.lang.as_deref()
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.document_store.length
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn document(&self, doc_ref: &str) -> Option<IndexDocument> {
        self.document_store
            .contains(doc_ref)
            .then(|| self.document_store.get(doc_ref))
    }

    pub fn field_index(&self, field: &str) -> Option<&InvertedField> {
        self.index.get(field)
    }

    fn idf(&self, field: &InvertedField, token: &str) -> f64 {
        let df = field.doc_freq(token) as f64;
        1.0 + (self.document_store.length as f64 / (df + 1.0)).ln()
    }

    /// Run `query` against the configured fields.
    ///
    /// Results come back best-first, all of them; capping is the caller's job.
    pub fn search(&self, query: &str, options: &QueryOptions) -> Vec<SearchResult> {
        let tokens = pipeline(query);
        if tokens.is_empty() {
            return Vec::new();
        }

        let mut totals: BTreeMap<String, f64> = BTreeMap::new();
        for (name, field_options) in &options.fields {
            if field_options.boost == 0.0 {
                continue;
            }
            let Some(field) = self.index.get(name) else {
                debug!(field = %name, "query field is not indexed");
                continue;
            };

            let scores = self.field_search(
                name,
                field,
                &tokens,
                options.bool_for(name),
                options.expand_for(name),
            );
            for (doc_ref, score) in scores {
                *totals.entry(doc_ref).or_insert(0.0) += score * field_options.boost;
            }
        }

        let mut results: Vec<SearchResult> = totals
            .into_iter()
            .map(|(doc_ref, score)| SearchResult {
                doc: self.document_store.get(&doc_ref),
                doc_ref,
                score,
            })
            .collect();
        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results
    }

    fn field_search(
        &self,
        name: &str,
        field: &InvertedField,
        tokens: &[String],
        bool_mode: BoolMode,
        expand: bool,
    ) -> BTreeMap<String, f64> {
        let mut scores: Option<BTreeMap<String, f64>> = None;
        let mut matched_tokens: BTreeMap<&str, usize> = BTreeMap::new();

        for token in tokens {
            let keys = if expand {
                field.expand(token)
            } else {
                vec![token.clone()]
            };

            let mut token_scores: BTreeMap<String, f64> = BTreeMap::new();
            for key in &keys {
                let Some(docs) = field.docs(key) else {
                    continue;
                };
                let idf = self.idf(field, key);
                let penalty = if key == token {
                    1.0
                } else {
                    (1.0 - (key.len() - token.len()) as f64 / key.len() as f64)
                        * EXPANSION_PENALTY
                };

                for (doc_ref, freq) in docs {
                    if bool_mode == BoolMode::And {
                        if let Some(prev) = &scores {
                            if !prev.contains_key(doc_ref) {
                                continue;
                            }
                        }
                    }
                    if key == token {
                        *matched_tokens.entry(doc_ref.as_str()).or_insert(0) += 1;
                    }

                    let field_length = self.document_store.field_length(doc_ref, name);
                    let norm = if field_length == 0 {
                        1.0
                    } else {
                        1.0 / (field_length as f64).sqrt()
                    };
                    *token_scores.entry(doc_ref.clone()).or_insert(0.0) +=
                        freq.tf * idf * norm * penalty;
                }
            }

            scores = Some(match scores {
                None => token_scores,
                Some(acc) => merge_scores(acc, token_scores, bool_mode),
            });
        }

        let mut scores = scores.unwrap_or_default();
        let query_len = tokens.len() as f64;
        for (doc_ref, score) in scores.iter_mut() {
            if let Some(&matched) = matched_tokens.get(doc_ref.as_str()) {
                *score *= matched as f64 / query_len;
            }
        }
        scores
    }
}

fn merge_scores(
    mut acc: BTreeMap<String, f64>,
    scores: BTreeMap<String, f64>,
    bool_mode: BoolMode,
) -> BTreeMap<String, f64> {
    match bool_mode {
        BoolMode::And => scores
            .into_iter()
            .filter_map(|(doc_ref, score)| acc.get(&doc_ref).map(|prev| (doc_ref, prev + score)))
            .collect(),
        BoolMode::Or => {
            for (doc_ref, score) in scores {
                *acc.entry(doc_ref).or_insert(0.0) += score;
            }
            acc
        }
    }
}
