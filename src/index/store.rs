// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Stored documents and per-field token counts.

use crate::types::IndexDocument;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Stored fields of one document. Fields other than `title` and `body` are
/// kept as-is so a loaded index serializes back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredFields {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStore {
    #[serde(default = "default_save")]
    pub save: bool,
    #[serde(default)]
    pub docs: BTreeMap<String, Option<StoredFields>>,
    #[serde(default)]
    pub doc_info: BTreeMap<String, BTreeMap<String, usize>>,
    #[serde(default)]
    pub length: usize,
}

fn default_save() -> bool {
    true
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self {
            save: true,
            docs: BTreeMap::new(),
            doc_info: BTreeMap::new(),
            length: 0,
        }
    }
}

impl DocumentStore {
    /// The stored document, or a bare reference when the index was built
    /// without storing documents.
    pub fn get(&self, doc_ref: &str) -> IndexDocument {
        match self.docs.get(doc_ref) {
            Some(Some(fields)) => IndexDocument::new(doc_ref, &fields.title, &fields.body),
            _ => IndexDocument::new(doc_ref, "", ""),
        }
    }

    pub fn contains(&self, doc_ref: &str) -> bool {
        self.docs.contains_key(doc_ref)
    }

    /// Token count of `field` in the document, 0 when unknown.
    pub fn field_length(&self, doc_ref: &str, field: &str) -> usize {
        self.doc_info
            .get(doc_ref)
            .and_then(|info| info.get(field))
            .copied()
            .unwrap_or(0)
    }

    pub fn insert(&mut self, doc: &IndexDocument, ref_field: &str) {
        if !self.contains(&doc.doc_ref) {
            self.length += 1;
        }
        let stored = self.save.then(|| {
            let mut extra = BTreeMap::new();
            extra.insert(ref_field.to_string(), Value::String(doc.doc_ref.clone()));
            StoredFields {
                title: doc.title.clone(),
                body: doc.body.clone(),
                extra,
            }
        });
        self.docs.insert(doc.doc_ref.clone(), stored);
    }

    pub fn set_field_length(&mut self, doc_ref: &str, field: &str, length: usize) {
        self.doc_info
            .entry(doc_ref.to_string())
            .or_default()
            .insert(field.to_string(), length);
    }
}
