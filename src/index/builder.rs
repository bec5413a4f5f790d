// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Build an index in the same format a static-site generator would emit.
//!
//! Each field goes through the text pipeline; the field length is the token
//! count and a token's frequency is `sqrt(occurrences)`.

use super::{DocumentStore, ElasticIndex, InvertedField, FORMAT_VERSION};
use crate::text::pipeline;
use crate::types::IndexDocument;
use std::collections::{BTreeMap, HashMap};

const DEFAULT_FIELDS: &[&str] = &["title", "body"];

pub struct IndexBuilder {
    fields: Vec<String>,
    ref_field: String,
    store: DocumentStore,
    index: BTreeMap<String, InvertedField>,
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexBuilder {
    /// Builder indexing `title` and `body`, storing documents.
    pub fn new() -> Self {
        Self::with_fields(DEFAULT_FIELDS.iter().copied())
    }

    pub fn with_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        let index = fields
            .iter()
            .map(|f| (f.clone(), InvertedField::default()))
            .collect();
        Self {
            fields,
            ref_field: "id".to_string(),
            store: DocumentStore::default(),
            index,
        }
    }

    /// Keep only references in the document store.
    pub fn without_documents(mut self) -> Self {
        self.store.save = false;
        self
    }

    pub fn add_document(&mut self, doc: &IndexDocument) -> &mut Self {
        self.store.insert(doc, &self.ref_field);

        for field in &self.fields {
            let tokens = pipeline(doc.field(field));
            self.store
                .set_field_length(&doc.doc_ref, field, tokens.len());

            let mut counts: HashMap<&str, usize> = HashMap::with_capacity(tokens.len());
            for token in &tokens {
                *counts.entry(token.as_str()).or_insert(0) += 1;
            }

            if let Some(inverted) = self.index.get_mut(field) {
                for (token, count) in counts {
                    inverted.add_token(token, &doc.doc_ref, (count as f64).sqrt());
                }
            }
        }
        self
    }

    pub fn add_documents<'a, I>(&mut self, docs: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a IndexDocument>,
    {
        for doc in docs {
            self.add_document(doc);
        }
        self
    }

    pub fn build(self) -> ElasticIndex {
        ElasticIndex {
            version: FORMAT_VERSION.to_string(),
            fields: self.fields,
            ref_field: self.ref_field,
            lang: Some("English".to_string()),
            pipeline: vec![
                "trimmer".to_string(),
                "stopWordFilter".to_string(),
                "stemmer".to_string(),
            ],
            document_store: self.store,
            index: self.index,
        }
    }
}
