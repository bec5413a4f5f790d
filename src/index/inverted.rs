// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-field inverted index stored as a character trie.
//!
//! The on-disk shape nests one object per character:
//!
//! ```json
//! { "root": { "docs": {}, "df": 0,
//!             "f": { "docs": {}, "df": 0,
//!                    "o": { "docs": {}, "df": 0,
//!                           "x": { "docs": { "/a/": { "tf": 1 } }, "df": 1 } } } } }
//! ```
//!
//! `docs` and `df` are the only multi-character keys. Every other key is a
//! child edge labelled with one character.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TermFrequency {
    pub tf: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrieNode {
    #[serde(default)]
    pub docs: BTreeMap<String, TermFrequency>,
    #[serde(default)]
    pub df: usize,
    #[serde(flatten)]
    pub children: BTreeMap<String, TrieNode>,
}

impl TrieNode {
    fn child(&self, c: char) -> Option<&TrieNode> {
        let mut buf = [0u8; 4];
        self.children.get(&*c.encode_utf8(&mut buf))
    }

    fn child_mut(&mut self, c: char) -> &mut TrieNode {
        self.children.entry(c.to_string()).or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvertedField {
    pub root: TrieNode,
}

impl InvertedField {
    /// Node reached by spelling out `token`, if every edge exists.
    pub fn node(&self, token: &str) -> Option<&TrieNode> {
        token.chars().try_fold(&self.root, |node, c| node.child(c))
    }

    /// Documents containing exactly `token`.
    pub fn docs(&self, token: &str) -> Option<&BTreeMap<String, TermFrequency>> {
        self.node(token).map(|n| &n.docs)
    }

    /// Number of documents containing exactly `token`.
    pub fn doc_freq(&self, token: &str) -> usize {
        self.node(token).map_or(0, |n| n.df)
    }

    pub fn term_frequency(&self, token: &str, doc_ref: &str) -> f64 {
        self.docs(token)
            .and_then(|docs| docs.get(doc_ref))
            .map_or(0.0, |f| f.tf)
    }

    /// Every indexed token that starts with `token`, `token` itself included
    /// when it is indexed.
    pub fn expand(&self, token: &str) -> Vec<String> {
        let mut out = Vec::new();
        if token.is_empty() {
            return out;
        }
        if let Some(node) = self.node(token) {
            collect_tokens(node, &mut token.to_string(), &mut out);
        }
        out
    }

    /// Record `tf` for `doc_ref` under `token`.
    pub fn add_token(&mut self, token: &str, doc_ref: &str, tf: f64) {
        let mut node = &mut self.root;
        for c in token.chars() {
            node = node.child_mut(c);
        }
        if !node.docs.contains_key(doc_ref) {
            node.df += 1;
        }
        node.docs.insert(doc_ref.to_string(), TermFrequency { tf });
    }

    /// Count of distinct indexed tokens.
    pub fn vocabulary_size(&self) -> usize {
        fn count(node: &TrieNode) -> usize {
            usize::from(node.df > 0) + node.children.values().map(count).sum::<usize>()
        }
        count(&self.root)
    }
}

fn collect_tokens(node: &TrieNode, prefix: &mut String, out: &mut Vec<String>) {
    if node.df > 0 {
        out.push(prefix.clone());
    }
    for (edge, child) in &node.children {
        prefix.push_str(edge);
        collect_tokens(child, prefix, out);
        prefix.truncate(prefix.len() - edge.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> InvertedField {
        let mut f = InvertedField::default();
        f.add_token("fox", "/a/", 1.0);
        f.add_token("fox", "/b/", 1.4);
        f.add_token("foxglov", "/c/", 1.0);
        f.add_token("dog", "/a/", 1.0);
        f
    }

    #[test]
    fn lookups_walk_the_trie() {
        let f = field();
        assert_eq!(f.doc_freq("fox"), 2);
        assert_eq!(f.doc_freq("fo"), 0);
        assert_eq!(f.doc_freq("cat"), 0);
        assert_eq!(f.term_frequency("fox", "/b/"), 1.4);
        assert_eq!(f.term_frequency("fox", "/c/"), 0.0);
    }

    #[test]
    fn re_adding_a_doc_does_not_bump_df() {
        let mut f = field();
        f.add_token("fox", "/a/", 2.0);
        assert_eq!(f.doc_freq("fox"), 2);
        assert_eq!(f.term_frequency("fox", "/a/"), 2.0);
    }

    #[test]
    fn expand_collects_prefixed_tokens() {
        let f = field();
        assert_eq!(f.expand("fo"), vec!["fox", "foxglov"]);
        assert_eq!(f.expand("fox"), vec!["fox", "foxglov"]);
        assert!(f.expand("").is_empty());
        assert!(f.expand("z").is_empty());
        assert_eq!(f.vocabulary_size(), 3);
    }

    #[test]
    fn serialized_shape_nests_characters() {
        let mut f = InvertedField::default();
        f.add_token("ab", "/x/", 1.0);
        let json = serde_json::to_value(&f).unwrap();
        assert_eq!(json["root"]["df"], 0);
        assert_eq!(json["root"]["a"]["b"]["df"], 1);
        assert_eq!(json["root"]["a"]["b"]["docs"]["/x/"]["tf"], 1.0);

        let back: InvertedField = serde_json::from_value(json).unwrap();
        assert_eq!(back, f);
    }
}
