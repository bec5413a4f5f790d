// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text processing shared by the index and the teaser engine.
//!
//! The index file was built by running every field through
//! `tokenize -> trim -> stop words -> stem`. Queries must go through the exact
//! same pipeline or nothing lines up. The teaser engine only borrows the
//! stemmer: it matches on stem prefixes, not whole tokens.

mod stop_words;

pub use stop_words::is_stop_word;

use rust_stemmers::{Algorithm, Stemmer};
use std::borrow::Cow;
use std::sync::OnceLock;

static STEMMER: OnceLock<Stemmer> = OnceLock::new();

fn stemmer() -> &'static Stemmer {
    STEMMER.get_or_init(|| Stemmer::create(Algorithm::English))
}

/// Stem a single lowercase word.
pub fn stem(word: &str) -> Cow<'_, str> {
    stemmer().stem(word)
}

/// Split text into lowercase tokens on whitespace and hyphens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Strip leading and trailing non-word characters.
pub fn trim_token(token: &str) -> &str {
    token.trim_matches(|c: char| !is_word_char(c))
}

/// Full indexing pipeline: the tokens an index field or a query contributes.
pub fn pipeline(text: &str) -> Vec<String> {
    tokenize(text)
        .iter()
        .map(|t| trim_token(t))
        .filter(|t| !t.is_empty() && !is_stop_word(t))
        .map(|t| stem(t).into_owned())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Escape the characters that matter inside HTML text and attribute values.
///
/// Applied to user input (query terms, the echoed query) and to titles and
/// hrefs. Teaser bodies are deliberately not passed through here.
pub fn escape_html(unsafe_text: &str) -> String {
    let mut out = String::with_capacity(unsafe_text.len());
    for c in unsafe_text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_splits_on_whitespace_and_hyphens() {
        assert_eq!(
            tokenize("  Static-Site   generators\tRock "),
            vec!["static", "site", "generators", "rock"]
        );
    }

    #[test]
    fn trim_keeps_inner_punctuation() {
        assert_eq!(trim_token("\"hello,\""), "hello");
        assert_eq!(trim_token("don't."), "don't");
        assert_eq!(trim_token("..."), "");
        assert_eq!(trim_token("café!"), "café");
    }

    #[test]
    fn pipeline_drops_stop_words_and_stems() {
        assert_eq!(pipeline("The cats and the dogs"), vec!["cat", "dog"]);
        assert!(pipeline("the and of").is_empty());
    }

    #[test]
    fn stemming_is_prefix_friendly() {
        assert!(stem("running").starts_with(stem("run").as_ref()));
        assert_eq!(stem("foxes"), "fox");
    }

    #[test]
    fn escape_html_covers_attribute_breakers() {
        assert_eq!(
            escape_html(r#"<a href="x">'/&"#),
            "&lt;a href=&quot;x&quot;&gt;&#x27;&#x2F;&amp;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }
}
