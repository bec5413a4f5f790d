// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Highlighted excerpts for search results.
//!
//! A teaser is the densest 30-word stretch of a document body, with query
//! matches wrapped in `<b>`. Density comes from a per-word weight:
//!
//! | Word                                   | Weight |
//! |----------------------------------------|--------|
//! | stem starts with a query term's stem   | 40     |
//! | first word of a sentence               | 8      |
//! | anything else                          | 2      |
//!
//! A fixed-size window slides over the weights one word at a time and the
//! highest-scoring window wins. Ties go to the *last* window. If no word
//! matched at all the first window is used, so an unmatched body reads from
//! its opening sentence.
//!
//! # Output is markup
//!
//! The body text between words is copied verbatim from the source, punctuation
//! and spacing included, and is not escaped. Bodies come from the site's own
//! index and are trusted. Query terms are not: callers escape them before they
//! get here (see [`escape_html`](crate::text::escape_html)).

use crate::text::stem;

/// Weight of a word whose stem starts with a query term's stem.
pub const TERM_WEIGHT: u32 = 40;

/// Weight of the first word in a sentence.
pub const FIRST_WORD_WEIGHT: u32 = 8;

/// Weight of every other word.
pub const NORMAL_WORD_WEIGHT: u32 = 2;

/// Maximum number of words in a teaser.
pub const TEASER_MAX_WORDS: usize = 30;

/// Appended to every teaser.
pub const ELLIPSIS: &str = "…";

const HIGHLIGHT_OPEN: &str = "<b>";
const HIGHLIGHT_CLOSE: &str = "</b>";

/// Sentences are split on this literal. A bare `.` at the end of the body
/// does not start a new sentence.
const SENTENCE_DELIMITER: &str = ". ";

/// One word of the body with its weight and byte offset into the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedWord<'a> {
    pub word: &'a str,
    pub weight: u32,
    pub offset: usize,
}

impl WeightedWord<'_> {
    fn end(&self) -> usize {
        self.offset + self.word.len()
    }

    pub fn is_match(&self) -> bool {
        self.weight == TERM_WEIGHT
    }
}

/// Every non-empty word of `body`, weighted against the stemmed terms.
///
/// Returns the words and whether any of them matched a term.
pub fn weigh_words<'a, S: AsRef<str>>(
    body: &'a str,
    stemmed_terms: &[S],
) -> (Vec<WeightedWord<'a>>, bool) {
    let mut weighted = Vec::new();
    let mut term_found = false;
    let mut offset = 0;

    for sentence in body.split(SENTENCE_DELIMITER) {
        let mut weight = FIRST_WORD_WEIGHT;

        for word in sentence.split(' ') {
            if !word.is_empty() {
                let word_stem = stem(&word.to_lowercase()).into_owned();
                if stemmed_terms
                    .iter()
                    .any(|term| word_stem.starts_with(term.as_ref()))
                {
                    weight = TERM_WEIGHT;
                    term_found = true;
                }
                weighted.push(WeightedWord {
                    word,
                    weight,
                    offset,
                });
                weight = NORMAL_WORD_WEIGHT;
            }

            // the word plus the ' ' (or '.') that followed it
            offset += word.len() + 1;
        }

        // second byte of the ". " delimiter
        offset += 1;
    }

    (weighted, term_found)
}

/// Sum of weights for every window of `size` consecutive words, computed
/// incrementally. Window `i` covers `words[i..i + size]`.
pub fn window_scores(words: &[WeightedWord<'_>], size: usize) -> Vec<u32> {
    if size == 0 || words.len() < size {
        return Vec::new();
    }

    let mut scores = Vec::with_capacity(words.len() - size + 1);
    let mut sum: u32 = words[..size].iter().map(|w| w.weight).sum();
    scores.push(sum);

    for i in 0..words.len() - size {
        sum -= words[i].weight;
        sum += words[i + size].weight;
        scores.push(sum);
    }
    scores
}

/// Index of the winning window.
///
/// Without a term match this is always the first window. Otherwise it is the
/// last window holding the maximum score.
pub fn select_window(scores: &[u32], term_found: bool) -> usize {
    if !term_found {
        return 0;
    }

    let mut best = 0;
    let mut max_found = 0;
    for (i, &score) in scores.iter().enumerate().rev() {
        if score > max_found {
            max_found = score;
            best = i;
        }
    }
    best
}

/// Build the teaser for `body` given raw query terms.
///
/// Terms are lowercased and stemmed here; empty terms are ignored (an empty
/// stem would prefix-match every word). A body without words is returned
/// unchanged.
pub fn make_teaser<S: AsRef<str>>(body: &str, terms: &[S]) -> String {
    let stemmed_terms: Vec<String> = terms
        .iter()
        .map(|t| t.as_ref().trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .map(|t| stem(&t).into_owned())
        .collect();

    let (weighted, term_found) = weigh_words(body, &stemmed_terms);
    if weighted.is_empty() {
        return body.to_string();
    }

    let window_size = weighted.len().min(TEASER_MAX_WORDS);
    let scores = window_scores(&weighted, window_size);
    let start = select_window(&scores, term_found);

    assemble(body, &weighted[start..start + window_size])
}

/// Stitch the window back together from the body, highlighting matches.
fn assemble(body: &str, window: &[WeightedWord<'_>]) -> String {
    let mut teaser = String::with_capacity(body.len().min(512));
    let mut cursor = window.first().map_or(0, |w| w.offset);

    for word in window {
        if cursor < word.offset {
            teaser.push_str(&body[cursor..word.offset]);
        }

        if word.is_match() {
            teaser.push_str(HIGHLIGHT_OPEN);
        }
        teaser.push_str(word.word);
        if word.is_match() {
            teaser.push_str(HIGHLIGHT_CLOSE);
        }

        cursor = word.end();
    }

    teaser.push_str(ELLIPSIS);
    teaser
}
