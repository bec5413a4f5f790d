// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! What the result list shows, independent of how it is drawn.

use crate::teaser::make_teaser;
use crate::text::escape_html;
use crate::types::{parse_terms, SearchResult};
use serde::Serialize;

pub const NO_RESULTS_TEXT: &str = "No results found...";

/// One rendered hit: link target, title, and teaser markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultItem {
    pub href: String,
    pub title: String,
    pub teaser: String,
}

impl ResultItem {
    /// `terms` must already be HTML-escaped (see [`highlight_terms`]).
    pub fn from_result(result: &SearchResult, terms: &[String]) -> Self {
        Self {
            href: result.doc_ref.clone(),
            title: result.doc.title.clone(),
            teaser: make_teaser(&result.doc.body, terms),
        }
    }

    /// `<article>` markup. Title and href are escaped; the teaser is markup already.
    pub fn to_html(&self) -> String {
        format!(
            r#"<article class="search-results__item"><a href="{}">{}</a><section>{}</section></article>"#,
            escape_html(&self.href),
            escape_html(&self.title),
            self.teaser
        )
    }
}

/// Contents of the result list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "camelCase")]
pub enum ResultList {
    /// Nothing rendered (no query yet, or an empty one).
    #[default]
    Empty,
    /// The "no results" placeholder. Not selectable.
    NoResults,
    Items(Vec<ResultItem>),
}

impl ResultList {
    /// Number of entries selection can land on.
    pub fn selectable_len(&self) -> usize {
        match self {
            ResultList::Items(items) => items.len(),
            _ => 0,
        }
    }

    pub fn get(&self, index: usize) -> Option<&ResultItem> {
        match self {
            ResultList::Items(items) => items.get(index),
            _ => None,
        }
    }

    /// `<li>` markup for the whole list.
    pub fn to_html(&self) -> String {
        match self {
            ResultList::Empty => String::new(),
            ResultList::NoResults => format!(
                r#"<li class="search-results__item search-results__no-results">{}</li>"#,
                NO_RESULTS_TEXT
            ),
            ResultList::Items(items) => items
                .iter()
                .map(|item| format!("<li>{}</li>", item.to_html()))
                .collect(),
        }
    }
}

/// The "N results for "query"" line. Absent when there is nothing to count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultsCount {
    /// Every match, not just the rendered ones.
    pub total: usize,
    pub query: String,
}

impl ResultsCount {
    pub fn to_html(&self) -> String {
        let noun = if self.total == 1 { "result" } else { "results" };
        format!(
            r#"{} {} for "<strong>{}</strong>""#,
            self.total,
            noun,
            escape_html(&self.query)
        )
    }
}

/// Query terms as used for highlighting: whitespace-split and HTML-escaped.
pub fn highlight_terms(term: &str) -> Vec<String> {
    parse_terms(term).iter().map(|t| escape_html(t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IndexDocument;

    fn hit(title: &str, body: &str) -> SearchResult {
        SearchResult {
            doc_ref: "/a/?x=1&y=2".to_string(),
            score: 1.0,
            doc: IndexDocument::new("/a/?x=1&y=2", title, body),
        }
    }

    #[test]
    fn item_markup_escapes_title_and_href_only() {
        let item = ResultItem::from_result(&hit("<Cats & Dogs>", "Cats nap."), &highlight_terms("cats"));
        assert_eq!(item.teaser, "<b>Cats</b> nap.…");
        assert_eq!(
            item.to_html(),
            r#"<article class="search-results__item"><a href="&#x2F;a&#x2F;?x=1&amp;y=2">&lt;Cats &amp; Dogs&gt;</a><section><b>Cats</b> nap.…</section></article>"#
        );
    }

    #[test]
    fn count_line_pluralizes_and_escapes() {
        let one = ResultsCount {
            total: 1,
            query: "rust".into(),
        };
        assert_eq!(one.to_html(), r#"1 result for "<strong>rust</strong>""#);

        let many = ResultsCount {
            total: 42,
            query: "<script>".into(),
        };
        assert_eq!(
            many.to_html(),
            r#"42 results for "<strong>&lt;script&gt;</strong>""#
        );
    }

    #[test]
    fn highlight_terms_are_escaped() {
        assert_eq!(highlight_terms(" a<b  c "), vec!["a&lt;b", "c"]);
    }

    #[test]
    fn placeholder_is_not_selectable() {
        assert_eq!(ResultList::NoResults.selectable_len(), 0);
        assert!(ResultList::NoResults.get(0).is_none());
        assert!(ResultList::NoResults.to_html().contains(NO_RESULTS_TEXT));
        assert_eq!(ResultList::Empty.to_html(), "");
    }
}
