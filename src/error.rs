// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error kinds for index acquisition and parsing.
//!
//! None of these reach the end user directly. The session logs them and
//! degrades to an empty result list. They are `Clone` because a failed load is
//! memoized and handed to every query that awaits it.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Every candidate location answered 404.
    #[error("search index not found at {}", paths.join(" or "))]
    IndexNotFound { paths: Vec<String> },

    /// A location answered with a non-404 failure status.
    #[error("fetching {path} returned HTTP {status}")]
    HttpStatus { path: String, status: u16 },

    /// The fetch primitive itself failed (network error, unreadable file).
    #[error("fetching {path} failed: {message}")]
    Fetch { path: String, message: String },

    /// The index body was fetched but could not be loaded.
    #[error("failed to load search index from {path}: {message}")]
    IndexLoad { path: String, message: String },

    /// Malformed index JSON.
    #[error("malformed search index: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for SearchError {
    fn from(e: serde_json::Error) -> Self {
        SearchError::Parse(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
