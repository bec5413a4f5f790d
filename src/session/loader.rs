// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Lazy, load-once acquisition of the search index.
//!
//! The index is fetched the first time a query needs it. Queries that arrive
//! while the fetch is in flight await the same shared future, so there is never
//! more than one load per page. The outcome, success or failure, is kept for
//! the rest of the session.
//!
//! ```text
//! NotLoaded ──get()──▶ Loading(shared) ──resolve──▶ Loaded(index)
//!                                     └─────────▶ Failed(error)
//! ```
//!
//! # Path fallback
//!
//! A site served under a sub-path (`/docs/...`) keeps its index at
//! `/docs/search_index.en.json`. If that answers 404 the root copy is tried.
//! Two 404s mean there is no index; any other failure status is a load error.

use crate::error::SearchError;
use crate::index::ElasticIndex;
use futures::future::{FutureExt, LocalBoxFuture, Shared};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, error, warn};

/// Status and body of one fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::new(404, "")
    }

    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The fetch primitive the loader runs on: `window.fetch` in a browser, the
/// filesystem in the CLI, a canned table in tests.
pub trait Fetcher {
    /// Fetch a site-absolute path. `Err` means the request itself failed;
    /// HTTP error statuses come back as `Ok` with that status.
    fn fetch(&self, path: &str) -> LocalBoxFuture<'static, Result<FetchResponse, SearchError>>;
}

/// Base path of a page: its first path segment, or empty at the root.
///
/// `/blog/post-1/` → `/blog`, `/` → ``.
pub fn base_path(location_path: &str) -> String {
    match location_path.split('/').nth(1) {
        Some(segment) if !segment.is_empty() => format!("/{}", segment),
        _ => String::new(),
    }
}

/// Candidate index locations, most specific first, without duplicates.
pub fn index_paths(location_path: &str, index_file: &str) -> Vec<String> {
    let scoped = format!("{}/{}", base_path(location_path), index_file);
    let root = format!("/{}", index_file);
    if scoped == root {
        vec![root]
    } else {
        vec![scoped, root]
    }
}

pub type LoadResult = Result<Rc<ElasticIndex>, SearchError>;

type SharedLoad = Shared<LocalBoxFuture<'static, LoadResult>>;

enum LoadState {
    NotLoaded,
    Loading(SharedLoad),
    Loaded(Rc<ElasticIndex>),
    Failed(SearchError),
}

/// Observable load progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    NotLoaded,
    Loading,
    Loaded,
    Failed,
}

pub struct IndexLoader<F> {
    fetcher: Rc<F>,
    paths: Vec<String>,
    state: RefCell<LoadState>,
}

impl<F: Fetcher + 'static> IndexLoader<F> {
    pub fn new(fetcher: F, paths: Vec<String>) -> Self {
        Self {
            fetcher: Rc::new(fetcher),
            paths,
            state: RefCell::new(LoadState::NotLoaded),
        }
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn status(&self) -> LoadStatus {
        match &*self.state.borrow() {
            LoadState::NotLoaded => LoadStatus::NotLoaded,
            LoadState::Loading(_) => LoadStatus::Loading,
            LoadState::Loaded(_) => LoadStatus::Loaded,
            LoadState::Failed(_) => LoadStatus::Failed,
        }
    }

    /// The loaded index, starting the load on first call.
    pub async fn get(&self) -> LoadResult {
        let pending = {
            let mut state = self.state.borrow_mut();
            match &*state {
                LoadState::Loaded(index) => return Ok(Rc::clone(index)),
                LoadState::Failed(err) => return Err(err.clone()),
                LoadState::Loading(pending) => pending.clone(),
                LoadState::NotLoaded => {
                    let pending = load(Rc::clone(&self.fetcher), self.paths.clone())
                        .boxed_local()
                        .shared();
                    *state = LoadState::Loading(pending.clone());
                    pending
                }
            }
        };

        let result = pending.await;

        let mut state = self.state.borrow_mut();
        if matches!(*state, LoadState::Loading(_)) {
            *state = match &result {
                Ok(index) => LoadState::Loaded(Rc::clone(index)),
                Err(err) => LoadState::Failed(err.clone()),
            };
        }
        result
    }
}

async fn load<F: Fetcher>(fetcher: Rc<F>, paths: Vec<String>) -> LoadResult {
    for path in &paths {
        let response = fetcher.fetch(path).await.inspect_err(|e| {
            error!(error = %e, "Error loading search index");
        })?;

        if response.status == 404 {
            debug!(path = %path, "search index not found, trying next location");
            continue;
        }
        if !response.is_ok() {
            let err = SearchError::HttpStatus {
                path: path.clone(),
                status: response.status,
            };
            error!(error = %err, "Error loading search index");
            return Err(err);
        }

        return match ElasticIndex::load(&response.body) {
            Ok(index) => {
                debug!(path = %path, docs = index.len(), "search index loaded");
                Ok(Rc::new(index))
            }
            Err(e) => {
                let err = SearchError::IndexLoad {
                    path: path.clone(),
                    message: e.to_string(),
                };
                error!(error = %err, "Error loading search index");
                Err(err)
            }
        };
    }

    warn!("Search index not found at either the base or root path.");
    Err(SearchError::IndexNotFound { paths })
}
