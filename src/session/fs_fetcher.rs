// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! A [`Fetcher`] over a built site on disk.

use super::loader::{FetchResponse, Fetcher};
use crate::error::SearchError;
use futures::future::{ready, FutureExt, LocalBoxFuture};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// Serves site-absolute paths from a directory, the way a static file server
/// would. Missing files (and paths escaping the root) answer 404.
#[derive(Debug, Clone)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
            .then(|| self.root.join(relative))
    }

    fn read(&self, path: &str) -> Result<FetchResponse, SearchError> {
        let Some(file) = self.resolve(path) else {
            return Ok(FetchResponse::not_found());
        };
        match std::fs::read_to_string(&file) {
            Ok(body) => Ok(FetchResponse::new(200, body)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(FetchResponse::not_found()),
            Err(e) => Err(SearchError::Fetch {
                path: path.to_string(),
                message: e.to_string(),
            }),
        }
    }
}

impl Fetcher for FsFetcher {
    fn fetch(&self, path: &str) -> LocalBoxFuture<'static, Result<FetchResponse, SearchError>> {
        ready(self.read(path)).boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_components_are_not_served() {
        let fetcher = FsFetcher::new("/srv/site");
        assert_eq!(fetcher.resolve("/../etc/passwd"), None);
        assert_eq!(
            fetcher.resolve("/blog/search_index.en.json"),
            Some(PathBuf::from("/srv/site/blog/search_index.en.json"))
        );
    }
}
