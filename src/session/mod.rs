// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The search session: one page's worth of search UI state plus the index.
//!
//! [`SearchSession`] glues the pure [`SessionState`] machine to an
//! [`IndexLoader`]. A view layer forwards DOM events to [`SearchSession::dispatch`],
//! performs the returned effects, and whenever an [`Effect::RunQuery`] shows up
//! awaits [`SearchSession::run_query`] and dispatches what it returns. Results
//! for a query that has since been superseded are dropped by the state machine.
//!
//! ```text
//!  DOM event ──▶ dispatch ──▶ SessionState::handle ──▶ effects ──▶ view
//!                                                        │
//!                                              RunQuery ─┴─▶ run_query ──▶ QueryResolved
//! ```

mod debounce;
mod fs_fetcher;
mod loader;
mod render;
mod state;

pub use debounce::{debounce, Debounce, Debounced};
pub use fs_fetcher::FsFetcher;
pub use loader::{
    base_path, index_paths, FetchResponse, Fetcher, IndexLoader, LoadResult, LoadStatus,
};
pub use render::{highlight_terms, ResultItem, ResultList, ResultsCount, NO_RESULTS_TEXT};
pub use state::{
    reduce, Effect, Env, Focus, Key, ModalState, QueryRequest, QueryResolution, SessionState,
    UiEvent,
};

use crate::config::SessionConfig;
use crate::error::Result;
use std::cell::{Ref, RefCell};
use std::time::Duration;
use tracing::debug;

/// Total matches for a query and the capped, rendered slice of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOutcome {
    pub total: usize,
    pub items: Vec<ResultItem>,
}

pub struct SearchSession<F> {
    config: SessionConfig,
    loader: IndexLoader<F>,
    state: RefCell<SessionState>,
}

impl<F: Fetcher + 'static> SearchSession<F> {
    /// A session for the page at `location_path`. Nothing is fetched until
    /// the first query.
    pub fn new(config: SessionConfig, fetcher: F, location_path: &str) -> Self {
        let paths = index_paths(location_path, &config.index_file);
        Self {
            state: RefCell::new(SessionState::new(&config)),
            loader: IndexLoader::new(fetcher, paths),
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn loader(&self) -> &IndexLoader<F> {
        &self.loader
    }

    pub fn state(&self) -> Ref<'_, SessionState> {
        self.state.borrow()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.state.borrow().next_deadline()
    }

    /// Feed one event through the state machine.
    pub fn dispatch(&self, event: UiEvent, env: &Env) -> Vec<Effect> {
        self.state.borrow_mut().handle(event, env)
    }

    /// Run a query against the index, loading it first if needed.
    ///
    /// Errors are the loader's; an index that loads fine but matches nothing
    /// is `Ok` with zero results.
    pub async fn search(&self, term: &str) -> Result<QueryOutcome> {
        let index = self.loader.get().await?;
        let results = index.search(term, &self.config.query);
        let terms = highlight_terms(term);
        let items = results
            .iter()
            .take(self.config.max_items)
            .map(|r| ResultItem::from_result(r, &terms))
            .collect();
        Ok(QueryOutcome {
            total: results.len(),
            items,
        })
    }

    /// Resolve a [`QueryRequest`] into the event that reports it.
    ///
    /// A missing or broken index resolves to zero results; the loader has
    /// already logged why.
    pub async fn run_query(&self, request: &QueryRequest) -> UiEvent {
        let outcome = self.search(&request.term).await.unwrap_or_else(|e| {
            debug!(error = %e, term = %request.term, "query degraded to zero results");
            QueryOutcome {
                total: 0,
                items: Vec::new(),
            }
        });
        UiEvent::QueryResolved(QueryResolution {
            generation: request.generation,
            term: request.term.clone(),
            total: outcome.total,
            items: outcome.items,
        })
    }

    /// Dispatch `event` and run any queries it starts to completion, in order.
    ///
    /// Returns every effect produced along the way. Useful where there is no
    /// event loop to interleave with, like the CLI and tests.
    pub async fn dispatch_and_settle(&self, event: UiEvent, env: &Env) -> Vec<Effect> {
        let mut effects = self.dispatch(event, env);
        let mut i = 0;
        while i < effects.len() {
            if let Effect::RunQuery(request) = effects[i].clone() {
                let resolved = self.run_query(&request).await;
                let more = self.dispatch(resolved, env);
                effects.extend(more);
            }
            i += 1;
        }
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_index, StaticFetcher};
    use futures::executor::block_on;

    fn session(location: &str) -> SearchSession<StaticFetcher> {
        let fetcher = StaticFetcher::new().with(
            "/search_index.en.json",
            200,
            sample_index().to_json().unwrap(),
        );
        SearchSession::new(SessionConfig::default(), fetcher, location)
    }

    #[test]
    fn nothing_is_fetched_until_a_query() {
        let s = session("/blog/");
        s.dispatch(UiEvent::KeyDown(Key::Slash), &Env::default());
        assert!(s.loader().fetcher().calls().is_empty());
        assert_eq!(s.loader().status(), LoadStatus::NotLoaded);
    }

    #[test]
    fn settle_runs_the_query_and_renders() {
        let s = session("/");
        let t0 = Env::at(Duration::ZERO);
        block_on(s.dispatch_and_settle(UiEvent::KeyDown(Key::Slash), &t0));
        block_on(s.dispatch_and_settle(UiEvent::ModalInput("rust".into()), &t0));

        let fx = block_on(s.dispatch_and_settle(UiEvent::Tick, &Env::at(Duration::from_millis(150))));
        assert!(fx.iter().any(|e| matches!(e, Effect::RunQuery(_))));
        let rendered = fx.iter().rev().find_map(|e| match e {
            Effect::RenderResults(list) => Some(list.clone()),
            _ => None,
        });
        assert!(matches!(rendered, Some(ResultList::Items(ref items)) if !items.is_empty()));
        assert!(s.state().count().is_some());
    }

    #[test]
    fn missing_index_resolves_to_zero_results() {
        let s = SearchSession::new(SessionConfig::default(), StaticFetcher::new(), "/docs/a/");
        let request = QueryRequest {
            generation: 7,
            term: "rust".into(),
        };
        let event = block_on(s.run_query(&request));
        assert_eq!(
            event,
            UiEvent::QueryResolved(QueryResolution {
                generation: 7,
                term: "rust".into(),
                total: 0,
                items: vec![],
            })
        );
        assert_eq!(
            s.loader().fetcher().calls(),
            vec!["/docs/search_index.en.json", "/search_index.en.json"]
        );
    }

    #[test]
    fn search_caps_items_but_counts_all() {
        let mut config = SessionConfig::default();
        config.max_items = 1;
        let fetcher = StaticFetcher::new().with(
            "/search_index.en.json",
            200,
            sample_index().to_json().unwrap(),
        );
        let s = SearchSession::new(config, fetcher, "/");
        let outcome = block_on(s.search("search")).unwrap();
        assert!(outcome.total > 1);
        assert_eq!(outcome.items.len(), 1);
    }
}
