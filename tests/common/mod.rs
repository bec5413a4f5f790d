//! Shared test utilities and fixtures.

#![allow(dead_code)]

use futures::executor::block_on;
use glean::session::{Effect, Env, Focus, Key, ResultList, SearchSession, UiEvent};
use glean::SessionConfig;
use std::time::Duration;

// Re-export canonical fixtures from glean::testing
pub use glean::testing::{doc, pets_index, sample_docs, sample_index, StaticFetcher};

pub const INDEX_FILE: &str = "search_index.en.json";

pub fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

/// A fetcher serving `index` at the site root.
pub fn root_fetcher(index: &glean::ElasticIndex) -> StaticFetcher {
    StaticFetcher::new().with(
        &format!("/{}", INDEX_FILE),
        200,
        index.to_json().expect("index serializes"),
    )
}

// ============================================================================
// SESSION DRIVER
// ============================================================================

/// Drives a [`SearchSession`] with a hand-advanced clock, running queries to
/// completion as soon as they are issued.
pub struct Driver {
    pub session: SearchSession<StaticFetcher>,
    pub now: Duration,
    pub focus: Focus,
    pub effects: Vec<Effect>,
}

impl Driver {
    pub fn new(fetcher: StaticFetcher, location: &str) -> Self {
        Self::with_config(SessionConfig::default(), fetcher, location)
    }

    pub fn with_config(config: SessionConfig, fetcher: StaticFetcher, location: &str) -> Self {
        Self {
            session: SearchSession::new(config, fetcher, location),
            now: Duration::ZERO,
            focus: Focus::Other,
            effects: Vec::new(),
        }
    }

    pub fn env(&self) -> Env {
        Env::at(self.now).with_focus(self.focus)
    }

    /// Send one event; returns the effects it (and any query it ran) produced.
    pub fn send(&mut self, event: UiEvent) -> Vec<Effect> {
        let env = self.env();
        let fx = block_on(self.session.dispatch_and_settle(event, &env));
        self.effects.extend(fx.iter().cloned());
        fx
    }

    pub fn key(&mut self, key: Key) -> Vec<Effect> {
        self.send(UiEvent::KeyDown(key))
    }

    pub fn advance(&mut self, by: Duration) -> Vec<Effect> {
        self.now += by;
        self.send(UiEvent::Tick)
    }

    /// Fire timers until none are pending.
    pub fn settle(&mut self) -> Vec<Effect> {
        let mut all = Vec::new();
        while let Some(deadline) = self.session.next_deadline() {
            self.now = self.now.max(deadline);
            all.extend(self.send(UiEvent::Tick));
        }
        all
    }

    /// Open the modal with `/`, focus its input, and type `query`.
    pub fn search(&mut self, query: &str) {
        self.key(Key::Slash);
        self.settle();
        self.focus = Focus::ModalInput;
        self.send(UiEvent::ModalInput(query.to_string()));
        self.settle();
    }

    pub fn results(&self) -> ResultList {
        self.session.state().results().clone()
    }

    pub fn selected(&self) -> Option<usize> {
        self.session.state().selected()
    }
}

pub fn queries(effects: &[Effect]) -> Vec<String> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::RunQuery(r) => Some(r.term.clone()),
            _ => None,
        })
        .collect()
}
