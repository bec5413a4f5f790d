// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The search UI as a pure state machine.
//!
//! Every user action and timer expiry is a [`UiEvent`]. Feeding one to
//! [`reduce`] yields the next [`SessionState`] plus the [`Effect`]s a view
//! layer has to perform. Nothing here touches a DOM, a clock, or the network:
//! the view reports focus, scroll offset and time through [`Env`], and queries
//! leave as [`Effect::RunQuery`] and come back as [`UiEvent::QueryResolved`].
//!
//! # Selection
//!
//! ```text
//!   none ──results render, delay──▶ selected(0)
//!   selected(i) ──ArrowDown──▶ selected(min(i+1, n-1))
//!   selected(i) ──ArrowUp────▶ selected(max(i-1, 0))
//!   *           ──hover(j)───▶ selected(j)
//!   *           ──new query / open / close──▶ none
//! ```
//!
//! The selected index is always `None` or a valid offset into the rendered
//! list. There is no wraparound.
//!
//! # Modal
//!
//! Opening records the scroll offset and locks the page; closing restores it,
//! clears both inputs and the results, and invalidates any query still in
//! flight. Opening an open modal does nothing.
//!
//! # Staleness
//!
//! Each query pipeline run bumps `generation`. A resolution carrying an older
//! generation is dropped, so a slow early query can never overwrite the
//! results of a later one.

use super::debounce::Debounce;
use super::render::{ResultItem, ResultList, ResultsCount};
use crate::config::SessionConfig;
use std::time::Duration;
use tracing::debug;

/// Which element has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    NavbarInput,
    ModalInput,
    /// Any other input or textarea on the page.
    TextField,
    #[default]
    Other,
}

impl Focus {
    pub fn is_text_field(self) -> bool {
        !matches!(self, Focus::Other)
    }
}

/// Keys the session reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    Enter,
    Escape,
    Slash,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "Enter" => Key::Enter,
            "Escape" | "Esc" => Key::Escape,
            "/" => Key::Slash,
            _ => Key::Other,
        }
    }
}

/// What the view knows at the moment an event fires.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Env {
    /// Monotonic time since page load.
    pub now: Duration,
    /// Vertical page scroll offset.
    pub scroll_y: f64,
    /// Width of the page scrollbar; padding added while scrolling is locked.
    pub scrollbar_width: f64,
    pub focus: Focus,
}

impl Env {
    pub fn at(now: Duration) -> Self {
        Self {
            now,
            ..Self::default()
        }
    }

    pub fn with_focus(mut self, focus: Focus) -> Self {
        self.focus = focus;
        self
    }
}

/// A query the view should run and report back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub generation: u64,
    pub term: String,
}

/// Outcome of a [`QueryRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResolution {
    pub generation: u64,
    pub term: String,
    /// Total matches, before the display cap.
    pub total: usize,
    /// Rendered hits, capped.
    pub items: Vec<ResultItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    NavbarFocus,
    NavbarBlur,
    NavbarInput(String),
    ModalInput(String),
    KeyDown(Key),
    BackdropClick,
    ItemHover(usize),
    ItemClick(usize),
    /// Time passed; fire whatever timers are due.
    Tick,
    QueryResolved(QueryResolution),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    PreventDefault,
    /// Fix the page at `-top` and pad the right edge by the scrollbar width.
    LockScroll { top: f64, padding_right: f64 },
    UnlockScroll { restore_to: f64 },
    SetModalActive(bool),
    FocusModalInput,
    BlurNavbarInput,
    SetNavbarValue(String),
    SetModalValue(String),
    SetSlashIconHidden(bool),
    RenderResults(ResultList),
    RenderCount(Option<ResultsCount>),
    /// Mark item `index` selected and scroll it into view (nearest edge, smooth).
    Select { index: usize },
    Navigate(String),
    RunQuery(QueryRequest),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModalState {
    Closed,
    Open { scroll_position: f64 },
}

#[derive(Debug, Clone)]
pub struct SessionState {
    modal: ModalState,
    navbar_value: String,
    modal_value: String,
    current_term: String,
    generation: u64,
    results: ResultList,
    count: Option<ResultsCount>,
    selected: Option<usize>,
    query_debounce: Debounce<String>,
    focus_delay: Duration,
    auto_select_delay: Duration,
    focus_at: Option<Duration>,
    auto_select_at: Option<(Duration, u64)>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(&SessionConfig::default())
    }
}

/// Apply one event to an owned state.
pub fn reduce(mut state: SessionState, event: UiEvent, env: &Env) -> (SessionState, Vec<Effect>) {
    let effects = state.handle(event, env);
    (state, effects)
}

impl SessionState {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            modal: ModalState::Closed,
            navbar_value: String::new(),
            modal_value: String::new(),
            current_term: String::new(),
            generation: 0,
            results: ResultList::Empty,
            count: None,
            selected: None,
            query_debounce: Debounce::new(config.debounce()),
            focus_delay: config.focus_delay(),
            auto_select_delay: config.auto_select_delay(),
            focus_at: None,
            auto_select_at: None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.modal, ModalState::Open { .. })
    }

    pub fn modal(&self) -> ModalState {
        self.modal
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn current_term(&self) -> &str {
        &self.current_term
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn results(&self) -> &ResultList {
        &self.results
    }

    pub fn count(&self) -> Option<&ResultsCount> {
        self.count.as_ref()
    }

    pub fn navbar_value(&self) -> &str {
        &self.navbar_value
    }

    pub fn modal_value(&self) -> &str {
        &self.modal_value
    }

    /// Earliest pending timer, if any. The view should send a `Tick` then.
    pub fn next_deadline(&self) -> Option<Duration> {
        [
            self.query_debounce.deadline(),
            self.focus_at,
            self.auto_select_at.map(|(at, _)| at),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Apply one event in place.
    pub fn handle(&mut self, event: UiEvent, env: &Env) -> Vec<Effect> {
        let mut fx = Vec::new();
        match event {
            UiEvent::NavbarFocus => {
                self.slash_icon(true, &mut fx);
                self.open(env, &mut fx);
            }
            UiEvent::NavbarBlur => self.slash_icon(false, &mut fx),
            UiEvent::NavbarInput(value) => self.navbar_input(value, env, &mut fx),
            UiEvent::ModalInput(value) => self.modal_input(value, env),
            UiEvent::KeyDown(key) => self.key_down(key, env, &mut fx),
            UiEvent::BackdropClick => {
                self.close(&mut fx);
                self.slash_icon(env.focus == Focus::NavbarInput, &mut fx);
            }
            UiEvent::ItemHover(index) => {
                if index < self.results.selectable_len() {
                    self.select(index, &mut fx);
                }
            }
            UiEvent::ItemClick(index) => {
                if let Some(item) = self.results.get(index) {
                    fx.push(Effect::Navigate(item.href.clone()));
                }
            }
            UiEvent::Tick => self.tick(env, &mut fx),
            UiEvent::QueryResolved(resolution) => self.resolve(resolution, env, &mut fx),
        }
        fx
    }

    fn slash_icon(&self, navbar_focused: bool, fx: &mut Vec<Effect>) {
        let hidden = navbar_focused || !self.navbar_value.trim().is_empty();
        fx.push(Effect::SetSlashIconHidden(hidden));
    }

    fn open(&mut self, env: &Env, fx: &mut Vec<Effect>) {
        if self.is_open() {
            return;
        }
        self.modal = ModalState::Open {
            scroll_position: env.scroll_y,
        };
        fx.push(Effect::LockScroll {
            top: env.scroll_y,
            padding_right: env.scrollbar_width,
        });
        fx.push(Effect::SetModalActive(true));
        self.selected = None;
        self.focus_at = Some(env.now + self.focus_delay);
        debug!("search modal opened");
    }

    fn close(&mut self, fx: &mut Vec<Effect>) {
        let ModalState::Open { scroll_position } = self.modal else {
            return;
        };
        self.modal = ModalState::Closed;
        fx.push(Effect::SetModalActive(false));
        fx.push(Effect::UnlockScroll {
            restore_to: scroll_position,
        });

        self.navbar_value.clear();
        self.modal_value.clear();
        fx.push(Effect::SetNavbarValue(String::new()));
        fx.push(Effect::SetModalValue(String::new()));

        self.results = ResultList::Empty;
        self.count = None;
        fx.push(Effect::RenderResults(ResultList::Empty));
        fx.push(Effect::RenderCount(None));

        self.selected = None;
        self.current_term.clear();
        self.generation += 1;
        self.query_debounce.cancel();
        self.focus_at = None;
        self.auto_select_at = None;
        debug!("search modal closed");
    }

    fn navbar_input(&mut self, value: String, env: &Env, fx: &mut Vec<Effect>) {
        self.navbar_value = value;
        self.slash_icon(env.focus == Focus::NavbarInput, fx);
        if self.navbar_value.is_empty() {
            return;
        }

        self.open(env, fx);
        let value = self.navbar_value.clone();
        fx.push(Effect::SetModalValue(value.clone()));
        self.modal_input(value, env);
    }

    fn modal_input(&mut self, value: String, env: &Env) {
        self.modal_value = value.clone();
        self.query_debounce.call(value, env.now);
    }

    fn key_down(&mut self, key: Key, env: &Env, fx: &mut Vec<Effect>) {
        match key {
            Key::Escape => {
                if self.is_open() {
                    self.close(fx);
                    fx.push(Effect::BlurNavbarInput);
                    self.slash_icon(false, fx);
                }
            }
            Key::Slash => {
                if !env.focus.is_text_field() {
                    fx.push(Effect::PreventDefault);
                    self.open(env, fx);
                }
            }
            Key::ArrowDown | Key::ArrowUp | Key::Enter => {
                if env.focus != Focus::ModalInput || self.results.selectable_len() == 0 {
                    return;
                }
                match (key, self.selected) {
                    (Key::ArrowDown, current) => {
                        fx.push(Effect::PreventDefault);
                        self.select(current.map_or(0, |i| i + 1), fx);
                    }
                    (Key::ArrowUp, current) => {
                        fx.push(Effect::PreventDefault);
                        self.select(current.map_or(0, |i| i.saturating_sub(1)), fx);
                    }
                    (Key::Enter, Some(i)) => {
                        fx.push(Effect::PreventDefault);
                        if let Some(item) = self.results.get(i) {
                            fx.push(Effect::Navigate(item.href.clone()));
                        }
                    }
                    _ => {}
                }
            }
            Key::Other => {}
        }
    }

    /// Select `index`, clamped to the rendered list. No-op on an empty list.
    fn select(&mut self, index: usize, fx: &mut Vec<Effect>) {
        let len = self.results.selectable_len();
        if len == 0 {
            return;
        }
        let index = index.min(len - 1);
        self.selected = Some(index);
        fx.push(Effect::Select { index });
    }

    fn tick(&mut self, env: &Env, fx: &mut Vec<Effect>) {
        if let Some(value) = self.query_debounce.poll(env.now) {
            self.start_query(&value, fx);
        }

        if self.focus_at.is_some_and(|at| at <= env.now) {
            self.focus_at = None;
            fx.push(Effect::FocusModalInput);
        }

        if let Some((at, generation)) = self.auto_select_at {
            if at <= env.now {
                self.auto_select_at = None;
                if generation == self.generation {
                    self.select(0, fx);
                }
            }
        }
    }

    fn start_query(&mut self, raw: &str, fx: &mut Vec<Effect>) {
        let term = raw.trim();
        if term == self.current_term {
            return;
        }

        self.current_term = term.to_string();
        self.generation += 1;
        self.selected = None;
        self.auto_select_at = None;
        self.results = ResultList::Empty;
        fx.push(Effect::RenderResults(ResultList::Empty));

        if term.is_empty() {
            self.count = None;
            fx.push(Effect::RenderCount(None));
            return;
        }

        debug!(term, generation = self.generation, "query scheduled");
        fx.push(Effect::RunQuery(QueryRequest {
            generation: self.generation,
            term: self.current_term.clone(),
        }));
    }

    fn resolve(&mut self, resolution: QueryResolution, env: &Env, fx: &mut Vec<Effect>) {
        if resolution.generation != self.generation {
            debug!(
                term = %resolution.term,
                generation = resolution.generation,
                latest = self.generation,
                "dropping stale query results"
            );
            return;
        }

        if resolution.items.is_empty() {
            self.results = ResultList::NoResults;
            self.count = None;
        } else {
            self.results = ResultList::Items(resolution.items);
            self.count = Some(ResultsCount {
                total: resolution.total,
                query: resolution.term,
            });
            self.auto_select_at = Some((env.now + self.auto_select_delay, self.generation));
        }
        fx.push(Effect::RenderResults(self.results.clone()));
        fx.push(Effect::RenderCount(self.count.clone()));
    }
}
