// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! WebAssembly bindings for the search widget.
//!
//! The page owns the DOM; this module owns every decision. JavaScript forwards
//! events, and gets back a list of small effect objects to apply. Queries run
//! on the browser's microtask queue via `spawn_local`, and their results come
//! back through the same effects callback.
//!
//! # Wiring
//!
//! ```js
//! const widget = new SearchWidget(
//!     location.pathname,
//!     async (path) => { const r = await fetch(path); return { status: r.status, body: await r.text() }; },
//!     (effects) => effects.forEach(applyEffect),
//!     () => ({ now: performance.now(), scrollY: window.scrollY,
//!              scrollbarWidth: window.innerWidth - document.documentElement.clientWidth,
//!              focus: currentFocus() }),
//!     { debounceMs: 150 },
//! );
//!
//! navbarInput.addEventListener("input", (e) => widget.dispatch({ type: "navbarInput", value: e.target.value }));
//! document.addEventListener("keydown", (e) => widget.dispatch({ type: "keyDown", key: e.key }));
//! ```
//!
//! After each `dispatch`, schedule `dispatch({ type: "tick" })` at
//! `widget.nextDeadline()` if it is not `undefined`.

use crate::config::SessionConfig;
use crate::error::SearchError;
use crate::session::{
    Effect, Env, FetchResponse, Fetcher, Focus, Key, LoadStatus, QueryRequest, SearchSession,
    UiEvent,
};
use crate::teaser::make_teaser;
use futures::future::{FutureExt, LocalBoxFuture};
use js_sys::{Function, Promise};
use serde::{Deserialize, Serialize};
use serde_wasm_bindgen::{from_value, to_value};
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{spawn_local, JsFuture};

// ============================================================================
// FETCH
// ============================================================================

#[derive(Deserialize)]
struct JsFetchResponse {
    status: u16,
    #[serde(default)]
    body: String,
}

/// [`Fetcher`] backed by a JS function `(path) => Promise<{ status, body }>`.
struct JsFetcher {
    fetch: Function,
}

fn fetch_error(path: &str, err: JsValue) -> SearchError {
    SearchError::Fetch {
        path: path.to_string(),
        message: err.as_string().unwrap_or_else(|| format!("{:?}", err)),
    }
}

impl Fetcher for JsFetcher {
    fn fetch(&self, path: &str) -> LocalBoxFuture<'static, Result<FetchResponse, SearchError>> {
        let path = path.to_string();
        let started = self.fetch.call1(&JsValue::NULL, &JsValue::from_str(&path));
        async move {
            let promise = started.map_err(|e| fetch_error(&path, e))?;
            let value = JsFuture::from(Promise::resolve(&promise))
                .await
                .map_err(|e| fetch_error(&path, e))?;
            let response: JsFetchResponse = from_value(value).map_err(|e| SearchError::Fetch {
                path: path.clone(),
                message: e.to_string(),
            })?;
            Ok(FetchResponse::new(response.status, response.body))
        }
        .boxed_local()
    }
}

// ============================================================================
// EVENTS AND ENVIRONMENT
// ============================================================================

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum JsUiEvent {
    NavbarFocus,
    NavbarBlur,
    NavbarInput { value: String },
    ModalInput { value: String },
    KeyDown { key: String },
    BackdropClick,
    ItemHover { index: usize },
    ItemClick { index: usize },
    Tick,
}

impl From<JsUiEvent> for UiEvent {
    fn from(js: JsUiEvent) -> Self {
        match js {
            JsUiEvent::NavbarFocus => UiEvent::NavbarFocus,
            JsUiEvent::NavbarBlur => UiEvent::NavbarBlur,
            JsUiEvent::NavbarInput { value } => UiEvent::NavbarInput(value),
            JsUiEvent::ModalInput { value } => UiEvent::ModalInput(value),
            JsUiEvent::KeyDown { key } => UiEvent::KeyDown(Key::from_name(&key)),
            JsUiEvent::BackdropClick => UiEvent::BackdropClick,
            JsUiEvent::ItemHover { index } => UiEvent::ItemHover(index),
            JsUiEvent::ItemClick { index } => UiEvent::ItemClick(index),
            JsUiEvent::Tick => UiEvent::Tick,
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct JsEnv {
    /// `performance.now()`, in milliseconds.
    now: f64,
    scroll_y: f64,
    scrollbar_width: f64,
    /// "navbar", "modal", "text", or anything else for no text field.
    focus: String,
}

impl From<JsEnv> for Env {
    fn from(js: JsEnv) -> Self {
        let focus = match js.focus.as_str() {
            "navbar" => Focus::NavbarInput,
            "modal" => Focus::ModalInput,
            "text" => Focus::TextField,
            _ => Focus::Other,
        };
        Env {
            now: Duration::try_from_secs_f64(js.now.max(0.0) / 1000.0).unwrap_or_default(),
            scroll_y: js.scroll_y,
            scrollbar_width: js.scrollbar_width,
            focus,
        }
    }
}

// ============================================================================
// EFFECTS
// ============================================================================

/// Effect for JavaScript consumption. Markup is rendered here.
#[derive(Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum JsEffect {
    PreventDefault,
    LockScroll {
        top: f64,
        #[serde(rename = "paddingRight")]
        padding_right: f64,
    },
    UnlockScroll {
        #[serde(rename = "restoreTo")]
        restore_to: f64,
    },
    SetModalActive { active: bool },
    FocusModalInput,
    BlurNavbarInput,
    SetNavbarValue { value: String },
    SetModalValue { value: String },
    SetSlashIconHidden { hidden: bool },
    RenderResults { html: String },
    /// `html` is null when the count line should be hidden.
    RenderCount { html: Option<String> },
    Select { index: usize },
    Navigate { href: String },
}

impl JsEffect {
    /// `None` for effects the binding handles itself.
    fn from_effect(effect: &Effect) -> Option<Self> {
        Some(match effect {
            Effect::PreventDefault => JsEffect::PreventDefault,
            Effect::LockScroll { top, padding_right } => JsEffect::LockScroll {
                top: *top,
                padding_right: *padding_right,
            },
            Effect::UnlockScroll { restore_to } => JsEffect::UnlockScroll {
                restore_to: *restore_to,
            },
            Effect::SetModalActive(active) => JsEffect::SetModalActive { active: *active },
            Effect::FocusModalInput => JsEffect::FocusModalInput,
            Effect::BlurNavbarInput => JsEffect::BlurNavbarInput,
            Effect::SetNavbarValue(value) => JsEffect::SetNavbarValue {
                value: value.clone(),
            },
            Effect::SetModalValue(value) => JsEffect::SetModalValue {
                value: value.clone(),
            },
            Effect::SetSlashIconHidden(hidden) => JsEffect::SetSlashIconHidden { hidden: *hidden },
            Effect::RenderResults(list) => JsEffect::RenderResults {
                html: list.to_html(),
            },
            Effect::RenderCount(count) => JsEffect::RenderCount {
                html: count.as_ref().map(|c| c.to_html()),
            },
            Effect::Select { index } => JsEffect::Select { index: *index },
            Effect::Navigate(href) => JsEffect::Navigate { href: href.clone() },
            Effect::RunQuery(_) => return None,
        })
    }
}

// ============================================================================
// WIDGET
// ============================================================================

struct WidgetInner {
    session: SearchSession<JsFetcher>,
    on_effects: Function,
    read_env: Function,
}

impl WidgetInner {
    fn env(&self) -> Result<Env, JsValue> {
        let value = self.read_env.call0(&JsValue::NULL)?;
        if value.is_undefined() || value.is_null() {
            return Ok(Env::default());
        }
        let env: JsEnv = from_value(value)
            .map_err(|e| JsValue::from_str(&format!("Invalid environment: {}", e)))?;
        Ok(env.into())
    }

    fn apply(self: &Rc<Self>, event: UiEvent) -> Result<(), JsValue> {
        let env = self.env()?;
        let effects = self.session.dispatch(event, &env);

        let mut js_effects = Vec::with_capacity(effects.len());
        for effect in &effects {
            match effect {
                Effect::RunQuery(request) => self.spawn_query(request.clone()),
                other => js_effects.extend(JsEffect::from_effect(other)),
            }
        }

        if !js_effects.is_empty() {
            let js_array = to_value(&js_effects).map_err(|e| JsValue::from_str(&e.to_string()))?;
            self.on_effects.call1(&JsValue::NULL, &js_array)?;
        }
        Ok(())
    }

    fn spawn_query(self: &Rc<Self>, request: QueryRequest) {
        let inner = Rc::clone(self);
        spawn_local(async move {
            let resolved = inner.session.run_query(&request).await;
            if let Err(e) = inner.apply(resolved) {
                tracing::error!(error = ?e, "failed to apply search results");
            }
        });
    }
}

/// The navbar search widget: modal, result list, keyboard navigation.
#[wasm_bindgen]
pub struct SearchWidget {
    inner: Rc<WidgetInner>,
}

#[wasm_bindgen]
impl SearchWidget {
    /// Create a widget for the page at `location_path`.
    ///
    /// `config` may be `undefined` for the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        location_path: &str,
        fetch: Function,
        on_effects: Function,
        read_env: Function,
        config: JsValue,
    ) -> Result<SearchWidget, JsValue> {
        let config: SessionConfig = if config.is_undefined() || config.is_null() {
            SessionConfig::default()
        } else {
            from_value(config).map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?
        };

        let session = SearchSession::new(config, JsFetcher { fetch }, location_path);
        Ok(SearchWidget {
            inner: Rc::new(WidgetInner {
                session,
                on_effects,
                read_env,
            }),
        })
    }

    /// Forward one DOM event, e.g. `{ type: "keyDown", key: "ArrowDown" }`.
    #[wasm_bindgen]
    pub fn dispatch(&self, event: JsValue) -> Result<(), JsValue> {
        let event: JsUiEvent =
            from_value(event).map_err(|e| JsValue::from_str(&format!("Invalid event: {}", e)))?;
        self.inner.apply(event.into())
    }

    /// When to send the next `tick`, in `performance.now()` milliseconds.
    #[wasm_bindgen(js_name = "nextDeadline")]
    pub fn next_deadline(&self) -> Option<f64> {
        self.inner
            .session
            .next_deadline()
            .map(|d| d.as_secs_f64() * 1000.0)
    }

    /// "notLoaded", "loading", "loaded", or "failed".
    #[wasm_bindgen(js_name = "indexStatus")]
    pub fn index_status(&self) -> String {
        match self.inner.session.loader().status() {
            LoadStatus::NotLoaded => "notLoaded",
            LoadStatus::Loading => "loading",
            LoadStatus::Loaded => "loaded",
            LoadStatus::Failed => "failed",
        }
        .to_string()
    }
}

/// Teaser markup for `body` given query terms (an array of strings).
#[wasm_bindgen(js_name = "makeTeaser")]
pub fn make_teaser_js(body: &str, terms: JsValue) -> Result<String, JsValue> {
    let terms: Vec<String> =
        from_value(terms).map_err(|e| JsValue::from_str(&format!("Invalid terms: {}", e)))?;
    Ok(make_teaser(body, &terms))
}
