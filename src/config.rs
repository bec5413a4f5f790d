// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Session configuration.
//!
//! Every field has a default, so an empty JSON object (or no config at all)
//! gives the stock widget timings and query options.

use crate::types::QueryOptions;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    /// Quiet period before a keystroke turns into a query.
    pub debounce_ms: u64,
    /// Delay between rendering results and selecting the first one.
    pub auto_select_delay_ms: u64,
    /// Delay between opening the modal and focusing its input.
    pub focus_delay_ms: u64,
    /// Maximum number of rendered results. The count line still shows the total.
    pub max_items: usize,
    /// File name of the index, looked up under the base path and then the root.
    pub index_file: String,
    /// Options forwarded to the query function.
    pub query: QueryOptions,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 150,
            auto_select_delay_ms: 50,
            focus_delay_ms: 100,
            max_items: 10,
            index_file: "search_index.en.json".to_string(),
            query: QueryOptions::default(),
        }
    }
}

impl SessionConfig {
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn auto_select_delay(&self) -> Duration {
        Duration::from_millis(self.auto_select_delay_ms)
    }

    pub fn focus_delay(&self) -> Duration {
        Duration::from_millis(self.focus_delay_ms)
    }
}
