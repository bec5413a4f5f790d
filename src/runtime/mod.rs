// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime bindings.
//!
//! The browser widget is the production consumer; everything it does goes
//! through [`crate::session`], so native tests exercise the same logic.

pub mod wasm;
