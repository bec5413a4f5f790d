// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index files come from whatever the site build wrote. Loading garbage must
//! fail with an error, and anything that does load must be searchable.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(index) = glean::ElasticIndex::load(json) {
        let mut options = glean::QueryOptions::default();
        for query in ["a", "search index", "zz"] {
            let _ = index.search(query, &options);
        }
        options.expand = true;
        let _ = index.search("s", &options);
    }
});
