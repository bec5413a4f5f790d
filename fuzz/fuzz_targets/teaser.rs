// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Teaser generation over arbitrary bodies and terms.
//!
//! Offsets are byte positions into the original body, so multi-byte text,
//! runs of spaces, and stray ". " delimiters are where slicing would go wrong.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    body: String,
    terms: Vec<String>,
}

fuzz_target!(|input: Input| {
    let teaser = glean::make_teaser(&input.body, &input.terms);

    if input.body.split(". ").all(|s| s.split(' ').all(str::is_empty)) {
        assert_eq!(teaser, input.body);
        return;
    }

    // Stripped of markup, the teaser is a verbatim slice of the body
    let plain = teaser
        .replace("<b>", "")
        .replace("</b>", "")
        .trim_end_matches(glean::teaser::ELLIPSIS)
        .to_string();
    if !input.body.contains("<b>") && !input.body.contains("</b>") {
        assert!(input.body.contains(&plain));
    }
});
