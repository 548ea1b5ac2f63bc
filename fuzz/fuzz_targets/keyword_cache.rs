// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for keyword cache construction.
//!
//! Builds a cache from arbitrary source strings and checks the structural
//! invariants: bigrams never cross a source boundary, counts add up, and
//! positions point back at their terms.

#![no_main]

use libfuzzer_sys::fuzz_target;
use quizdex::keywords::build_cache_from_strings;
use quizdex::tokenize;

fuzz_target!(|sources: Vec<String>| {
    let cache = build_cache_from_strings(sources.iter().map(String::as_str));

    let expected_bigrams: usize = sources
        .iter()
        .map(|s| tokenize(s).len().saturating_sub(1))
        .sum();
    assert_eq!(cache.words2.len(), expected_bigrams);

    let total: u32 = cache.frequency.values().sum();
    assert_eq!(total as usize, cache.words.len());

    for (term, offsets) in &cache.position {
        for &offset in offsets {
            assert_eq!(&cache.words[offset as usize], term);
        }
    }
});
