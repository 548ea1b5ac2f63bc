// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for search queries.
//!
//! Throws arbitrary query text and paging parameters at a small engine and
//! checks that results are sorted, non-negative and within the page bounds.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use quizdex::testing::{biology_deck, engine_with, CARDS};
use quizdex::{MemoryStore, SearchEngine, SearchOptions};
use std::sync::OnceLock;

#[derive(Debug, Arbitrary)]
struct Input {
    query: String,
    page_size: u8,
    page: u8,
    use_tag: bool,
}

fuzz_target!(|input: Input| {
    static ENGINE: OnceLock<SearchEngine<MemoryStore>> = OnceLock::new();
    let engine = ENGINE.get_or_init(|| engine_with(biology_deck()));

    let options = SearchOptions {
        use_tag: input.use_tag,
    };
    let page = engine
        .search_scored(
            CARDS,
            &input.query,
            usize::from(input.page_size),
            usize::from(input.page),
            options,
        )
        .expect("in-memory search never fails");

    assert!(page.result.len() <= usize::from(input.page_size).max(1));
    for pair in page.result.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    for hit in &page.result {
        assert!(hit.score >= 0.0 && hit.score.is_finite());
    }

    let completions = engine
        .prefix_search(CARDS, quizdex::Vocabulary::Words, &input.query, Some(8))
        .expect("prefix search");
    assert!(completions.len() <= 8);
});
