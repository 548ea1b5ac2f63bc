// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Language-keyed stop words loaded from `data/stop_words.json`.
//!
//! Stop words are dropped at tokenization time, so they never reach the
//! per-document caches, the corpus statistics or the vocabulary tries. The
//! lookup is an exact match against the list for the detected bucket.

use super::language::LanguageBucket;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

static STOP_WORDS: LazyLock<HashMap<String, HashSet<String>>> = LazyLock::new(|| {
    let json_str = include_str!("../../data/stop_words.json");
    parse_stop_words_json(json_str)
});

/// Parse `{ "bucket": ["word", ...], ... }` into per-bucket sets.
fn parse_stop_words_json(json_str: &str) -> HashMap<String, HashSet<String>> {
    match serde_json::from_str::<HashMap<String, Vec<String>>>(json_str) {
        Ok(table) => table
            .into_iter()
            .map(|(bucket, words)| (bucket, words.into_iter().collect()))
            .collect(),
        Err(err) => {
            tracing::error!(%err, "stop word table is malformed, stop word filtering disabled");
            HashMap::new()
        }
    }
}

/// Is `word` a stop word for `bucket`?
#[inline]
pub fn is_stop_word(bucket: LanguageBucket, word: &str) -> bool {
    STOP_WORDS
        .get(bucket.key())
        .is_some_and(|words| words.contains(word))
}
