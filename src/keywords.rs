// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-document keyword cache construction.
//!
//! A quiz card is an arbitrary JSON value: question text, a list of answers,
//! nested explanation objects, tags. Every string leaf is collected in
//! depth-first order, normalized, tokenized, and appended to one running token
//! sequence. Offsets in `position` are global across all leaves, so proximity
//! between the question and its first answer is still measurable.
//!
//! Bigrams are different. A bigram joining the last word of the question to
//! the first word of an answer is a phrase nobody wrote, so bigrams are built
//! per source string and never straddle a seam:
//!
//! ```text
//! leaves:  "capital of france"   "paris"
//! words:   capital france paris           ("of" is a stop word)
//! words2:  "capital france"               (no "france paris")
//! ```

use crate::tokenize::tokenize;
use crate::types::SearchKeywordCache;
use serde_json::Value;
use std::collections::HashMap;
use tracing::instrument;

/// Every string leaf of `value` in depth-first order.
///
/// Arrays contribute their elements in order, objects their values (keys are
/// ignored). Numbers, booleans and nulls contribute nothing.
pub fn collect_strings(value: &Value) -> Vec<&str> {
    let mut out = Vec::new();
    let mut stack = vec![value];

    while let Some(node) = stack.pop() {
        match node {
            Value::String(s) => out.push(s.as_str()),
            // Reverse so the first child is popped first
            Value::Array(items) => stack.extend(items.iter().rev()),
            Value::Object(map) => stack.extend(map.values().rev()),
            Value::Null | Value::Bool(_) | Value::Number(_) => {}
        }
    }

    out
}

/// String leaves of the named fields, in field order.
///
/// Field names may be dotted paths into nested objects (`"answer.text"`).
/// Missing fields contribute nothing. An empty field list selects the whole
/// document.
pub fn collect_field_strings<'a>(document: &'a Value, fields: &[String]) -> Vec<&'a str> {
    if fields.is_empty() {
        return collect_strings(document);
    }

    fields
        .iter()
        .filter_map(|field| lookup_path(document, field))
        .flat_map(collect_strings)
        .collect()
}

/// Resolve a dotted path against nested objects.
pub fn lookup_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(value, |node, key| node.as_object().and_then(|map| map.get(key)))
}

/// Build the cache for a whole document.
pub fn build_cache(document: &Value) -> SearchKeywordCache {
    build_cache_from_strings(collect_strings(document))
}

/// Build the cache for the selected fields of a document.
pub fn build_field_cache(document: &Value, fields: &[String]) -> SearchKeywordCache {
    build_cache_from_strings(collect_field_strings(document, fields))
}

/// Build a cache from source strings, each one a bigram boundary.
#[instrument(level = "trace", skip_all)]
pub fn build_cache_from_strings<'a, I>(strings: I) -> SearchKeywordCache
where
    I: IntoIterator<Item = &'a str>,
{
    let mut words: Vec<String> = Vec::new();
    let mut frequency: HashMap<String, u32> = HashMap::new();
    let mut position: HashMap<String, Vec<u32>> = HashMap::new();
    let mut words2: Vec<String> = Vec::new();

    for source in strings {
        let tokens = tokenize(source);
        words2.extend(bigrams(&tokens));

        for token in tokens {
            let offset = words.len() as u32;
            *frequency.entry(token.clone()).or_insert(0) += 1;
            position.entry(token.clone()).or_default().push(offset);
            words.push(token);
        }
    }

    let mut frequency2: HashMap<String, u32> = HashMap::with_capacity(words2.len());
    for bigram in &words2 {
        *frequency2.entry(bigram.clone()).or_insert(0) += 1;
    }

    let mut filtered_words = words.clone();
    filtered_words.sort_unstable();
    filtered_words.dedup();

    SearchKeywordCache {
        words,
        frequency,
        position,
        words2,
        frequency2,
        filtered_words,
    }
}

/// Adjacent-pair bigrams "a b" of a flat token sequence.
///
/// `n` tokens give `n - 1` bigrams; fewer than two give none.
pub fn bigrams(tokens: &[String]) -> Vec<String> {
    tokens
        .windows(2)
        .map(|pair| format!("{} {}", pair[0], pair[1]))
        .collect()
}
