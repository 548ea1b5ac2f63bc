// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Corpus statistics: document frequencies, IDF and average lengths.
//!
//! One full pass over a collection. For each document the stored keyword
//! cache is reused when the store vouches for it, otherwise it is rebuilt from
//! the schema's fields and handed back for persistence. There is no
//! incremental update: adding one card means another full pass.
//!
//! # Formulas
//!
//! ```text
//! idf(t)        = max(1e-8, ln((N - df(t) + 0.5) / (df(t) + 0.5)))
//! avgDocLength  = max(0.1, Σ|words|  / max(N, 1))
//! avgDocLength2 = max(0.1, Σ|words2| / max(N, 1))
//! ```
//!
//! The floor on IDF matters: a term in more than half the documents has a
//! negative raw IDF, and a negative weight would let "more matches" mean
//! "worse score". Floored, such terms contribute a tiny positive amount.

use crate::config::CollectionSchema;
use crate::error::{Result, StoreError};
use crate::keywords::{build_field_cache, collect_strings, lookup_path};
use crate::store::{Document, StoredEntry};
use crate::trie::Trie;
use crate::types::{Bm25GlobalCache, SearchKeywordCache, MIN_AVERAGE_DOC_LENGTH, MIN_IDF};
use crate::util::normalize::normalize;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, instrument};

/// Everything persisted per collection: statistics plus vocabulary tries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusSnapshot {
    pub stats: Bm25GlobalCache,
    /// Trie over every indexed word token.
    pub words: Trie,
    /// Trie over whole tag names.
    pub tags: Trie,
}

/// IDF with the positivity floor.
#[inline]
pub fn idf(total_docs: u32, document_frequency: u32) -> f64 {
    let n = f64::from(total_docs);
    let df = f64::from(document_frequency);
    ((n - df + 0.5) / (df + 0.5)).ln().max(MIN_IDF)
}

/// Average length with the non-zero floor.
#[inline]
pub fn average_length(total_length: u64, total_docs: u32) -> f64 {
    (total_length as f64 / f64::from(total_docs.max(1))).max(MIN_AVERAGE_DOC_LENGTH)
}

/// Running totals for one pass over a collection.
#[derive(Debug, Default)]
pub struct CorpusAccumulator {
    word_appeared: BTreeMap<String, u32>,
    word_appeared2: BTreeMap<String, u32>,
    total_length: u64,
    total_length2: u64,
    total_docs: u32,
    vocabulary: BTreeSet<String>,
    tags: BTreeSet<String>,
}

impl CorpusAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one document's cache into the totals.
    pub fn add(&mut self, cache: &SearchKeywordCache) {
        // frequency keys are distinct, so this counts documents, not occurrences
        for term in cache.frequency.keys() {
            *self.word_appeared.entry(term.clone()).or_insert(0) += 1;
        }
        for bigram in cache.frequency2.keys() {
            *self.word_appeared2.entry(bigram.clone()).or_insert(0) += 1;
        }
        self.vocabulary.extend(cache.filtered_words.iter().cloned());
        self.total_length += cache.words.len() as u64;
        self.total_length2 += cache.words2.len() as u64;
        self.total_docs += 1;
    }

    /// Record tag names for the tag vocabulary.
    pub fn add_tags<I>(&mut self, tags: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.tags.extend(tags);
    }

    /// Compute IDF tables and averages, and build the tries.
    pub fn finish(self) -> CorpusSnapshot {
        let total_docs = self.total_docs;
        let idf_table = |appeared: &BTreeMap<String, u32>| -> BTreeMap<String, f64> {
            appeared
                .iter()
                .map(|(term, &df)| (term.clone(), idf(total_docs, df)))
                .collect()
        };

        let stats = Bm25GlobalCache {
            idf: idf_table(&self.word_appeared),
            idf2: idf_table(&self.word_appeared2),
            word_appeared: self.word_appeared,
            word_appeared2: self.word_appeared2,
            average_doc_length: average_length(self.total_length, total_docs),
            average_doc_length2: average_length(self.total_length2, total_docs),
            total_docs,
        };

        CorpusSnapshot {
            stats,
            words: Trie::build(&self.vocabulary),
            tags: Trie::build(&self.tags),
        }
    }
}

/// Statistics over an in-memory set of caches. No tries, no store.
pub fn stats_from_caches<'a, I>(caches: I) -> Bm25GlobalCache
where
    I: IntoIterator<Item = &'a SearchKeywordCache>,
{
    let mut acc = CorpusAccumulator::new();
    for cache in caches {
        acc.add(cache);
    }
    acc.finish().stats
}

/// Lower-cased, trimmed, non-empty tag names of a document.
///
/// The tag field may hold a string or (nested) arrays of strings.
pub fn document_tags(body: &serde_json::Value, tag_field: &str) -> Vec<String> {
    lookup_path(body, tag_field)
        .map(collect_strings)
        .unwrap_or_default()
        .into_iter()
        .map(|tag| normalize(tag.trim()))
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Whether a document's cache was reused or had to be recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Reused,
    Rebuilt,
}

/// The cache to index `entry` with, and whether it had to be built.
pub fn resolve_cache(
    entry: StoredEntry,
    schema: &CollectionSchema,
) -> (Document, SearchKeywordCache, CacheStatus) {
    match entry.cache {
        Some(cache) => (entry.document, cache, CacheStatus::Reused),
        None => {
            let cache = build_field_cache(&entry.document.body, &schema.fields);
            (entry.document, cache, CacheStatus::Rebuilt)
        }
    }
}

/// Full rebuild of a collection's corpus snapshot.
///
/// `cursor` yields each document with its still-valid stored cache, if any.
/// Every cache that had to be recomputed is passed to `commit` before the
/// pass continues. Store errors from either side abort the pass unchanged.
#[instrument(level = "debug", skip_all, fields(collection = %schema.name))]
pub fn build_corpus_stats<I, F>(
    cursor: I,
    schema: &CollectionSchema,
    mut commit: F,
) -> Result<CorpusSnapshot>
where
    I: IntoIterator<Item = std::result::Result<StoredEntry, StoreError>>,
    F: FnMut(&Document, &SearchKeywordCache) -> std::result::Result<(), StoreError>,
{
    let mut acc = CorpusAccumulator::new();
    let mut rebuilt = 0usize;

    for entry in cursor {
        let (document, cache, status) = resolve_cache(entry?, schema);
        if status == CacheStatus::Rebuilt {
            commit(&document, &cache)?;
            rebuilt += 1;
        }
        acc.add(&cache);
        if let Some(tag_field) = &schema.tag_field {
            acc.add_tags(document_tags(&document.body, tag_field));
        }
    }

    let snapshot = acc.finish();
    debug!(
        docs = snapshot.stats.total_docs,
        vocabulary = snapshot.words.len(),
        tags = snapshot.tags.len(),
        rebuilt,
        "corpus pass complete"
    );
    Ok(snapshot)
}
