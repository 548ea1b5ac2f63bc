// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Process-local LRU caches.
//!
//! Both caches are pure performance caches: a miss only means recomputation.
//! Values are `Arc`s so a hit costs a refcount bump, never a deep clone, and
//! no lock is held while the caller uses the value.

use crate::corpus::CorpusSnapshot;
use crate::scoring::ScoreParams;
use crate::types::ScoredResult;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Identity of a ranked result list.
///
/// Floats are keyed by their bit patterns, so `0.75` and `0.7500000001` are
/// different entries and NaN never sneaks in as an unequal key.
///
/// `phrase` is the raw token sequence. Bigrams and the positional bonus come
/// from it, so "cell" and "cell cell" share keywords but not scores.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScoreKey {
    pub collection: String,
    pub phrase: Vec<String>,
    pub keywords: Vec<String>,
    pub use_tag: bool,
    k1: u64,
    b: u64,
    threshold: u64,
}

impl ScoreKey {
    pub fn new(
        collection: &str,
        phrase: &[String],
        keywords: &[String],
        use_tag: bool,
        params: &ScoreParams,
    ) -> Self {
        Self {
            collection: collection.to_string(),
            phrase: phrase.to_vec(),
            keywords: keywords.to_vec(),
            use_tag,
            k1: params.k1.to_bits(),
            b: params.b.to_bits(),
            threshold: params.discard_threshold.to_bits(),
        }
    }
}

pub type RankedList = Arc<Vec<ScoredResult>>;

/// The score cache and the corpus cache, each behind its own lock.
pub struct EngineCaches {
    scores: Mutex<LruCache<ScoreKey, RankedList>>,
    corpora: Mutex<LruCache<String, Arc<CorpusSnapshot>>>,
}

impl EngineCaches {
    pub fn new(score_capacity: NonZeroUsize, corpus_capacity: NonZeroUsize) -> Self {
        Self {
            scores: Mutex::new(LruCache::new(score_capacity)),
            corpora: Mutex::new(LruCache::new(corpus_capacity)),
        }
    }

    pub fn scores(&self, key: &ScoreKey) -> Option<RankedList> {
        self.scores.lock().get(key).cloned()
    }

    pub fn put_scores(&self, key: ScoreKey, ranked: RankedList) {
        self.scores.lock().put(key, ranked);
    }

    pub fn corpus(&self, collection: &str) -> Option<Arc<CorpusSnapshot>> {
        self.corpora.lock().get(collection).cloned()
    }

    pub fn put_corpus(&self, collection: &str, snapshot: Arc<CorpusSnapshot>) {
        self.corpora.lock().put(collection.to_string(), snapshot);
    }

    /// Drop every entry belonging to `collection` from both caches.
    pub fn evict(&self, collection: &str) {
        {
            let mut scores = self.scores.lock();
            let stale: Vec<ScoreKey> = scores
                .iter()
                .filter(|(key, _)| key.collection == collection)
                .map(|(key, _)| key.clone())
                .collect();
            for key in stale {
                scores.pop(&key);
            }
        }
        self.corpora.lock().pop(collection);
    }

    /// Entry counts `(scores, corpora)`.
    pub fn entry_counts(&self) -> (usize, usize) {
        (self.scores.lock().len(), self.corpora.lock().len())
    }
}
