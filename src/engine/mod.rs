// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The search surface: query in, ranked page out.
//!
//! A search runs in four steps:
//!
//! 1. **Tokenize** the query text (normalization, language detection, stop words).
//! 2. **Load the corpus** for the collection: LRU, then the persisted blob,
//!    then a full rebuild over the store's cursor.
//! 3. **Expand** every query token through the word trie (and the tag trie,
//!    when asked), then **score** every document.
//! 4. **Paginate** the ranked list and resolve ids back to documents.
//!
//! Ranked lists are cached per `(collection, keywords, use_tag, k1, b,
//! threshold)`. Any document change in a collection must be followed by
//! [`SearchEngine::invalidate`]; the next search rebuilds the corpus from
//! scratch. There is no incremental update of the statistics.
//!
//! Rebuilds of one collection are serialized by a per-collection lock, so two
//! threads that miss at the same time do one pass, not two.

mod cache;
mod page;

pub use cache::{EngineCaches, RankedList, ScoreKey};
pub use page::paginate;

use crate::binary::{corpus_key, decode_snapshot, encode_snapshot};
use crate::config::{capacity, CollectionSchema, EngineConfig};
use crate::corpus::{build_corpus_stats, resolve_cache, CacheStatus, CorpusSnapshot};
use crate::error::Result;
use crate::scoring::{score, Query};
use crate::store::{Document, DocumentStore};
use crate::tokenize::tokenize;
use crate::types::{ScoredResult, SearchPage};
use crate::util::normalize::normalize;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Per-query switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Also expand query tokens through the tag vocabulary.
    pub use_tag: bool,
}

/// Which trie a prefix search walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vocabulary {
    /// Indexed word tokens.
    Words,
    /// Whole tag names.
    Tags,
}

/// Ranked result list for one query, before pagination.
#[derive(Debug, Clone)]
pub struct Ranking {
    /// Expanded unigrams that were scored.
    pub keywords: Vec<String>,
    pub results: RankedList,
}

/// Search engine over a [`DocumentStore`].
pub struct SearchEngine<S> {
    store: S,
    config: EngineConfig,
    caches: EngineCaches,
    rebuild_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<S: DocumentStore> SearchEngine<S> {
    /// Validate `config` and wrap `store`.
    pub fn new(store: S, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let caches = EngineCaches::new(
            capacity("scoreCacheCapacity", config.score_cache_capacity)?,
            capacity("corpusCacheCapacity", config.corpus_cache_capacity)?,
        );
        Ok(Self {
            store,
            config,
            caches,
            rebuild_locks: Mutex::new(HashMap::new()),
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Schema used to index `collection`.
    pub fn schema(&self, collection: &str) -> CollectionSchema {
        self.config.schema(collection)
    }

    /// Cache entry counts `(ranked lists, corpora)`.
    pub fn cache_entries(&self) -> (usize, usize) {
        self.caches.entry_counts()
    }

    // =========================================================================
    // SEARCH
    // =========================================================================

    /// One page of documents matching `query`, best first.
    ///
    /// `page` is 0-based and `page_size` is floored to 1. Ids whose document
    /// has vanished from the store since ranking are skipped.
    pub fn search(
        &self,
        collection: &str,
        query: &str,
        page_size: usize,
        page: usize,
        options: SearchOptions,
    ) -> Result<SearchPage<Document>> {
        let scored = self.search_scored(collection, query, page_size, page, options)?;
        let mut documents = Vec::with_capacity(scored.result.len());
        for hit in &scored.result {
            if let Some(document) = self.store.get_document(collection, &hit.doc_id)? {
                documents.push(document);
            }
        }
        Ok(SearchPage {
            query: scored.query,
            keywords: scored.keywords,
            result: documents,
            total_pages: scored.total_pages,
        })
    }

    /// Like [`search`](Self::search), but returns ids with their scores.
    pub fn search_scored(
        &self,
        collection: &str,
        query: &str,
        page_size: usize,
        page: usize,
        options: SearchOptions,
    ) -> Result<SearchPage<ScoredResult>> {
        let ranking = self.rank(collection, query, options)?;
        let (result, total_pages) = paginate(&ranking.results, page_size, page);
        Ok(SearchPage {
            query: query.to_string(),
            keywords: ranking.keywords,
            result,
            total_pages,
        })
    }

    /// Full ranked list for `query`.
    #[instrument(level = "debug", skip(self))]
    pub fn rank(&self, collection: &str, query: &str, options: SearchOptions) -> Result<Ranking> {
        let raw = tokenize(query);
        if raw.is_empty() {
            debug!("query has no tokens");
            return Ok(Ranking {
                keywords: Vec::new(),
                results: Arc::new(Vec::new()),
            });
        }

        let corpus = self.corpus(collection)?;
        let keywords = self.expand(&corpus, &raw, options);
        let params = &self.config.score_params;
        let key = ScoreKey::new(collection, &raw, &keywords, options.use_tag, params);

        if let Some(results) = self.caches.scores(&key) {
            debug!(hits = results.len(), "score cache hit");
            return Ok(Ranking { keywords, results });
        }

        let schema = self.schema(collection);
        let mut docs = Vec::new();
        for entry in self.store.documents(collection)? {
            let (document, cache, status) = resolve_cache(entry?, &schema);
            if status == CacheStatus::Rebuilt {
                self.store
                    .commit_document_cache(collection, &document, &cache)?;
            }
            docs.push((document.id, cache));
        }

        let query = Query::expanded(raw, keywords.clone());
        let results = Arc::new(score(&corpus.stats, &query, docs, params));
        debug!(
            candidates = results.len(),
            keywords = keywords.len(),
            "scored"
        );
        self.caches.put_scores(key, Arc::clone(&results));
        Ok(Ranking { keywords, results })
    }

    /// Raw tokens first, then their word-trie expansions, then tokens of
    /// matching tag names. First occurrence wins.
    fn expand(
        &self,
        corpus: &CorpusSnapshot,
        raw: &[String],
        options: SearchOptions,
    ) -> Vec<String> {
        let limit = self.config.max_expansions;
        let mut seen: HashSet<String> = HashSet::new();
        let mut keywords = Vec::new();
        let mut push = |word: String| {
            if seen.insert(word.clone()) {
                keywords.push(word);
            }
        };

        for token in raw {
            push(token.clone());
        }
        for token in raw {
            for expansion in corpus.words.expansions(token, limit) {
                push(expansion);
            }
        }
        if options.use_tag {
            for token in raw {
                for tag in corpus.tags.search(token, limit) {
                    for word in tokenize(&tag) {
                        push(word);
                    }
                }
            }
        }

        keywords
    }

    /// Completions of `prefix` from a collection's word or tag vocabulary.
    pub fn prefix_search(
        &self,
        collection: &str,
        vocabulary: Vocabulary,
        prefix: &str,
        limit: Option<usize>,
    ) -> Result<Vec<String>> {
        let corpus = self.corpus(collection)?;
        let prefix = normalize(prefix.trim());
        let trie = match vocabulary {
            Vocabulary::Words => &corpus.words,
            Vocabulary::Tags => &corpus.tags,
        };
        Ok(trie.search(&prefix, limit))
    }

    // =========================================================================
    // CORPUS LIFECYCLE
    // =========================================================================

    fn rebuild_lock(&self, collection: &str) -> Arc<Mutex<()>> {
        Arc::clone(
            self.rebuild_locks
                .lock()
                .entry(collection.to_string())
                .or_default(),
        )
    }

    /// Corpus snapshot for `collection`: cached, persisted, or rebuilt.
    pub fn corpus(&self, collection: &str) -> Result<Arc<CorpusSnapshot>> {
        if let Some(snapshot) = self.caches.corpus(collection) {
            return Ok(snapshot);
        }

        let lock = self.rebuild_lock(collection);
        let _guard = lock.lock();

        // Another caller may have finished while we waited
        if let Some(snapshot) = self.caches.corpus(collection) {
            return Ok(snapshot);
        }

        if let Some(snapshot) = self.load_persisted(collection)? {
            let snapshot = Arc::new(snapshot);
            self.caches.put_corpus(collection, Arc::clone(&snapshot));
            return Ok(snapshot);
        }

        self.rebuild_locked(collection)
    }

    /// Decode the stored blob. Corrupt blobs count as absent.
    fn load_persisted(&self, collection: &str) -> Result<Option<CorpusSnapshot>> {
        let Some(bytes) = self.store.load_corpus_stats(&corpus_key(collection))? else {
            debug!(collection, "no persisted corpus");
            return Ok(None);
        };
        match decode_snapshot(&bytes) {
            Ok(snapshot) => {
                debug!(collection, bytes = bytes.len(), "loaded persisted corpus");
                Ok(Some(snapshot))
            }
            Err(e) => {
                warn!(collection, error = %e, "discarding unreadable corpus blob");
                Ok(None)
            }
        }
    }

    /// Full rebuild and persist, ignoring any cached or stored snapshot.
    pub fn rebuild(&self, collection: &str) -> Result<Arc<CorpusSnapshot>> {
        let lock = self.rebuild_lock(collection);
        let _guard = lock.lock();
        self.caches.evict(collection);
        self.rebuild_locked(collection)
    }

    #[instrument(level = "info", skip(self))]
    fn rebuild_locked(&self, collection: &str) -> Result<Arc<CorpusSnapshot>> {
        let schema = self.schema(collection);
        let cursor = self.store.documents(collection)?;
        let snapshot = build_corpus_stats(cursor, &schema, |document, cache| {
            self.store
                .commit_document_cache(collection, document, cache)
        })?;

        let blob = encode_snapshot(&snapshot)?;
        self.store
            .save_corpus_stats(&corpus_key(collection), &blob)?;

        info!(
            docs = snapshot.stats.total_docs,
            vocabulary = snapshot.words.len(),
            tags = snapshot.tags.len(),
            blob_bytes = blob.len(),
            "corpus rebuilt"
        );

        let snapshot = Arc::new(snapshot);
        self.caches.put_corpus(collection, Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// Forget everything derived from `collection`.
    ///
    /// Call after any document create, update or delete. The next search or
    /// prefix lookup rebuilds the corpus.
    pub fn invalidate(&self, collection: &str) -> Result<()> {
        let lock = self.rebuild_lock(collection);
        let _guard = lock.lock();
        self.caches.evict(collection);
        self.store.remove_corpus_stats(&corpus_key(collection))?;
        debug!(collection, "invalidated");
        Ok(())
    }
}
