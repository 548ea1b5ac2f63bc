// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The data that flows between the indexing stages.
//!
//! A document's text becomes a [`SearchKeywordCache`] (embedded on the document
//! record by the store), all caches of a collection aggregate into a
//! [`Bm25GlobalCache`], and a query against both produces [`ScoredResult`]s that
//! are paginated into a [`SearchPage`].
//!
//! # Invariants
//!
//! - **SearchKeywordCache**: `frequency[t] == position[t].len()`, every position
//!   list is strictly ascending, `Σ frequency == words.len()`, and no entry of
//!   `words2` pairs tokens from two different source strings.
//! - **Bm25GlobalCache**: every `idf`/`idf2` value is `>= 1e-8`, both average
//!   lengths are `>= 0.1` once built, and `wordAppeared[t] <= totalDocs`.
//!
//! Serialized field names are camelCase so stored records stay readable by
//! whatever persisted them originally.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Floor applied to every IDF weight so present terms never score zero or negative.
pub const MIN_IDF: f64 = 1e-8;

/// Floor applied to average document lengths so length normalization never divides by zero.
pub const MIN_AVERAGE_DOC_LENGTH: f64 = 0.1;

// =============================================================================
// PER-DOCUMENT CACHE
// =============================================================================

/// Token statistics for one document, recomputed whenever its content changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchKeywordCache {
    /// All tokens in document order.
    pub words: Vec<String>,
    /// Unigram term → occurrence count.
    pub frequency: HashMap<String, u32>,
    /// Term → ascending global token offsets (global across all fields).
    pub position: HashMap<String, Vec<u32>>,
    /// Adjacent-token bigrams ("a b"), never spanning two source strings.
    pub words2: Vec<String>,
    /// Bigram → occurrence count.
    pub frequency2: HashMap<String, u32>,
    /// Ascending, de-duplicated `words`; the document's vocabulary.
    pub filtered_words: Vec<String>,
}

impl SearchKeywordCache {
    /// Number of unigram tokens (the BM25 document length).
    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Occurrences of `term`, 0 when absent.
    #[inline]
    pub fn term_frequency(&self, term: &str) -> u32 {
        self.frequency.get(term).copied().unwrap_or(0)
    }

    /// Occurrences of `bigram`, 0 when absent.
    #[inline]
    pub fn bigram_frequency(&self, bigram: &str) -> u32 {
        self.frequency2.get(bigram).copied().unwrap_or(0)
    }

    /// Ascending token offsets of `term`, empty when absent.
    #[inline]
    pub fn positions(&self, term: &str) -> &[u32] {
        self.position.get(term).map(Vec::as_slice).unwrap_or(&[])
    }
}

// =============================================================================
// PER-COLLECTION CACHE
// =============================================================================

/// Corpus-wide BM25 statistics for one collection.
///
/// `Default` is the all-empty structure used when no corpus has been built
/// yet; every query term is then absent from `idf` and scores exactly 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bm25GlobalCache {
    /// Unigram → number of documents containing it.
    pub word_appeared: BTreeMap<String, u32>,
    /// Bigram → number of documents containing it.
    pub word_appeared2: BTreeMap<String, u32>,
    pub average_doc_length: f64,
    pub average_doc_length2: f64,
    pub idf: BTreeMap<String, f64>,
    pub idf2: BTreeMap<String, f64>,
    pub total_docs: u32,
}

impl Bm25GlobalCache {
    /// Unigram IDF, `None` when the term never occurs in the corpus.
    #[inline]
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.idf.get(term).copied()
    }

    /// Bigram IDF, `None` when the bigram never occurs in the corpus.
    #[inline]
    pub fn idf2(&self, bigram: &str) -> Option<f64> {
        self.idf2.get(bigram).copied()
    }

    /// Document frequency of a unigram, 0 when absent.
    #[inline]
    pub fn document_frequency(&self, term: &str) -> u32 {
        self.word_appeared.get(term).copied().unwrap_or(0)
    }

    /// Number of distinct unigrams in the corpus.
    #[inline]
    pub fn vocabulary_size(&self) -> usize {
        self.word_appeared.len()
    }
}

// =============================================================================
// RESULTS
// =============================================================================

/// A document identifier paired with its relevance score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredResult {
    pub doc_id: String,
    pub score: f64,
}

impl ScoredResult {
    pub fn new(doc_id: impl Into<String>, score: f64) -> Self {
        Self {
            doc_id: doc_id.into(),
            score,
        }
    }
}

/// One page of a ranked result list, as returned by `SearchEngine::search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage<T> {
    /// The raw query text as given.
    pub query: String,
    /// Expanded query keywords that were scored.
    pub keywords: Vec<String>,
    /// The requested page of resolved documents.
    pub result: Vec<T>,
    /// Total number of pages at the requested page size.
    pub total_pages: usize,
}

impl<T> SearchPage<T> {
    /// An empty page for queries that produced no tokens.
    pub fn empty(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            keywords: Vec::new(),
            result: Vec::new(),
            total_pages: 0,
        }
    }
}
