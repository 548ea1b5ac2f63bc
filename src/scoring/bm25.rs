// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Okapi BM25 over the cached term statistics.
//!
//! ```text
//! score(D, Q) = Σ_{t ∈ Q} idf(t) · f(t,D)·(k1+1) / (f(t,D) + k1·(1 - b + b·|D|/avgdl))
//! ```
//!
//! The same formula scores unigrams (against `frequency`, `idf`,
//! `averageDocLength`) and bigrams (against `frequency2`, `idf2`,
//! `averageDocLength2`). Terms absent from the IDF table and terms with zero
//! frequency in the document contribute exactly 0, never a negative value.

use super::ScoreParams;
use crate::types::{Bm25GlobalCache, SearchKeywordCache, MIN_AVERAGE_DOC_LENGTH};

/// Contribution of one term.
#[inline]
pub fn term_score(idf: f64, tf: u32, doc_len: usize, avg_len: f64, k1: f64, b: f64) -> f64 {
    if tf == 0 {
        return 0.0;
    }
    let tf = f64::from(tf);
    let norm = 1.0 - b + b * doc_len as f64 / avg_len.max(MIN_AVERAGE_DOC_LENGTH);
    idf * (tf * (k1 + 1.0)) / (tf + k1 * norm)
}

/// Sum of [`term_score`] over `terms`, with lookups supplied by the caller.
pub fn term_sum<'a, I, W, F>(
    terms: I,
    weight: W,
    frequency: F,
    doc_len: usize,
    avg_len: f64,
    params: &ScoreParams,
) -> f64
where
    I: IntoIterator<Item = &'a String>,
    W: Fn(&str) -> Option<f64>,
    F: Fn(&str) -> u32,
{
    terms
        .into_iter()
        .filter_map(|term| weight(term).map(|idf| (idf, frequency(term))))
        .map(|(idf, tf)| term_score(idf, tf, doc_len, avg_len, params.k1, params.b))
        .sum()
}

/// BM25 over the query's unigrams.
pub fn unigram_score(
    corpus: &Bm25GlobalCache,
    doc: &SearchKeywordCache,
    unigrams: &[String],
    params: &ScoreParams,
) -> f64 {
    term_sum(
        unigrams,
        |t| corpus.idf(t),
        |t| doc.term_frequency(t),
        doc.words.len(),
        corpus.average_doc_length,
        params,
    )
}

/// BM25 over the query's bigrams.
pub fn bigram_score(
    corpus: &Bm25GlobalCache,
    doc: &SearchKeywordCache,
    bigrams: &[String],
    params: &ScoreParams,
) -> f64 {
    term_sum(
        bigrams,
        |t| corpus.idf2(t),
        |t| doc.bigram_frequency(t),
        doc.words2.len(),
        corpus.average_doc_length2,
        params,
    )
}
