// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how search results get their numbers.
//!
//! Three signals, applied in order:
//!
//! 1. **Unigram BM25** over the query tokens (and their trie expansions).
//!    Documents below `discard_threshold` are dropped here, before any other
//!    work is done for them.
//! 2. **Bigram BM25** over adjacent query-token pairs, blended in:
//!    `final = unigram · unigramRatio + bigram · (1 - unigramRatio)`.
//! 3. **Positional bonus** (opt-in via `calc_pos_score`), added to the top
//!    candidates only. See [`position`].
//!
//! Scores are never negative: IDF weights are floored at a small positive
//! value and terms absent from the corpus contribute exactly 0.

pub mod bm25;
pub mod position;

pub use bm25::{bigram_score, term_score, term_sum, unigram_score};
pub use position::{apply_positional_bonus, positional_bonus, positional_candidates};

use crate::error::ConfigError;
use crate::keywords::bigrams;
use crate::tokenize::tokenize;
use crate::types::{Bm25GlobalCache, ScoredResult, SearchKeywordCache};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

// =============================================================================
// PARAMETERS
// =============================================================================

/// Tuning knobs for [`score`]. Every field has a default, so partial JSON
/// objects deserialize fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoreParams {
    /// Term-frequency saturation.
    pub k1: f64,
    /// Document-length normalization, in `[0, 1]`.
    pub b: f64,
    /// Unigram scores below this drop the document.
    pub discard_threshold: f64,
    /// Weight of the unigram score in the blend, in `[0, 1]`.
    pub unigram_ratio: f64,
    /// Enable the positional pass.
    pub calc_pos_score: bool,
    /// Minimum number of candidates the positional pass looks at.
    pub calc_pos_score_min_count: usize,
    /// Share of candidates the positional pass looks at, in `[0, 1]`.
    pub calc_pos_score_ratio: f64,
    /// Pairs further apart than this earn nothing.
    pub max_distance: u32,
    /// Bonus lost per extra token of distance.
    pub distance_weight: f64,
}

impl Default for ScoreParams {
    fn default() -> Self {
        Self {
            k1: 1.5,
            b: 0.75,
            discard_threshold: 1e-10,
            unigram_ratio: 0.7,
            calc_pos_score: false,
            calc_pos_score_min_count: 16,
            calc_pos_score_ratio: 0.3,
            max_distance: 6,
            distance_weight: 0.1,
        }
    }
}

impl ScoreParams {
    /// Reject values that would make scores negative, NaN or meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("k1", self.k1)?;
        unit_interval("b", self.b)?;
        non_negative("discardThreshold", self.discard_threshold)?;
        unit_interval("unigramRatio", self.unigram_ratio)?;
        unit_interval("calcPosScoreRatio", self.calc_pos_score_ratio)?;
        non_negative("distanceWeight", self.distance_weight)?;
        Ok(())
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            reason: format!("expected a finite value >= 0, got {}", value),
        })
    }
}

fn unit_interval(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            reason: format!("expected a value in [0, 1], got {}", value),
        })
    }
}

// =============================================================================
// QUERY
// =============================================================================

/// A tokenized query.
///
/// `unigrams` may contain trie expansions; `bigrams` and `phrase` always come
/// from the tokens the user actually typed, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub unigrams: Vec<String>,
    pub bigrams: Vec<String>,
    pub phrase: Vec<String>,
}

impl Query {
    /// Query over `tokens`, with bigrams derived from adjacent pairs.
    pub fn new(tokens: Vec<String>) -> Self {
        Self {
            bigrams: bigrams(&tokens),
            phrase: tokens.clone(),
            unigrams: tokens,
        }
    }

    /// Query over `tokens` with caller-supplied bigrams.
    pub fn with_bigrams(tokens: Vec<String>, bigrams: Vec<String>) -> Self {
        Self {
            phrase: tokens.clone(),
            unigrams: tokens,
            bigrams,
        }
    }

    /// Query whose unigrams were expanded from the raw token sequence.
    pub fn expanded(raw: Vec<String>, unigrams: Vec<String>) -> Self {
        Self {
            bigrams: bigrams(&raw),
            phrase: raw,
            unigrams,
        }
    }

    /// Normalize and tokenize `text`.
    pub fn parse(text: &str) -> Self {
        Self::new(tokenize(text))
    }

    pub fn is_empty(&self) -> bool {
        self.unigrams.is_empty()
    }
}

// =============================================================================
// RANKING
// =============================================================================

/// Stable descending sort by score.
pub(crate) fn sort_descending<C>(ranked: &mut [(ScoredResult, C)]) {
    ranked.sort_by(|a, b| b.0.score.total_cmp(&a.0.score));
}

/// Rank `docs` against `query`.
///
/// Returns surviving documents sorted by descending score; ties keep the
/// iteration order of `docs`. An empty query or an empty corpus yields an
/// empty list.
pub fn score<I, C>(
    corpus: &Bm25GlobalCache,
    query: &Query,
    docs: I,
    params: &ScoreParams,
) -> Vec<ScoredResult>
where
    I: IntoIterator<Item = (String, C)>,
    C: Borrow<SearchKeywordCache>,
{
    if query.is_empty() {
        return Vec::new();
    }

    let mut ranked: Vec<(ScoredResult, C)> = Vec::new();
    for (doc_id, cache) in docs {
        let doc = cache.borrow();
        let unigram = unigram_score(corpus, doc, &query.unigrams, params);
        if unigram < params.discard_threshold {
            continue;
        }
        let bigram = bigram_score(corpus, doc, &query.bigrams, params);
        let blended = unigram * params.unigram_ratio + bigram * (1.0 - params.unigram_ratio);
        ranked.push((ScoredResult::new(doc_id, blended), cache));
    }

    sort_descending(&mut ranked);

    if params.calc_pos_score {
        apply_positional_bonus(&mut ranked, &query.phrase, params);
    }

    ranked.into_iter().map(|(result, _)| result).collect()
}
