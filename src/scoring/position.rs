// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Proximity bonus for adjacent query terms.
//!
//! BM25 is a bag of words: "cell wall" scores the same whether the two words
//! sit side by side or three paragraphs apart. The bigram blend catches exact
//! adjacency; this pass rewards near misses too.
//!
//! For each adjacent query pair `(tᵢ, tᵢ₊₁)` present in the document:
//!
//! ```text
//! contribution = (1 - distanceWeight · (minDistance - 1)) · ln(1 + matchCount)   if minDistance ≤ maxDistance
//!              = 0                                                              otherwise
//! bonus        = Σ contribution · validPairs / (|query| - 1)
//! ```
//!
//! The sum is scaled by the share of valid pairs, `validPairs / (|query| - 1)`,
//! not divided by the pair count, so a query whose pairs all occur keeps the
//! full sum.
//!
//! `matchCount` is the number of position pairs within `maxDistance`. Only the
//! top candidates get the bonus (see [`positional_candidates`]); the rest keep
//! their BM25 score. That cutoff can leave the final order slightly different
//! from a full pass.

use super::ScoreParams;
use crate::types::{ScoredResult, SearchKeywordCache};
use std::borrow::Borrow;

/// Closest approach of two terms and how often they come within range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Proximity {
    /// Smallest non-zero distance within `max_distance`, if any.
    pub min_distance: Option<u32>,
    /// Position pairs within `max_distance`.
    pub matches: u32,
}

/// Compare two ascending position lists.
///
/// The shorter list drives; for each of its positions a binary search finds
/// the window `[p - max_distance, p + max_distance]` in the longer one.
pub fn proximity(a: &[u32], b: &[u32], max_distance: u32) -> Proximity {
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let mut min_distance: Option<u32> = None;
    let mut matches = 0u32;

    for &p in short {
        let low = p.saturating_sub(max_distance);
        let high = p.saturating_add(max_distance);
        let start = long.partition_point(|&q| q < low);

        for &q in long[start..].iter().take_while(|&&q| q <= high) {
            let distance = p.abs_diff(q);
            // Same offset means the same token: identical query terms
            if distance == 0 {
                continue;
            }
            matches += 1;
            min_distance = Some(min_distance.map_or(distance, |m| m.min(distance)));
        }
    }

    Proximity {
        min_distance,
        matches,
    }
}

/// Contribution of one query-term pair.
pub fn pair_contribution(prox: Proximity, params: &ScoreParams) -> f64 {
    match prox.min_distance {
        Some(d) if d <= params.max_distance => {
            let closeness = (1.0 - params.distance_weight * (f64::from(d) - 1.0)).max(0.0);
            closeness * f64::from(prox.matches).ln_1p()
        }
        _ => 0.0,
    }
}

/// Proximity bonus of one document for a query phrase.
///
/// Single-token phrases and phrases with no pair present in the document
/// score exactly 0.
pub fn positional_bonus(
    doc: &SearchKeywordCache,
    phrase: &[String],
    params: &ScoreParams,
) -> f64 {
    if phrase.len() < 2 {
        return 0.0;
    }

    let mut total = 0.0;
    let mut valid_pairs = 0usize;

    for pair in phrase.windows(2) {
        let left = doc.positions(&pair[0]);
        let right = doc.positions(&pair[1]);
        if left.is_empty() || right.is_empty() {
            continue;
        }
        valid_pairs += 1;
        total += pair_contribution(proximity(left, right, params.max_distance), params);
    }

    if valid_pairs == 0 {
        return 0.0;
    }
    total * valid_pairs as f64 / (phrase.len() - 1) as f64
}

/// How many of `result_count` ranked candidates get the positional pass.
pub fn positional_candidates(result_count: usize, params: &ScoreParams) -> usize {
    let by_ratio = (params.calc_pos_score_ratio * result_count as f64).ceil() as usize;
    by_ratio.max(params.calc_pos_score_min_count).min(result_count)
}

/// Add the bonus to the top candidates of a descending list, then re-sort it.
pub fn apply_positional_bonus<C>(
    ranked: &mut [(ScoredResult, C)],
    phrase: &[String],
    params: &ScoreParams,
)
where
    C: Borrow<SearchKeywordCache>,
{
    if phrase.len() < 2 {
        return;
    }
    let top = positional_candidates(ranked.len(), params);
    for (result, doc) in ranked[..top].iter_mut() {
        let doc: &SearchKeywordCache = (*doc).borrow();
        result.score += positional_bonus(doc, phrase, params);
    }
    super::sort_descending(ranked);
}
