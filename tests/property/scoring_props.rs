//! BM25 scoring invariants.

use crate::strategies::{corpus, query, word};
use proptest::prelude::*;
use quizdex::corpus::{idf, stats_from_caches};
use quizdex::keywords::build_cache_from_strings;
use quizdex::scoring::unigram_score;
use quizdex::{score, Query, ScoreParams, SearchKeywordCache};

fn caches(texts: &[String]) -> Vec<(String, SearchKeywordCache)> {
    texts
        .iter()
        .enumerate()
        .map(|(i, t)| (format!("d{}", i), build_cache_from_strings([t.as_str()])))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: rarer terms never weigh less.
    #[test]
    fn prop_idf_monotone_in_document_frequency(n in 1u32..500, a in 0u32..500, b in 0u32..500) {
        let (a, b) = (a.min(n), b.min(n));
        prop_assume!(a < b);
        prop_assert!(idf(n, a) >= idf(n, b));
        prop_assert!(idf(n, b) > 0.0);
    }

    /// Property: corpus IDF follows document frequency.
    #[test]
    fn prop_corpus_idf_monotone(texts in corpus()) {
        let docs = caches(&texts);
        let stats = stats_from_caches(docs.iter().map(|(_, c)| c));
        for (x, &dfx) in &stats.word_appeared {
            for (y, &dfy) in &stats.word_appeared {
                if dfx < dfy {
                    prop_assert!(stats.idf[x] >= stats.idf[y], "{} vs {}", x, y);
                }
            }
        }
    }

    /// Property: unigram and final scores are never negative or NaN.
    #[test]
    fn prop_scores_non_negative(texts in corpus(), q in query()) {
        let docs = caches(&texts);
        let stats = stats_from_caches(docs.iter().map(|(_, c)| c));
        let params = ScoreParams::default();

        for (_, cache) in &docs {
            let u = unigram_score(&stats, cache, &q, &params);
            prop_assert!(u >= 0.0 && u.is_finite());
        }
        for result in score(&stats, &Query::new(q), docs, &params) {
            prop_assert!(result.score >= 0.0 && result.score.is_finite());
        }
    }

    /// Property: a document under the threshold never appears, whatever
    /// its bigram score would have been.
    #[test]
    fn prop_discard_is_absolute(texts in corpus(), q in query(), threshold in 0.0f64..3.0) {
        let docs = caches(&texts);
        let stats = stats_from_caches(docs.iter().map(|(_, c)| c));
        let params = ScoreParams { discard_threshold: threshold, ..ScoreParams::default() };

        let below: Vec<String> = docs
            .iter()
            .filter(|(_, c)| unigram_score(&stats, c, &q, &params) < threshold)
            .map(|(id, _)| id.clone())
            .collect();
        let results = score(&stats, &Query::new(q), docs, &params);
        for result in &results {
            prop_assert!(!below.contains(&result.doc_id));
        }
    }

    /// Property: results come back sorted, best first, each id once.
    #[test]
    fn prop_results_sorted_and_unique(texts in corpus(), q in query(), positional in any::<bool>()) {
        let docs = caches(&texts);
        let stats = stats_from_caches(docs.iter().map(|(_, c)| c));
        let params = ScoreParams { calc_pos_score: positional, ..ScoreParams::default() };

        let results = score(&stats, &Query::new(q), docs, &params);
        for pair in results.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
        let mut ids: Vec<_> = results.iter().map(|r| r.doc_id.clone()).collect();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), results.len());
    }

    /// Property: a single-token query gets no positional bonus.
    #[test]
    fn prop_single_token_no_bonus(texts in corpus(), w in word()) {
        let docs = caches(&texts);
        let stats = stats_from_caches(docs.iter().map(|(_, c)| c));
        let plain = ScoreParams::default();
        let positional = ScoreParams { calc_pos_score: true, ..ScoreParams::default() };

        let a = score(&stats, &Query::new(vec![w.clone()]), docs.clone(), &plain);
        let b = score(&stats, &Query::new(vec![w]), docs, &positional);
        prop_assert_eq!(a, b);
    }
}
