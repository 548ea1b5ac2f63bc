//! Repeated searches return identical rankings.

use crate::common::*;
use quizdex::{EngineConfig, ScoreParams, SearchOptions};

#[test]
fn test_repeated_search_is_stable() {
    let engine = engine_with(biology_deck());
    let first = ranked(&engine, "cell energy mitochondria");
    for _ in 0..10 {
        assert_eq!(ranked(&engine, "cell energy mitochondria"), first);
    }
}

#[test]
fn test_cache_hit_matches_fresh_rebuild() {
    let engine = engine_with(biology_deck());
    let cached = ranked(&engine, "what surrounds the cell");

    engine.invalidate(CARDS).unwrap();
    let fresh = ranked(&engine, "what surrounds the cell");
    assert_eq!(cached.len(), fresh.len());
    for (a, b) in cached.iter().zip(&fresh) {
        assert_eq!(a.doc_id, b.doc_id);
        assert!((a.score - b.score).abs() < 1e-9);
    }
}

#[test]
fn test_separate_engines_agree() {
    let a = engine_with(biology_deck());
    let b = engine_with(biology_deck());
    assert_eq!(
        ranked_ids(&a, "genetic material nucleus"),
        ranked_ids(&b, "genetic material nucleus")
    );
}

#[test]
fn test_unigram_ratio_changes_scores() {
    let engine = engine_with(fox_corpus());
    let config = EngineConfig {
        score_params: ScoreParams {
            unigram_ratio: 1.0,
            ..ScoreParams::default()
        },
        ..EngineConfig::default()
    };
    let unigram_only = engine_with_config(fox_corpus(), config);

    let blended = engine
        .search_scored(CARDS, "quick brown", 10, 0, SearchOptions::default())
        .unwrap();
    let plain = unigram_only
        .search_scored(CARDS, "quick brown", 10, 0, SearchOptions::default())
        .unwrap();
    assert_eq!(blended.result.len(), plain.result.len());
    assert_ne!(blended.result[0].score, plain.result[0].score);
}
