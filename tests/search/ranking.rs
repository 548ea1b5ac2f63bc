//! Ranking order on small hand-built corpora.

use crate::common::*;
use quizdex::{EngineConfig, ScoreParams};

#[test]
fn test_fox_corpus_quick_dog_ranks_d2_first() {
    let engine = engine_with(fox_corpus());
    let ids = ranked_ids(&engine, "quick dog");

    assert_eq!(ids.len(), 3, "every document matches one term: {:?}", ids);
    assert_eq!(ids[0], "D2", "D2 holds both terms: {:?}", ids);
}

#[test]
fn test_scores_are_descending_and_positive() {
    let engine = engine_with(biology_deck());
    let results = ranked(&engine, "cell mitochondria");

    assert!(!results.is_empty());
    for pair in results.windows(2) {
        assert!(
            pair[0].score >= pair[1].score,
            "{} ({}) ranked above {} ({})",
            pair[0].doc_id,
            pair[0].score,
            pair[1].doc_id,
            pair[1].score
        );
    }
    assert!(results.iter().all(|r| r.score > 0.0));
}

#[test]
fn test_answer_field_is_searchable() {
    let engine = engine_with_config(biology_deck(), card_config());
    let ids = ranked_ids(&engine, "photosynthesis");
    assert_eq!(ids, vec!["bio-3"]);
}

#[test]
fn test_cell_wall_prefers_the_card_with_both_terms() {
    let engine = engine_with_config(biology_deck(), card_config());
    let ids = ranked_ids(&engine, "cell wall");
    assert_eq!(ids.first().map(String::as_str), Some("bio-4"));
}

#[test]
fn test_unconfigured_fields_are_not_indexed() {
    // Tags are outside question/answers
    let engine = engine_with_config(biology_deck(), card_config());
    assert!(ranked_ids(&engine, "botany").is_empty());

    // The default schema indexes the whole document
    let engine = engine_with(biology_deck());
    let ids = ranked_ids(&engine, "botany");
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&"bio-3".to_string()));
    assert!(ids.contains(&"bio-4".to_string()));
}

#[test]
fn test_unknown_terms_match_nothing() {
    let engine = engine_with(fox_corpus());
    assert!(ranked_ids(&engine, "zebra").is_empty());
}

#[test]
fn test_stop_word_query_matches_nothing() {
    let engine = engine_with(fox_corpus());
    let ranking = engine
        .rank(CARDS, "the of and", Default::default())
        .unwrap();
    assert!(ranking.keywords.is_empty());
    assert!(ranking.results.is_empty());
}

#[test]
fn test_discard_threshold_drops_weak_matches() {
    let config = EngineConfig {
        score_params: ScoreParams {
            discard_threshold: 1e6,
            ..ScoreParams::default()
        },
        ..EngineConfig::default()
    };
    let engine = engine_with_config(fox_corpus(), config);
    assert!(ranked_ids(&engine, "quick dog").is_empty());
}

#[test]
fn test_single_token_positional_pass_changes_nothing() {
    let plain = engine_with(biology_deck());
    let config = EngineConfig {
        score_params: ScoreParams {
            calc_pos_score: true,
            ..ScoreParams::default()
        },
        ..EngineConfig::default()
    };
    let positional = engine_with_config(biology_deck(), config);

    let a = ranked(&plain, "mitochondria");
    let b = ranked(&positional, "mitochondria");
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(&b) {
        assert_eq!(x.doc_id, y.doc_id);
        assert_eq!(x.score, y.score);
    }
}

#[test]
fn test_positional_pass_rewards_adjacent_terms() {
    let docs = vec![
        make_text_doc("near", "brown dog barks"),
        make_text_doc("far", "brown cat sits near a big sleepy old tired dog"),
    ];
    let config = EngineConfig {
        score_params: ScoreParams {
            calc_pos_score: true,
            ..ScoreParams::default()
        },
        ..EngineConfig::default()
    };
    let positional = engine_with_config(docs.clone(), config);
    let plain = engine_with(docs);

    let with_bonus = ranked(&positional, "brown dog");
    let without = ranked(&plain, "brown dog");
    assert_eq!(with_bonus[0].doc_id, "near");

    let near = |list: &[quizdex::ScoredResult]| {
        list.iter()
            .find(|r| r.doc_id == "near")
            .map(|r| r.score)
            .unwrap()
    };
    assert!(near(&with_bonus) > near(&without));
}
