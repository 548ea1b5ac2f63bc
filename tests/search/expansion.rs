//! Query expansion through the word and tag tries.

use crate::common::*;
use quizdex::{EngineConfig, SearchOptions, Vocabulary};

#[test]
fn test_partial_word_expands_to_indexed_terms() {
    let engine = engine_with_config(biology_deck(), card_config());
    let ranking = engine
        .rank(CARDS, "mitochon", SearchOptions::default())
        .unwrap();

    assert_eq!(ranking.keywords[0], "mitochon", "raw token stays first");
    assert!(ranking.keywords.contains(&"mitochondria".to_string()));

    let mut ids: Vec<_> = ranking.results.iter().map(|r| r.doc_id.as_str()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["bio-1", "bio-5"]);
}

#[test]
fn test_expansion_keeps_the_original_token() {
    let engine = engine_with_config(biology_deck(), card_config());
    let page = engine
        .search(CARDS, "cell", 10, 0, SearchOptions::default())
        .unwrap();

    assert_eq!(page.keywords[0], "cell");
    assert!(page.keywords.contains(&"cellular".to_string()));
    assert!(page_ids(&page.result).contains(&"bio-5"));
}

#[test]
fn test_max_expansions_caps_trie_results() {
    let config = EngineConfig {
        max_expansions: Some(1),
        ..card_config()
    };
    let engine = engine_with_config(biology_deck(), config);
    let ranking = engine.rank(CARDS, "cel", SearchOptions::default()).unwrap();
    assert_eq!(ranking.keywords.len(), 2);
    assert_eq!(ranking.keywords[0], "cel");
}

#[test]
fn test_tag_expansion_only_when_asked() {
    let engine = engine_with_config(biology_deck(), card_config());

    let plain = engine.rank(CARDS, "botan", SearchOptions::default()).unwrap();
    assert_eq!(plain.keywords, vec!["botan"]);

    let tagged = engine
        .rank(CARDS, "botan", SearchOptions { use_tag: true })
        .unwrap();
    assert!(tagged.keywords.contains(&"botany".to_string()));
}

#[test]
fn test_tag_words_reach_indexed_text() {
    let engine = engine_with_config(biology_deck(), card_config());
    let page = engine
        .search(CARDS, "metab", 10, 0, SearchOptions { use_tag: true })
        .unwrap();

    // "Metabolism" is only a tag, so nothing in question/answers matches it
    assert!(page.keywords.contains(&"metabolism".to_string()));
    assert!(page.result.is_empty());

    let page = engine
        .search(CARDS, "genet", 10, 0, SearchOptions { use_tag: true })
        .unwrap();
    assert!(page_ids(&page.result).contains(&"bio-2"));
}

#[test]
fn test_prefix_search_words_and_tags() {
    let engine = engine_with_config(biology_deck(), card_config());

    let mut words = engine
        .prefix_search(CARDS, Vocabulary::Words, "Mito", None)
        .unwrap();
    words.sort();
    assert_eq!(words, vec!["mitochondria"]);

    let mut tags = engine
        .prefix_search(CARDS, Vocabulary::Tags, "cell", None)
        .unwrap();
    tags.sort();
    assert_eq!(tags, vec!["cell biology"]);

    let tags = engine
        .prefix_search(CARDS, Vocabulary::Tags, "b", Some(5))
        .unwrap();
    assert_eq!(tags, vec!["botany"]);

    assert!(engine
        .prefix_search(CARDS, Vocabulary::Tags, "zz", None)
        .unwrap()
        .is_empty());
}
