//! Coarse invalidation: every document change is followed by a rebuild.

use crate::common::*;
use quizdex::binary::corpus_key;
use quizdex::{DocumentStore, SearchOptions};

#[test]
fn test_new_document_visible_after_invalidate() {
    let engine = engine_with(fox_corpus());
    assert!(ranked_ids(&engine, "zebra").is_empty());

    engine
        .store()
        .upsert(CARDS, make_text_doc("D4", "zebra crossing"));
    // Cached statistics still describe the old corpus
    assert!(ranked_ids(&engine, "zebra").is_empty());

    engine.invalidate(CARDS).unwrap();
    assert_eq!(ranked_ids(&engine, "zebra"), vec!["D4"]);
}

#[test]
fn test_updated_document_is_reindexed() {
    let engine = engine_with(fox_corpus());
    assert!(ranked_ids(&engine, "sleeps").contains(&"D3".to_string()));

    engine
        .store()
        .upsert(CARDS, make_text_doc("D3", "lazy cat naps"));
    engine.invalidate(CARDS).unwrap();

    assert!(ranked_ids(&engine, "sleeps").is_empty());
    assert_eq!(ranked_ids(&engine, "naps"), vec!["D3"]);
}

#[test]
fn test_invalidate_clears_caches_and_blob() {
    let engine = engine_with(fox_corpus());
    engine
        .search(CARDS, "quick", 10, 0, SearchOptions::default())
        .unwrap();
    assert_eq!(engine.cache_entries(), (1, 1));
    assert!(engine
        .store()
        .load_corpus_stats(&corpus_key(CARDS))
        .unwrap()
        .is_some());

    engine.invalidate(CARDS).unwrap();
    assert_eq!(engine.cache_entries(), (0, 0));
    assert!(engine
        .store()
        .load_corpus_stats(&corpus_key(CARDS))
        .unwrap()
        .is_none());
}

#[test]
fn test_invalidate_leaves_other_collections_alone() {
    let engine = engine_with(fox_corpus());
    engine
        .store()
        .upsert("other", make_text_doc("x", "quick thinking"));

    engine.corpus(CARDS).unwrap();
    engine.corpus("other").unwrap();
    assert_eq!(engine.cache_entries().1, 2);

    engine.invalidate("other").unwrap();
    assert_eq!(engine.cache_entries().1, 1);
    assert!(engine
        .store()
        .load_corpus_stats(&corpus_key(CARDS))
        .unwrap()
        .is_some());
}

#[test]
fn test_search_commits_document_caches() {
    let engine = engine_with(fox_corpus());
    engine.corpus(CARDS).unwrap();

    for entry in engine.store().documents(CARDS).unwrap() {
        let entry = entry.unwrap();
        assert!(entry.cache.is_some(), "{} has no cache", entry.document.id);
    }
}

#[test]
fn test_empty_collection_searches_cleanly() {
    let engine = engine_with(Vec::<quizdex::Document>::new());
    let page = engine
        .search("nothing-here", "quick", 10, 0, SearchOptions::default())
        .unwrap();
    assert!(page.result.is_empty());
    assert_eq!(page.keywords, vec!["quick"]);
    assert_eq!(engine.corpus("nothing-here").unwrap().stats.total_docs, 0);
}
