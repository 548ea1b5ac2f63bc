//! Page slicing over the full ranked list.

use crate::common::*;
use quizdex::{SearchOptions, ScoredResult};

fn deck() -> Vec<quizdex::Document> {
    (0..23)
        .map(|i| make_text_doc(&format!("card-{:02}", i), &format!("enzyme sample {}", i)))
        .collect()
}

#[test]
fn test_pages_concatenate_to_full_ranking() {
    let engine = engine_with(deck());
    let full = ranked(&engine, "enzyme");
    assert_eq!(full.len(), 23);

    let first = engine
        .search_scored(CARDS, "enzyme", 5, 0, SearchOptions::default())
        .unwrap();
    assert_eq!(first.total_pages, 5);

    let mut joined: Vec<ScoredResult> = Vec::new();
    for page in 0..first.total_pages {
        let slice = engine
            .search_scored(CARDS, "enzyme", 5, page, SearchOptions::default())
            .unwrap();
        assert_eq!(slice.total_pages, 5);
        joined.extend(slice.result);
    }
    assert_eq!(joined, full);
}

#[test]
fn test_last_page_is_short() {
    let engine = engine_with(deck());
    let page = engine
        .search(CARDS, "enzyme", 10, 2, SearchOptions::default())
        .unwrap();
    assert_eq!(page.result.len(), 3);
    assert_eq!(page.total_pages, 3);
}

#[test]
fn test_page_past_the_end_is_empty() {
    let engine = engine_with(deck());
    let page = engine
        .search(CARDS, "enzyme", 10, 99, SearchOptions::default())
        .unwrap();
    assert!(page.result.is_empty());
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.query, "enzyme");
}

#[test]
fn test_zero_page_size_is_floored_to_one() {
    let engine = engine_with(deck());
    let page = engine
        .search(CARDS, "enzyme", 0, 0, SearchOptions::default())
        .unwrap();
    assert_eq!(page.result.len(), 1);
    assert_eq!(page.total_pages, 23);
}

#[test]
fn test_empty_query_gives_empty_page() {
    let engine = engine_with(deck());
    for query in ["", "   ", "?!"] {
        let page = engine
            .search(CARDS, query, 10, 0, SearchOptions::default())
            .unwrap();
        assert!(page.result.is_empty(), "query {:?}", query);
        assert!(page.keywords.is_empty(), "query {:?}", query);
        assert_eq!(page.total_pages, 0, "query {:?}", query);
    }
}

#[test]
fn test_removed_document_is_skipped_on_resolve() {
    let engine = engine_with(fox_corpus());
    // Warm the score cache, then delete without invalidating
    let before = engine
        .search(CARDS, "quick dog", 10, 0, SearchOptions::default())
        .unwrap();
    assert_eq!(before.result.len(), 3);

    assert!(engine.store().remove(CARDS, "D2"));
    let after = engine
        .search(CARDS, "quick dog", 10, 0, SearchOptions::default())
        .unwrap();
    assert_eq!(page_ids(&after.result), vec!["D1", "D3"]);
}
