//! Shared test utilities and fixtures.

#![allow(dead_code)]

use quizdex::{Document, MemoryStore, ScoredResult, SearchEngine, SearchOptions};

// Re-export canonical test utilities from quizdex::testing
pub use quizdex::testing::{
    biology_deck, card_config, engine_with, engine_with_config, fox_corpus, make_card,
    make_text_doc, store_with, CARDS,
};

/// Ids of the full ranked list for `query`, best first.
pub fn ranked_ids(engine: &SearchEngine<MemoryStore>, query: &str) -> Vec<String> {
    ranked(engine, query).into_iter().map(|r| r.doc_id).collect()
}

/// Full ranked list for `query` without tag expansion.
pub fn ranked(engine: &SearchEngine<MemoryStore>, query: &str) -> Vec<ScoredResult> {
    engine
        .rank(CARDS, query, SearchOptions::default())
        .expect("ranking failed")
        .results
        .to_vec()
}

/// Ids of the documents on one page.
pub fn page_ids(docs: &[Document]) -> Vec<&str> {
    docs.iter().map(|d| d.id.as_str()).collect()
}
