//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use crate::config::{CollectionSchema, EngineConfig};
use crate::engine::SearchEngine;
use crate::store::{Document, MemoryStore};
use serde_json::{json, Value};

/// Collection name used by the fixtures.
pub const CARDS: &str = "cards";

/// A quiz card with a question, answers and tags.
pub fn make_card(id: &str, question: &str, answers: &[&str], tags: &[&str]) -> Document {
    Document::new(
        id,
        json!({
            "id": id,
            "question": question,
            "answers": answers,
            "tags": tags,
        }),
    )
}

/// A document whose whole body is one string.
pub fn make_text_doc(id: &str, text: &str) -> Document {
    Document::new(id, Value::String(text.to_string()))
}

/// Memory store holding `docs` in [`CARDS`].
pub fn store_with(docs: impl IntoIterator<Item = Document>) -> MemoryStore {
    let store = MemoryStore::new();
    for doc in docs {
        store.upsert(CARDS, doc);
    }
    store
}

/// Engine over `docs` with default configuration.
pub fn engine_with(docs: impl IntoIterator<Item = Document>) -> SearchEngine<MemoryStore> {
    engine_with_config(docs, EngineConfig::default())
}

/// Engine over `docs` with `config`.
///
/// Panics if `config` is invalid; fixtures are expected to be valid.
pub fn engine_with_config(
    docs: impl IntoIterator<Item = Document>,
    config: EngineConfig,
) -> SearchEngine<MemoryStore> {
    match SearchEngine::new(store_with(docs), config) {
        Ok(engine) => engine,
        Err(e) => panic!("fixture config rejected: {}", e),
    }
}

/// Config indexing only `question` and `answers` of [`CARDS`].
pub fn card_config() -> EngineConfig {
    EngineConfig {
        collections: vec![CollectionSchema::new(CARDS).with_fields(["question", "answers"])],
        ..EngineConfig::default()
    }
}

/// The three-document corpus from the ranking example.
pub fn fox_corpus() -> Vec<Document> {
    vec![
        make_text_doc("D1", "the quick brown fox"),
        make_text_doc("D2", "quick brown dog"),
        make_text_doc("D3", "lazy dog sleeps"),
    ]
}

/// A small biology deck.
pub fn biology_deck() -> Vec<Document> {
    vec![
        make_card(
            "bio-1",
            "What is the powerhouse of the cell?",
            &["Mitochondria"],
            &["Cell Biology"],
        ),
        make_card(
            "bio-2",
            "Which organelle holds the cell's genetic material?",
            &["Nucleus"],
            &["Cell Biology", "Genetics"],
        ),
        make_card(
            "bio-3",
            "What process turns light into chemical energy?",
            &["Photosynthesis"],
            &["Botany"],
        ),
        make_card(
            "bio-4",
            "What surrounds a plant cell outside the membrane?",
            &["The cell wall"],
            &["Botany", "Cell Biology"],
        ),
        make_card(
            "bio-5",
            "Where does cellular respiration happen?",
            &["In the mitochondria"],
            &["Metabolism"],
        ),
    ]
}
