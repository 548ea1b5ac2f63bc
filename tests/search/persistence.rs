//! The persisted corpus blob: reuse, corruption, and file round trips.

use crate::common::*;
use quizdex::binary::{corpus_key, decode_snapshot, inspect, MAGIC};
use quizdex::{DocumentStore, SearchEngine};
use std::fs;

#[test]
fn test_blob_is_reused_by_a_fresh_engine() {
    let engine = engine_with(biology_deck());
    let before = ranked(&engine, "cell");

    let blob = engine
        .store()
        .load_corpus_stats(&corpus_key(CARDS))
        .unwrap()
        .unwrap();

    // New engine, same documents, blob already in place
    let store = store_with(biology_deck());
    store.save_corpus_stats(&corpus_key(CARDS), &blob).unwrap();
    // A document the blob doesn't know about
    store.upsert(CARDS, make_card("bio-6", "Cell theory?", &["cells"], &[]));
    let reused = SearchEngine::new(store, Default::default()).unwrap();

    assert_eq!(reused.corpus(CARDS).unwrap().stats.total_docs, 5);
    let after = ranked(&reused, "cell");
    assert!(after.len() >= before.len());
}

#[test]
fn test_corrupt_blob_triggers_rebuild() {
    let store = store_with(fox_corpus());
    store
        .save_corpus_stats(&corpus_key(CARDS), b"definitely not a corpus")
        .unwrap();
    let engine = SearchEngine::new(store, Default::default()).unwrap();

    assert_eq!(engine.corpus(CARDS).unwrap().stats.total_docs, 3);
    let blob = engine
        .store()
        .load_corpus_stats(&corpus_key(CARDS))
        .unwrap()
        .unwrap();
    assert_eq!(&blob[..4], &MAGIC);
}

#[test]
fn test_blob_survives_a_file_round_trip() {
    let engine = engine_with(biology_deck());
    let snapshot = engine.rebuild(CARDS).unwrap();
    let blob = engine
        .store()
        .load_corpus_stats(&corpus_key(CARDS))
        .unwrap()
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cards.qzdx");
    fs::write(&path, &blob).unwrap();
    let bytes = fs::read(&path).unwrap();

    let header = inspect(&bytes).unwrap();
    assert!(header.flags.is_brotli());
    assert_eq!(header.payload_len as usize, bytes.len() - 24);

    let decoded = decode_snapshot(&bytes).unwrap();
    assert_eq!(decoded.words, snapshot.words);
    assert_eq!(decoded.tags, snapshot.tags);
    assert_eq!(decoded.stats.total_docs, snapshot.stats.total_docs);
    assert_eq!(decoded.stats.word_appeared, snapshot.stats.word_appeared);
}

#[test]
fn test_truncated_file_is_rejected() {
    let engine = engine_with(fox_corpus());
    engine.rebuild(CARDS).unwrap();
    let blob = engine
        .store()
        .load_corpus_stats(&corpus_key(CARDS))
        .unwrap()
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("short.qzdx");
    fs::write(&path, &blob[..blob.len() / 2]).unwrap();
    let bytes = fs::read(&path).unwrap();
    assert!(inspect(&bytes).is_err());
    assert!(decode_snapshot(&bytes).is_err());
}
