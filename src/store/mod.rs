// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Document store boundary.
//!
//! The engine owns no documents. It walks a collection through a cursor,
//! writes recomputed keyword caches back, keeps one opaque corpus blob per
//! collection, and resolves result ids to documents. Whatever sits behind
//! [`DocumentStore`] (a database, a file, [`MemoryStore`]) decides when a
//! stored keyword cache is still valid.
//!
//! Errors from the store are passed to the caller unchanged. No retries.

mod memory;

pub use memory::MemoryStore;

use crate::error::StoreError;
use crate::types::SearchKeywordCache;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A document as the engine sees it: an id and an arbitrary JSON body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub body: Value,
}

impl Document {
    pub fn new(id: impl Into<String>, body: Value) -> Self {
        Self {
            id: id.into(),
            body,
        }
    }
}

/// One cursor item: a document and its stored keyword cache, if still valid.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredEntry {
    pub document: Document,
    pub cache: Option<SearchKeywordCache>,
}

/// Sequential cursor over a collection.
pub type DocumentCursor<'a> = Box<dyn Iterator<Item = Result<StoredEntry, StoreError>> + 'a>;

/// Storage backend for documents, keyword caches and corpus blobs.
///
/// Every method takes `&self`; implementations use interior mutability. The
/// cursor returned by [`documents`](DocumentStore::documents) must not hold a
/// lock that [`commit_document_cache`](DocumentStore::commit_document_cache)
/// needs, since commits happen while the cursor is being walked.
pub trait DocumentStore {
    // =========================================================================
    // Documents
    // =========================================================================

    /// Walk every document of `collection`.
    ///
    /// `cache` is `Some` only when the stored cache is still valid for the
    /// document's current content.
    fn documents(&self, collection: &str) -> Result<DocumentCursor<'_>, StoreError>;

    /// Persist a recomputed keyword cache onto `document`.
    fn commit_document_cache(
        &self,
        collection: &str,
        document: &Document,
        cache: &SearchKeywordCache,
    ) -> Result<(), StoreError>;

    /// Look up a document by id. `Ok(None)` when absent.
    fn get_document(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    // =========================================================================
    // Corpus blobs
    // =========================================================================

    /// Load the blob stored under `key`. `Ok(None)` when absent.
    fn load_corpus_stats(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Store `blob` under `key`, replacing any previous value.
    fn save_corpus_stats(&self, key: &str, blob: &[u8]) -> Result<(), StoreError>;

    /// Remove the blob under `key`. Succeeds if it was already absent.
    fn remove_corpus_stats(&self, key: &str) -> Result<(), StoreError>;
}
