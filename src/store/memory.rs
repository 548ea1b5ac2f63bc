// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! In-memory document store.
//!
//! Cache validity works by version counters. Every write to a document bumps
//! its `content_version`; committing a keyword cache stamps the cache with the
//! same version. A cache is handed out only while the two agree and the
//! collection has not been explicitly invalidated since.

use super::{Document, DocumentCursor, DocumentStore, StoredEntry};
use crate::error::StoreError;
use crate::types::SearchKeywordCache;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone)]
struct Record {
    document: Document,
    cache: Option<SearchKeywordCache>,
    content_version: u64,
    cache_version: u64,
    invalidated: bool,
}

impl Record {
    fn valid_cache(&self) -> Option<SearchKeywordCache> {
        if self.invalidated || self.cache_version != self.content_version {
            return None;
        }
        self.cache.clone()
    }
}

/// Documents kept in process memory, ordered by id within a collection.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Record>>>,
    blobs: RwLock<HashMap<String, Vec<u8>>>,
    clock: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Insert or replace a document. Its keyword cache becomes stale.
    pub fn upsert(&self, collection: &str, document: Document) {
        let version = self.tick();
        let mut collections = self.collections.write();
        let records = collections.entry(collection.to_string()).or_default();
        match records.get_mut(&document.id) {
            Some(record) => {
                record.document = document;
                record.content_version = version;
            }
            None => {
                records.insert(
                    document.id.clone(),
                    Record {
                        document,
                        cache: None,
                        content_version: version,
                        cache_version: 0,
                        invalidated: false,
                    },
                );
            }
        }
    }

    /// Remove a document. Returns whether it existed.
    pub fn remove(&self, collection: &str, id: &str) -> bool {
        self.collections
            .write()
            .get_mut(collection)
            .is_some_and(|records| records.remove(id).is_some())
    }

    /// Mark every keyword cache in `collection` stale.
    pub fn invalidate_cache(&self, collection: &str) {
        if let Some(records) = self.collections.write().get_mut(collection) {
            for record in records.values_mut() {
                record.invalidated = true;
            }
        }
    }

    /// Number of documents in `collection`.
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map_or(0, BTreeMap::len)
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }

    /// Names of all collections holding at least one document.
    pub fn collection_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .collections
            .read()
            .iter()
            .filter(|(_, records)| !records.is_empty())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }

    /// Import a JSON array of documents, taking ids from `id_field`.
    ///
    /// Ids may be strings or numbers. Every element must be an object with an
    /// id; the first one that isn't aborts the import with nothing written.
    pub fn import(
        &self,
        collection: &str,
        docs: &Value,
        id_field: &str,
    ) -> Result<usize, StoreError> {
        let items = docs.as_array().ok_or_else(|| {
            StoreError::Corrupt(format!("collection {} is not a JSON array", collection))
        })?;

        let documents = items
            .iter()
            .enumerate()
            .map(|(index, body)| {
                document_id(body, id_field)
                    .map(|id| Document::new(id, body.clone()))
                    .ok_or_else(|| {
                        StoreError::Corrupt(format!(
                            "document {} of {} has no {:?} field",
                            index, collection, id_field
                        ))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let count = documents.len();
        for document in documents {
            self.upsert(collection, document);
        }
        Ok(count)
    }
}

/// Id of a JSON document: a string or number at `id_field`.
pub(crate) fn document_id(body: &Value, id_field: &str) -> Option<String> {
    match body.get(id_field)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl DocumentStore for MemoryStore {
    fn documents(&self, collection: &str) -> Result<DocumentCursor<'_>, StoreError> {
        // Snapshot so commits during the walk don't contend with a read lock
        let entries: Vec<StoredEntry> = self
            .collections
            .read()
            .get(collection)
            .map(|records| {
                records
                    .values()
                    .map(|record| StoredEntry {
                        document: record.document.clone(),
                        cache: record.valid_cache(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(Box::new(entries.into_iter().map(Ok)))
    }

    fn commit_document_cache(
        &self,
        collection: &str,
        document: &Document,
        cache: &SearchKeywordCache,
    ) -> Result<(), StoreError> {
        let mut collections = self.collections.write();
        let records = collections
            .get_mut(collection)
            .ok_or_else(|| StoreError::UnknownCollection(collection.to_string()))?;
        // Removed or rewritten since the cursor saw it: the cache is for old content
        if let Some(record) = records.get_mut(&document.id) {
            if record.document == *document {
                record.cache = Some(cache.clone());
                record.cache_version = record.content_version;
                record.invalidated = false;
            }
        }
        Ok(())
    }

    fn get_document(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        Ok(self
            .collections
            .read()
            .get(collection)
            .and_then(|records| records.get(id))
            .map(|record| record.document.clone()))
    }

    fn load_corpus_stats(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.blobs.read().get(key).cloned())
    }

    fn save_corpus_stats(&self, key: &str, blob: &[u8]) -> Result<(), StoreError> {
        self.blobs.write().insert(key.to_string(), blob.to_vec());
        Ok(())
    }

    fn remove_corpus_stats(&self, key: &str) -> Result<(), StoreError> {
        self.blobs.write().remove(key);
        Ok(())
    }
}
