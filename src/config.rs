// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Engine and collection configuration.
//!
//! Everything has a default, so an empty JSON object is a valid config file:
//!
//! ```json
//! {
//!   "scoreParams": { "k1": 1.2, "calcPosScore": true },
//!   "scoreCacheCapacity": 128,
//!   "collections": [
//!     { "name": "cards", "fields": ["question", "answers"], "tagField": "tags" }
//!   ]
//! }
//! ```
//!
//! Changing a collection's `fields` does not invalidate keyword caches already
//! stored on documents; invalidate the collection after such a change.

use crate::error::ConfigError;
use crate::scoring::ScoreParams;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::Path;

/// Default number of cached query result lists.
pub const DEFAULT_SCORE_CACHE_CAPACITY: usize = 64;

/// Default number of cached corpus snapshots.
pub const DEFAULT_CORPUS_CACHE_CAPACITY: usize = 8;

fn default_id_field() -> String {
    "id".to_string()
}

fn default_tag_field() -> Option<String> {
    Some("tags".to_string())
}

/// How the documents of one collection are indexed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSchema {
    pub name: String,
    /// Field holding the document identifier.
    #[serde(default = "default_id_field")]
    pub id_field: String,
    /// Fields (dotted paths allowed) to index; empty means the whole document.
    #[serde(default)]
    pub fields: Vec<String>,
    /// Field holding tag names for the tag vocabulary; `None` disables tags.
    #[serde(default = "default_tag_field")]
    pub tag_field: Option<String>,
}

impl CollectionSchema {
    /// Schema with defaults: whole document indexed, tags from `"tags"`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id_field: default_id_field(),
            fields: Vec::new(),
            tag_field: default_tag_field(),
        }
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tag_field(mut self, tag_field: Option<&str>) -> Self {
        self.tag_field = tag_field.map(str::to_string);
        self
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    pub score_params: ScoreParams,
    pub score_cache_capacity: usize,
    pub corpus_cache_capacity: usize,
    /// Maximum trie expansions per query token; `None` is unlimited.
    pub max_expansions: Option<usize>,
    pub collections: Vec<CollectionSchema>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            score_params: ScoreParams::default(),
            score_cache_capacity: DEFAULT_SCORE_CACHE_CAPACITY,
            corpus_cache_capacity: DEFAULT_CORPUS_CACHE_CAPACITY,
            max_expansions: None,
            collections: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.score_params.validate()?;
        capacity("scoreCacheCapacity", self.score_cache_capacity)?;
        capacity("corpusCacheCapacity", self.corpus_cache_capacity)?;
        Ok(())
    }

    /// Schema for `collection`, falling back to defaults for unknown names.
    pub fn schema(&self, collection: &str) -> CollectionSchema {
        self.collections
            .iter()
            .find(|schema| schema.name == collection)
            .cloned()
            .unwrap_or_else(|| CollectionSchema::new(collection))
    }
}

/// Non-zero capacity or a config error naming the field.
pub(crate) fn capacity(name: &'static str, value: usize) -> Result<NonZeroUsize, ConfigError> {
    NonZeroUsize::new(value).ok_or(ConfigError::InvalidParameter {
        name,
        reason: "capacity must be at least 1".to_string(),
    })
}
