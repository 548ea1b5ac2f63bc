//! On-device search for quiz cards: BM25 with a bigram blend, an optional
//! proximity bonus, and trie-based query expansion.
//!
//! Documents are arbitrary JSON values living in someone else's storage. The
//! engine walks them through a [`DocumentStore`], caches a keyword summary on
//! each one, aggregates those into per-collection statistics, and ranks
//! queries against them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │ tokenize.rs │────▶│ keywords.rs  │────▶│  corpus.rs  │
//! │ (segment,   │     │ (build_cache,│     │ (BM25 stats,│
//! │  language)  │     │  bigrams)    │     │  tries)     │
//! └─────────────┘     └──────────────┘     └─────────────┘
//!        │                                        │
//!        ▼                                        ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                     engine/                          │
//! │  (expand via trie, score, paginate, LRU caches,     │
//! │   persisted corpus blob via binary/ and store/)     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use quizdex::{Document, EngineConfig, MemoryStore, SearchEngine, SearchOptions};
//! use serde_json::json;
//!
//! let store = MemoryStore::new();
//! store.upsert("cards", Document::new("1", json!({"q": "the quick brown fox"})));
//! store.upsert("cards", Document::new("2", json!({"q": "quick brown dog"})));
//! store.upsert("cards", Document::new("3", json!({"q": "lazy dog sleeps"})));
//!
//! let engine = SearchEngine::new(store, EngineConfig::default()).unwrap();
//! let page = engine
//!     .search("cards", "quick dog", 10, 0, SearchOptions::default())
//!     .unwrap();
//! assert_eq!(page.result[0].id, "2");
//! ```

// Module declarations
pub mod binary;
pub mod config;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod keywords;
pub mod scoring;
pub mod store;
pub mod testing;
pub mod tokenize;
pub mod trie;
pub mod types;
pub mod util;

// Re-exports for public API
pub use config::{CollectionSchema, EngineConfig};
pub use corpus::{build_corpus_stats, CorpusSnapshot};
pub use engine::{paginate, SearchEngine, SearchOptions, Vocabulary};
pub use error::{BlobError, ConfigError, Result, SearchError, StoreError};
pub use keywords::{bigrams, build_cache};
pub use scoring::{score, Query, ScoreParams};
pub use store::{Document, DocumentStore, MemoryStore, StoredEntry};
pub use tokenize::{detect_language, segment, tokenize, vocabulary, LanguageBucket, Tokenizer};
pub use trie::Trie;
pub use types::{Bm25GlobalCache, ScoredResult, SearchKeywordCache, SearchPage};
pub use util::normalize::normalize;
