// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types for the search engine.
//!
//! Most of the engine cannot fail: empty queries, empty corpora and documents
//! with missing fields all degrade to empty results. What can fail is I/O at
//! the document store boundary, decoding of a persisted corpus blob, and
//! loading configuration. Store errors pass through untouched; the engine
//! never retries.

use thiserror::Error;

/// Errors raised by a [`DocumentStore`](crate::store::DocumentStore) implementation.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Collection does not exist in the store
    #[error("Unknown collection: {0}")]
    UnknownCollection(String),
    /// Document lookup failed for a reason other than absence
    #[error("Document store I/O failed: {0}")]
    Io(String),
    /// A stored document or cache could not be decoded
    #[error("Corrupt stored record: {0}")]
    Corrupt(String),
}

/// Errors decoding a persisted corpus blob.
///
/// The engine treats any of these as "no cached corpus" and rebuilds, so they
/// only surface to callers that decode blobs directly (the `inspect` command).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlobError {
    /// Blob is shorter than header + footer
    #[error("Blob truncated: {len} bytes, need at least {min}")]
    Truncated { len: usize, min: usize },
    /// Blob exceeds the decoder's size limit
    #[error("Blob too large: {len} bytes (limit {limit})")]
    TooLarge { len: usize, limit: usize },
    /// Header magic mismatch
    #[error("Invalid magic: expected QZDX, got {0:?}")]
    BadMagic([u8; 4]),
    /// Footer magic mismatch
    #[error("Invalid footer magic: expected XDZQ, got {0:?}")]
    BadFooter([u8; 4]),
    /// Format version not understood by this build
    #[error("Unsupported blob version {found} (expected {expected})")]
    UnsupportedVersion { found: u8, expected: u8 },
    /// Header payload length disagrees with the blob length
    #[error("Payload length {claimed} does not fit blob of {len} bytes")]
    LengthMismatch { claimed: usize, len: usize },
    /// CRC32 over header + payload does not match the footer
    #[error("Checksum mismatch: stored {stored:#010x}, computed {computed:#010x}")]
    ChecksumMismatch { stored: u32, computed: u32 },
    /// Brotli or JSON decoding of the payload failed
    #[error("Payload decode failed: {0}")]
    Payload(String),
}

/// Errors loading or validating configuration.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config {path}: {message}")]
    Read { path: String, message: String },
    /// Config file is not valid JSON for `EngineConfig`
    #[error("Failed to parse config: {0}")]
    Parse(String),
    /// A parameter is outside its valid range
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Umbrella error for engine operations.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Blob(#[from] BlobError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Corpus snapshot could not be serialized for persistence
    #[error("Failed to encode corpus snapshot: {0}")]
    Encode(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;
