// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Persisted corpus blob.
//!
//! A rebuilt corpus snapshot (BM25 tables plus the word and tag tries) is
//! handed to the document store as one opaque blob, so the next process start
//! can skip the full pass over the collection. The payload is JSON, and brotli
//! does the heavy lifting: the camelCase keys and nested trie maps are
//! extremely repetitive.
//!
//! # Security Considerations
//!
//! Blobs come back from storage we don't control, so decoding is defensive:
//! - Blob size and declared decompressed size are capped at `MAX_BLOB_SIZE`
//! - The payload length in the header must match the blob exactly
//! - CRC32 footer detects corruption/truncation
//! - Decompression stops at the declared size, so a brotli bomb can't grow
//!
//! # Format Overview (v1)
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │ HEADER (16 bytes)                              │
//! │   magic: [u8; 4] = "QZDX"                      │
//! │   version: u8 = 1                              │
//! │   flags: u8 (bit 0 = brotli)                   │
//! │   reserved: [u8; 2]                            │
//! │   payload_len: u32                             │
//! │   uncompressed_len: u32                        │
//! ├────────────────────────────────────────────────┤
//! │ PAYLOAD (JSON CorpusSnapshot, brotli)          │
//! ├────────────────────────────────────────────────┤
//! │ FOOTER (8 bytes)                               │
//! │   crc32: u32 (header + payload)                │
//! │   magic: [u8; 4] = "XDZQ"                      │
//! └────────────────────────────────────────────────┘
//! ```

pub mod header;

pub use header::{
    BlobFlags, BlobFooter, BlobHeader, FOOTER_MAGIC, MAGIC, MAX_BLOB_SIZE, VERSION,
};

use std::io::{Read, Write};

use crate::corpus::CorpusSnapshot;
use crate::error::{BlobError, SearchError};

/// Brotli quality (0-11)
const BROTLI_QUALITY: u32 = 11;

/// Brotli window size (log2)
const BROTLI_LGWIN: u32 = 22;

/// Brotli I/O buffer size
const BROTLI_BUFFER: usize = 4096;

/// Blob key for a collection's corpus snapshot.
pub fn corpus_key(collection: &str) -> String {
    format!("bm25:{}", collection)
}

/// Serialize a snapshot into a blob.
pub fn encode_snapshot(snapshot: &CorpusSnapshot) -> Result<Vec<u8>, SearchError> {
    let json = serde_json::to_vec(snapshot).map_err(|e| SearchError::Encode(e.to_string()))?;
    if json.len() > MAX_BLOB_SIZE {
        return Err(SearchError::Encode(format!(
            "snapshot is {} bytes, limit is {}",
            json.len(),
            MAX_BLOB_SIZE
        )));
    }

    let mut payload = Vec::new();
    {
        let mut encoder = brotli::CompressorWriter::new(
            &mut payload,
            BROTLI_BUFFER,
            BROTLI_QUALITY,
            BROTLI_LGWIN,
        );
        encoder
            .write_all(&json)
            .map_err(|e| SearchError::Encode(e.to_string()))?;
    }

    let header = BlobHeader {
        version: VERSION,
        flags: BlobFlags::new().with_brotli(),
        payload_len: payload.len() as u32,
        uncompressed_len: json.len() as u32,
    };

    let mut out = Vec::with_capacity(BlobHeader::SIZE + payload.len() + BlobFooter::SIZE);
    header
        .write(&mut out)
        .map_err(|e| SearchError::Encode(e.to_string()))?;
    out.extend_from_slice(&payload);

    let footer = BlobFooter {
        crc32: BlobFooter::compute_crc32(&out),
    };
    footer
        .write(&mut out)
        .map_err(|e| SearchError::Encode(e.to_string()))?;

    Ok(out)
}

/// Validate the envelope and return its header, without decoding the payload.
pub fn inspect(bytes: &[u8]) -> Result<BlobHeader, BlobError> {
    let min = BlobHeader::SIZE + BlobFooter::SIZE;
    if bytes.len() < min {
        return Err(BlobError::Truncated {
            len: bytes.len(),
            min,
        });
    }
    if bytes.len() > MAX_BLOB_SIZE {
        return Err(BlobError::TooLarge {
            len: bytes.len(),
            limit: MAX_BLOB_SIZE,
        });
    }

    let header = BlobHeader::read(&mut &bytes[..BlobHeader::SIZE])?;
    let footer = BlobFooter::read(bytes)?;

    let claimed = header.payload_len as usize;
    if claimed != bytes.len() - min {
        return Err(BlobError::LengthMismatch {
            claimed,
            len: bytes.len(),
        });
    }
    if header.uncompressed_len as usize > MAX_BLOB_SIZE {
        return Err(BlobError::TooLarge {
            len: header.uncompressed_len as usize,
            limit: MAX_BLOB_SIZE,
        });
    }

    let content = &bytes[..bytes.len() - BlobFooter::SIZE];
    let computed = BlobFooter::compute_crc32(content);
    if computed != footer.crc32 {
        return Err(BlobError::ChecksumMismatch {
            stored: footer.crc32,
            computed,
        });
    }

    Ok(header)
}

/// Decode a blob produced by [`encode_snapshot`].
pub fn decode_snapshot(bytes: &[u8]) -> Result<CorpusSnapshot, BlobError> {
    let header = inspect(bytes)?;
    let payload = &bytes[BlobHeader::SIZE..bytes.len() - BlobFooter::SIZE];
    let expected = header.uncompressed_len as usize;

    let json = if header.flags.is_brotli() {
        let mut out = Vec::with_capacity(expected);
        brotli::Decompressor::new(payload, BROTLI_BUFFER)
            // One extra byte to notice payloads longer than declared
            .take(expected as u64 + 1)
            .read_to_end(&mut out)
            .map_err(|e| BlobError::Payload(e.to_string()))?;
        out
    } else {
        payload.to_vec()
    };

    if json.len() != expected {
        return Err(BlobError::Payload(format!(
            "decompressed to {} bytes, header says {}",
            json.len(),
            expected
        )));
    }

    serde_json::from_slice(&json).map_err(|e| BlobError::Payload(e.to_string()))
}
