// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Blob header and footer structures.
//!
//! The header is 16 bytes of fixed-size fields, parsed in one read before
//! anything else. It says how long the payload is and how big it gets once
//! decompressed, so the decoder can refuse absurd sizes before allocating.
//!
//! The footer is 8 bytes: a CRC32 checksum over everything before it, plus a
//! magic number ("XDZQ", the header magic reversed). If the footer is wrong,
//! something got corrupted or truncated. Don't trust the data.

use std::io::{self, Read, Write};

use crc32fast::Hasher as Crc32Hasher;

use crate::error::BlobError;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Magic bytes: "QZDX" in ASCII (header)
pub const MAGIC: [u8; 4] = [0x51, 0x5A, 0x44, 0x58];

/// Footer magic: "XDZQ" (reversed, marks valid blob end)
pub const FOOTER_MAGIC: [u8; 4] = [0x58, 0x44, 0x5A, 0x51];

/// Current format version
pub const VERSION: u8 = 1;

// ============================================================================
// SECURITY LIMITS (prevent resource exhaustion from malicious input)
// ============================================================================

/// Maximum blob size, compressed or not: 64 MB
pub const MAX_BLOB_SIZE: usize = 64 * 1024 * 1024;

// ============================================================================
// FLAGS
// ============================================================================

/// Format flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlobFlags(pub(crate) u8);

impl BlobFlags {
    pub const BROTLI: u8 = 0b0000_0001;

    pub fn new() -> Self {
        Self(0)
    }

    pub fn with_brotli(mut self) -> Self {
        self.0 |= Self::BROTLI;
        self
    }

    pub fn is_brotli(self) -> bool {
        self.0 & Self::BROTLI != 0
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

// ============================================================================
// HEADER
// ============================================================================

/// Blob header (16 bytes fixed size)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobHeader {
    pub version: u8,
    pub flags: BlobFlags,
    /// Stored payload bytes between header and footer
    pub payload_len: u32,
    /// Payload bytes after decompression
    pub uncompressed_len: u32,
}

impl BlobHeader {
    // 4 (magic) + 1 (version) + 1 (flags) + 2 (reserved) + 2*4 (u32s) = 16
    pub const SIZE: usize = 16;

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&MAGIC)?;
        w.write_all(&[self.version])?;
        w.write_all(&[self.flags.0])?;
        w.write_all(&[0u8; 2])?; // reserved
        w.write_all(&self.payload_len.to_le_bytes())?;
        w.write_all(&self.uncompressed_len.to_le_bytes())?;
        Ok(())
    }

    /// Parse and check magic and version.
    pub fn read<R: Read>(r: &mut R) -> Result<Self, BlobError> {
        let mut buf = [0u8; Self::SIZE];
        r.read_exact(&mut buf).map_err(|_| BlobError::Truncated {
            len: 0,
            min: Self::SIZE,
        })?;

        let magic = [buf[0], buf[1], buf[2], buf[3]];
        if magic != MAGIC {
            return Err(BlobError::BadMagic(magic));
        }
        if buf[4] != VERSION {
            return Err(BlobError::UnsupportedVersion {
                found: buf[4],
                expected: VERSION,
            });
        }

        Ok(Self {
            version: buf[4],
            flags: BlobFlags(buf[5]),
            // buf[6..8] is reserved
            payload_len: u32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]),
            uncompressed_len: u32::from_le_bytes([buf[12], buf[13], buf[14], buf[15]]),
        })
    }
}

// ============================================================================
// FOOTER (8 bytes)
// ============================================================================

/// Footer with CRC32 checksum and magic number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobFooter {
    /// CRC32 checksum of header + payload (everything before footer)
    pub crc32: u32,
}

impl BlobFooter {
    pub const SIZE: usize = 8; // 4 bytes CRC32 + 4 bytes magic

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.crc32.to_le_bytes())?;
        w.write_all(&FOOTER_MAGIC)?;
        Ok(())
    }

    /// Read the footer from the tail of `bytes`.
    pub fn read(bytes: &[u8]) -> Result<Self, BlobError> {
        if bytes.len() < Self::SIZE {
            return Err(BlobError::Truncated {
                len: bytes.len(),
                min: Self::SIZE,
            });
        }

        let footer_start = bytes.len() - Self::SIZE;
        let magic = [
            bytes[footer_start + 4],
            bytes[footer_start + 5],
            bytes[footer_start + 6],
            bytes[footer_start + 7],
        ];
        if magic != FOOTER_MAGIC {
            return Err(BlobError::BadFooter(magic));
        }

        let crc32 = u32::from_le_bytes([
            bytes[footer_start],
            bytes[footer_start + 1],
            bytes[footer_start + 2],
            bytes[footer_start + 3],
        ]);

        Ok(Self { crc32 })
    }

    /// Compute CRC32 over the given bytes
    pub fn compute_crc32(data: &[u8]) -> u32 {
        let mut hasher = Crc32Hasher::new();
        hasher.update(data);
        hasher.finalize()
    }
}
