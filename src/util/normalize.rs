// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text normalization applied before tokenization.
//!
//! Documents and queries go through the same function, otherwise a query
//! typed with a precomposed "é" would never match a document stored with
//! "e" + combining acute. Diacritics are kept: "résumé" and "resume" are
//! different index terms.

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

/// NFC-compose and lowercase.
///
/// # Example
///
/// ```
/// use quizdex::normalize;
/// assert_eq!(normalize("Cafe\u{301} AU LAIT"), "café au lait");
/// ```
#[cfg(feature = "unicode-normalization")]
pub fn normalize(value: &str) -> String {
    value.nfc().collect::<String>().to_lowercase()
}

/// Lowercase only. Assumes input is already NFC.
#[cfg(not(feature = "unicode-normalization"))]
pub fn normalize(value: &str) -> String {
    value.to_lowercase()
}
