// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Language-aware text segmentation into index tokens.
//!
//! ```text
//! text ──▶ detect_language ──▶ Tokenizer::{Latin, Chinese, Japanese}
//!                                      │ raw segments
//!                                      ▼
//!                     drop punctuation/symbol/whitespace-only tokens
//!                     drop stop words for the bucket
//!                                      │
//!                                      ▼
//!                         tokens in document order (segment)
//!                         sorted + de-duplicated   (vocabulary)
//! ```
//!
//! Everything here is pure: same input, same tokens. Case folding is the
//! caller's job ([`tokenize`] does it for you); stop word matching is exact,
//! so un-normalized input keeps its capitalized stop words.

mod japanese;
mod language;
mod latin;
mod stop_words;

pub use language::{detect_language, LanguageBucket, MIN_SAMPLE_LENGTH};
pub use stop_words::is_stop_word;

use crate::util::normalize::normalize;
use jieba_rs::Jieba;
use regex::Regex;
use std::sync::LazyLock;

/// Dictionary load is expensive; share one segmenter per process.
static JIEBA: LazyLock<Jieba> = LazyLock::new(Jieba::new);

static SYMBOLIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{P}\p{S}\s]+$").expect("symbolic token pattern is a valid regex")
});

/// A segmentation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tokenizer {
    /// Rule-based splitting (digits, letters, punctuation, catch-all).
    Latin,
    /// Dictionary segmentation in search mode: emits overlapping sub-words
    /// so "中华人民共和国" also indexes "中华" and "共和国".
    Chinese,
    /// Morphological segmentation over the IPADIC dictionary.
    Japanese,
}

impl From<LanguageBucket> for Tokenizer {
    fn from(bucket: LanguageBucket) -> Self {
        match bucket {
            LanguageBucket::Chinese => Tokenizer::Chinese,
            LanguageBucket::Japanese => Tokenizer::Japanese,
            LanguageBucket::Latin => Tokenizer::Latin,
        }
    }
}

impl Tokenizer {
    /// Pick the strategy for `text` by language detection.
    pub fn for_text(text: &str) -> Self {
        detect_language(text).into()
    }

    pub fn bucket(self) -> LanguageBucket {
        match self {
            Tokenizer::Chinese => LanguageBucket::Chinese,
            Tokenizer::Japanese => LanguageBucket::Japanese,
            Tokenizer::Latin => LanguageBucket::Latin,
        }
    }

    /// Raw segmenter output, before any filtering.
    pub fn split(self, text: &str) -> Vec<String> {
        match self {
            Tokenizer::Latin => latin::split(text),
            Tokenizer::Chinese => JIEBA
                .cut_for_search(text, true)
                .into_iter()
                .map(str::to_string)
                .collect(),
            Tokenizer::Japanese => japanese::split(text),
        }
    }

    /// Filtered tokens in document order.
    pub fn segment(self, text: &str) -> Vec<String> {
        let bucket = self.bucket();
        self.split(text)
            .into_iter()
            .filter(|token| !is_symbolic(token))
            .filter(|token| !is_stop_word(bucket, token))
            .collect()
    }
}

/// Is the token made only of punctuation, symbols and whitespace?
#[inline]
pub fn is_symbolic(token: &str) -> bool {
    SYMBOLIC.is_match(token)
}

/// Segment `text` with the tokenizer its language calls for.
///
/// Tokens come back in document order. The input is used as-is; see
/// [`tokenize`] for the normalizing variant.
pub fn segment(text: &str) -> Vec<String> {
    Tokenizer::for_text(text).segment(text)
}

/// Normalize (NFC + lowercase), then [`segment`].
pub fn tokenize(text: &str) -> Vec<String> {
    segment(&normalize(text))
}

/// Sorted, de-duplicated tokens of `text`: its vocabulary view.
pub fn vocabulary(text: &str) -> Vec<String> {
    let mut tokens = segment(text);
    tokens.sort_unstable();
    tokens.dedup();
    tokens
}
