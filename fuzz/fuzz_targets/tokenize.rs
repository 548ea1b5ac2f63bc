// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the tokenizer.
//!
//! Any UTF-8 string must tokenize without panicking, deterministically, and
//! without producing blank tokens, whichever segmenter the detector picks.

#![no_main]

use libfuzzer_sys::fuzz_target;
use quizdex::{segment, tokenize, Tokenizer};

fuzz_target!(|text: &str| {
    let tokens = tokenize(text);
    assert_eq!(tokens, tokenize(text), "tokenize is not deterministic");
    for token in &tokens {
        assert!(!token.trim().is_empty(), "blank token from {:?}", text);
    }

    // Every segmenter must cope with every script
    for tokenizer in [Tokenizer::Latin, Tokenizer::Chinese, Tokenizer::Japanese] {
        let _ = tokenizer.segment(text);
    }
    let _ = segment(text);
});
