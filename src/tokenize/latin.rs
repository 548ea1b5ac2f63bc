// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Rule-based tokenizer for Latin-family and undetermined text.
//!
//! Scanning left to right, the first rule that matches at the current
//! position wins:
//!
//! | Priority | Rule                                   | Example            |
//! |----------|----------------------------------------|--------------------|
//! | 1        | run of decimal digits                  | `1984`             |
//! | 2        | run of letters + optional contraction  | `don't`, `naïve`   |
//! | 3        | single punctuation / symbol character  | `?`, `+`           |
//! | 4        | run of whitespace (discarded)          |                    |
//! | 5        | up to 4 other non-whitespace chars     | `½`, `Ⅻ`           |
//!
//! Every character is consumed by exactly one rule: rule 5 catches anything
//! non-whitespace the others miss and rule 4 catches the rest, so matches tile
//! the input with no gaps.

use regex::Regex;
use std::sync::LazyLock;

static LATIN_RULES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\p{Nd}+",
        r"|[\p{L}\p{M}]+(?:['’](?:s|t|re|ve|ll|d|m)\b)?",
        r"|[\p{P}\p{S}]",
        r"|\s+",
        r"|\S{1,4}",
    ))
    .expect("latin rule set is a valid regex")
});

/// Split `text` into raw tokens; whitespace runs are dropped, punctuation is kept.
pub fn split(text: &str) -> Vec<String> {
    LATIN_RULES
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|token| !token.chars().all(char::is_whitespace))
        .map(str::to_string)
        .collect()
}
