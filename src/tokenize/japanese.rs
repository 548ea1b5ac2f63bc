// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Japanese morphological segmentation over the embedded IPADIC dictionary.

use super::latin;
use lindera::dictionary::{load_dictionary_from_kind, DictionaryKind};
use lindera::mode::Mode;
use lindera::segmenter::Segmenter;
use lindera::tokenizer::Tokenizer as Lindera;
use std::sync::LazyLock;

/// Loaded once per process. `None` when the embedded dictionary fails to load.
static LINDERA: LazyLock<Option<Lindera>> = LazyLock::new(|| {
    match load_dictionary_from_kind(DictionaryKind::IPADIC) {
        Ok(dictionary) => Some(Lindera::new(Segmenter::new(Mode::Normal, dictionary, None))),
        Err(err) => {
            tracing::error!(%err, "IPADIC dictionary failed to load, Japanese falls back to rule splitting");
            None
        }
    }
});

/// Split `text` into surface forms in document order.
///
/// Falls back to the Latin rule set when the analyzer is unavailable or
/// rejects the input.
pub fn split(text: &str) -> Vec<String> {
    let Some(analyzer) = LINDERA.as_ref() else {
        return latin::split(text);
    };
    match analyzer.tokenize(text) {
        Ok(tokens) => tokens
            .into_iter()
            .map(|token| token.text.into_owned())
            .collect(),
        Err(err) => {
            tracing::warn!(%err, "Japanese segmentation failed, using rule splitting");
            latin::split(text)
        }
    }
}
