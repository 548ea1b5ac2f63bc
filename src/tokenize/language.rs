// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Which segmenter should handle a piece of text?
//!
//! Quiz content is mostly Latin-script with a good share of Chinese and
//! Japanese cards. Each gets its own segmenter; anything else (Cyrillic,
//! Hangul, Arabic...) goes through the Latin rules, which still split on
//! whitespace and punctuation and so degrade gracefully.
//!
//! Detection uses whatlang's trigram model. Its language guess comes first,
//! the raw script classification second, and the first candidate that maps to
//! a bucket wins. Short samples are too noisy to classify and count as
//! undetermined.

use serde::{Deserialize, Serialize};
use whatlang::{Lang, Script};

/// Shortest sample (in characters) the detector is asked to classify.
pub const MIN_SAMPLE_LENGTH: usize = 3;

/// Segmentation strategy family for a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageBucket {
    Chinese,
    Japanese,
    /// Latin-family languages and the fallback for undetermined text.
    #[default]
    Latin,
}

impl LanguageBucket {
    /// Key used for the stop word table.
    pub fn key(self) -> &'static str {
        match self {
            LanguageBucket::Chinese => "chinese",
            LanguageBucket::Japanese => "japanese",
            LanguageBucket::Latin => "latin",
        }
    }
}

/// A detector guess with its confidence.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    bucket: Option<LanguageBucket>,
    confidence: f64,
}

/// Classify `text` into a bucket. Pure and deterministic.
pub fn detect_language(text: &str) -> LanguageBucket {
    let sample = text.trim();
    if sample.chars().count() < MIN_SAMPLE_LENGTH {
        return LanguageBucket::Latin;
    }

    candidates(sample)
        .into_iter()
        .find_map(|candidate| candidate.bucket)
        .unwrap_or(LanguageBucket::Latin)
}

/// Detector candidates, highest confidence first.
fn candidates(sample: &str) -> Vec<Candidate> {
    let mut out = Vec::with_capacity(2);

    if let Some(info) = whatlang::detect(sample) {
        out.push(Candidate {
            bucket: bucket_for_lang(info.lang(), info.script()),
            confidence: info.confidence(),
        });
    }

    // Script alone carries no confidence score; it only breaks ties
    // when the language guess maps nowhere.
    if let Some(script) = whatlang::detect_script(sample) {
        out.push(Candidate {
            bucket: bucket_for_script(script),
            confidence: 0.0,
        });
    }

    out.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    out
}

fn bucket_for_lang(lang: Lang, script: Script) -> Option<LanguageBucket> {
    match lang {
        Lang::Cmn => Some(LanguageBucket::Chinese),
        Lang::Jpn => Some(LanguageBucket::Japanese),
        _ if script == Script::Latin => Some(LanguageBucket::Latin),
        _ => None,
    }
}

fn bucket_for_script(script: Script) -> Option<LanguageBucket> {
    match script {
        Script::Mandarin => Some(LanguageBucket::Chinese),
        Script::Hiragana | Script::Katakana => Some(LanguageBucket::Japanese),
        Script::Latin => Some(LanguageBucket::Latin),
        _ => None,
    }
}
