//! Input generators shared by the property modules.

use proptest::prelude::*;

/// Word-like strings that are never stop words.
pub fn word() -> impl Strategy<Value = String> {
    prop::string::string_regex("[b-df-hj-np-tv-xz]{3,8}").unwrap()
}

/// A short single-field document.
pub fn text() -> impl Strategy<Value = String> {
    prop::collection::vec(word(), 1..12).prop_map(|words| words.join(" "))
}

/// Documents as lists of source strings (one per field).
pub fn fields() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(text(), 1..5)
}

/// A corpus of single-field documents.
pub fn corpus() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(text(), 1..12)
}

/// A query of one to four words.
pub fn query() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(word(), 1..5)
}

/// Arbitrary text mixing scripts, punctuation and whitespace.
pub fn mixed_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec![
            "Cell", "wall", "naïve", "café", "don't", "1984", "?", "!!", " ", "\t",
            "细胞壁", "光合作用", "ミトコンドリア", "細胞", "の", "Ω", "½", "🧬",
        ]),
        0..16,
    )
    .prop_map(|parts| parts.concat())
}
