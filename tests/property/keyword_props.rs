//! Keyword cache invariants.

use crate::strategies::{fields, text};
use proptest::prelude::*;
use quizdex::keywords::{build_cache, build_cache_from_strings};
use quizdex::tokenize;
use serde_json::json;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: one source string of n tokens gives n - 1 bigrams.
    #[test]
    fn prop_single_field_bigram_count(s in text()) {
        let cache = build_cache(&json!({ "q": s }));
        prop_assert_eq!(cache.words2.len(), cache.words.len().saturating_sub(1));
    }

    /// Property: bigrams never span two fields; the count is Σ(n_i - 1).
    #[test]
    fn prop_multi_field_bigram_count(parts in fields()) {
        let cache = build_cache_from_strings(parts.iter().map(String::as_str));
        let expected: usize = parts
            .iter()
            .map(|p| tokenize(p).len().saturating_sub(1))
            .sum();
        prop_assert_eq!(cache.words2.len(), expected);
    }

    /// Property: frequencies add up to the token count.
    #[test]
    fn prop_frequencies_sum_to_length(parts in fields()) {
        let cache = build_cache_from_strings(parts.iter().map(String::as_str));
        let total: u32 = cache.frequency.values().sum();
        prop_assert_eq!(total as usize, cache.len());
        let total2: u32 = cache.frequency2.values().sum();
        prop_assert_eq!(total2 as usize, cache.words2.len());
    }

    /// Property: every position points back at its own term.
    #[test]
    fn prop_positions_index_words(parts in fields()) {
        let cache = build_cache_from_strings(parts.iter().map(String::as_str));
        for (term, offsets) in &cache.position {
            prop_assert!(offsets.windows(2).all(|w| w[0] < w[1]));
            for &offset in offsets {
                prop_assert_eq!(&cache.words[offset as usize], term);
            }
        }
    }

    /// Property: filtered words are the sorted distinct words.
    #[test]
    fn prop_filtered_words_sorted_distinct(parts in fields()) {
        let cache = build_cache_from_strings(parts.iter().map(String::as_str));
        let mut expected = cache.words.clone();
        expected.sort();
        expected.dedup();
        prop_assert_eq!(&cache.filtered_words, &expected);
    }
}
