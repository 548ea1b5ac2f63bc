//! Tokenizer invariants.

use crate::strategies::{mixed_text, text};
use proptest::prelude::*;
use quizdex::{normalize, segment, tokenize, vocabulary};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: segmentation is a pure function of its input.
    #[test]
    fn prop_segment_deterministic(s in mixed_text()) {
        prop_assert_eq!(segment(&s), segment(&s));
    }

    /// Property: no token is empty or pure whitespace.
    #[test]
    fn prop_tokens_nonblank(s in mixed_text()) {
        for token in tokenize(&s) {
            prop_assert!(!token.trim().is_empty(), "blank token in {:?}", s);
        }
    }

    /// Property: tokenizing normalized text changes nothing.
    #[test]
    fn prop_tokenize_idempotent_under_normalize(s in mixed_text()) {
        prop_assert_eq!(tokenize(&normalize(&s)), tokenize(&s));
    }

    /// Property: vocabulary is the sorted, de-duplicated token set.
    #[test]
    fn prop_vocabulary_sorted_unique(s in text()) {
        let vocab = vocabulary(&s);
        for pair in vocab.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
        let mut expected = tokenize(&s);
        expected.sort();
        expected.dedup();
        prop_assert_eq!(vocab, expected);
    }

    /// Property: plain lowercase words survive tokenization unchanged.
    #[test]
    fn prop_simple_words_round_trip(s in text()) {
        let expected: Vec<String> = s.split(' ').map(str::to_string).collect();
        prop_assert_eq!(tokenize(&s), expected);
    }
}
