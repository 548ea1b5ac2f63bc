//! Trie completeness and exactness.

use proptest::prelude::*;
use quizdex::Trie;
use std::collections::BTreeSet;

fn vocab() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set(prop::string::string_regex("[a-d]{1,6}").unwrap(), 0..40)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: prefix search returns exactly the entries with that prefix, in order.
    #[test]
    fn prop_search_complete_and_exact(words in vocab(), prefix in "[a-d]{0,3}") {
        let trie = Trie::build(&words);
        let expected: Vec<String> = words
            .iter()
            .filter(|w| w.starts_with(prefix.as_str()))
            .cloned()
            .collect();
        prop_assert_eq!(trie.search(&prefix, None), expected);
    }

    /// Property: a limit truncates the full answer.
    #[test]
    fn prop_limit_truncates(words in vocab(), prefix in "[a-d]{0,2}", limit in 0usize..10) {
        let trie = Trie::build(&words);
        let full = trie.search(&prefix, None);
        let limited = trie.search(&prefix, Some(limit));
        prop_assert_eq!(&limited[..], &full[..limit.min(full.len())]);
    }

    /// Property: membership and size agree with the input set.
    #[test]
    fn prop_contains_every_word(words in vocab()) {
        let trie = Trie::build(&words);
        prop_assert_eq!(trie.len(), words.len());
        for word in &words {
            prop_assert!(trie.contains(word));
        }
    }

    /// Property: the serialized form loads back to the same trie.
    #[test]
    fn prop_serde_round_trip(words in vocab()) {
        let trie = Trie::build(&words);
        let json = serde_json::to_string(&trie).unwrap();
        let back: Trie = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back.search("", None), trie.search("", None));
        prop_assert_eq!(back.len(), trie.len());
    }
}
