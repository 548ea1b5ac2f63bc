//! Pagination partitions the ranked list.

use proptest::prelude::*;
use quizdex::paginate;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: pages 0..total concatenate to the input, nothing lost or repeated.
    #[test]
    fn prop_pages_partition_items(items in prop::collection::vec(any::<u16>(), 0..200), size in 0usize..40) {
        let (_, total) = paginate(&items, size, 0);
        let mut joined = Vec::new();
        for page in 0..total {
            let (slice, pages) = paginate(&items, size, page);
            prop_assert_eq!(pages, total);
            prop_assert!(!slice.is_empty());
            prop_assert!(slice.len() <= size.max(1));
            joined.extend(slice);
        }
        prop_assert_eq!(joined, items);
    }

    /// Property: any page past the last is empty.
    #[test]
    fn prop_out_of_range_page_empty(items in prop::collection::vec(any::<u8>(), 0..50), size in 1usize..10, extra in 0usize..1000) {
        let (_, total) = paginate(&items, size, 0);
        let (slice, _) = paginate(&items, size, total + extra);
        prop_assert!(slice.is_empty());
    }
}
