// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Pagination over a ranked list.

/// Page `page` (0-based) of `items` at `page_size`, plus the page count.
///
/// `page_size` is floored to 1. Pages past the end are empty; the page count
/// is still reported.
pub fn paginate<T: Clone>(items: &[T], page_size: usize, page: usize) -> (Vec<T>, usize) {
    let page_size = page_size.max(1);
    let total_pages = items.len().div_ceil(page_size);
    let start = page.saturating_mul(page_size);
    let slice = items
        .get(start..)
        .map(|rest| &rest[..rest.len().min(page_size)])
        .unwrap_or_default();
    (slice.to_vec(), total_pages)
}
