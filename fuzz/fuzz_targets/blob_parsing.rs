// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for corpus blob parsing.
//!
//! Stored blobs come back from someone else's storage and may be truncated,
//! bit-flipped or not blobs at all. Parsing must reject them with an error,
//! never a panic or an unbounded allocation.

#![no_main]

use libfuzzer_sys::fuzz_target;
use quizdex::binary::{decode_snapshot, encode_snapshot, inspect};

fuzz_target!(|data: &[u8]| {
    let header = inspect(data);
    let decoded = decode_snapshot(data);

    // decode implies a valid envelope
    if decoded.is_ok() {
        assert!(header.is_ok());
    }

    // Anything that decodes must encode and decode again
    if let Ok(snapshot) = decoded {
        let blob = encode_snapshot(&snapshot).expect("re-encode");
        let again = decode_snapshot(&blob).expect("re-decode");
        assert_eq!(again.words, snapshot.words);
        assert_eq!(again.tags, snapshot.tags);
        assert_eq!(again.stats.word_appeared, snapshot.stats.word_appeared);
    }
});
