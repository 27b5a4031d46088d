// Copyright (c) 2025 Galil BM Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Brute-force substring search.
//!
//! Tries every alignment from left to right and compares the pattern against
//! the text until the first mismatch. O(n·m) in the worst case. It is the
//! reference every other matcher is checked against.

use super::{MatchSet, Matcher, SearchStats};

/// Naive O(n·m) matcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveMatcher;

impl NaiveMatcher {
    /// Creates a new naive matcher.
    pub fn new() -> Self {
        Self
    }

    /// Returns every occurrence of `pattern` in `text`.
    ///
    /// A zero-length pattern matches at every offset `0..=text.len()`.
    pub fn search(&self, pattern: impl AsRef<[u8]>, text: impl AsRef<[u8]>) -> MatchSet {
        let mut matches = MatchSet::new();
        scan(pattern.as_ref(), text.as_ref(), &mut matches);
        matches
    }

    /// Like [`NaiveMatcher::search`], but also returns the search counters.
    pub fn search_with_stats(
        &self,
        pattern: impl AsRef<[u8]>,
        text: impl AsRef<[u8]>,
    ) -> (MatchSet, SearchStats) {
        let mut matches = MatchSet::new();
        let stats = scan(pattern.as_ref(), text.as_ref(), &mut matches);
        (matches, stats)
    }
}

impl Matcher for NaiveMatcher {
    fn name(&self) -> &str {
        "naive"
    }

    fn search_into(&self, pattern: &[u8], text: &[u8], matches: &mut MatchSet) -> SearchStats {
        scan(pattern, text, matches)
    }
}

/// Direct double scan shared by the naive matcher and the Boyer-Moore
/// fallback for single-byte patterns.
pub(crate) fn scan(pattern: &[u8], text: &[u8], matches: &mut MatchSet) -> SearchStats {
    let n = text.len();
    let m = pattern.len();
    let mut stats = SearchStats::default();

    if n < m {
        return stats;
    }

    for start in 0..=(n - m) {
        stats.alignments += 1;
        let mut matched = 0;
        while matched < m {
            stats.comparisons += 1;
            if text[start + matched] != pattern[matched] {
                break;
            }
            matched += 1;
        }
        if matched == m {
            matches.push(start);
        }
    }

    stats
}
