// Copyright (c) 2025 Galil BM Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Exact single-pattern substring search.
//!
//! This module contains the matchers used by the rest of the crate:
//! - [`BoyerMooreMatcher`]: Boyer-Moore with the bad-character and good-suffix
//!   rules, generalized with the Apostolico-Giancarlo skip memo.
//! - [`NaiveMatcher`]: the brute-force scan, used as the correctness oracle and
//!   as the delegate for single-byte patterns.
//!
//! Both matchers operate on raw bytes, report every occurrence (overlapping
//! ones included) in ascending order, and keep no state between calls.

pub mod boyer_moore_matcher;
pub mod naive_matcher;

use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

// Re-export the matchers
pub use boyer_moore_matcher::{BoyerMooreMatcher, MatcherOptions};
pub use naive_matcher::NaiveMatcher;

/// Ordered set of 0-based match offsets, strictly ascending.
pub type MatchSet = Vec<usize>;

/// Counters collected during a single search call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Number of byte comparisons between pattern and text
    pub comparisons: u64,

    /// Number of pattern alignments visited
    pub alignments: u64,

    /// Number of text bytes skipped through the memo instead of being re-read
    pub skipped: u64,

    /// Number of alignments whose outcome was deduced from the memo
    pub deductions: u64,
}

impl AddAssign for SearchStats {
    fn add_assign(&mut self, rhs: Self) {
        self.comparisons += rhs.comparisons;
        self.alignments += rhs.alignments;
        self.skipped += rhs.skipped;
        self.deductions += rhs.deductions;
    }
}

/// Capability shared by every matcher in this crate.
///
/// Implementations must be pure: identical inputs give identical outputs, and
/// nothing computed for one call is reused by the next.
pub trait Matcher: Send + Sync {
    /// Short human-readable name used in reports and logs.
    fn name(&self) -> &str;

    /// Appends every occurrence of `pattern` in `text` to `matches`.
    ///
    /// Offsets are appended in ascending order. Existing contents of
    /// `matches` are left untouched.
    fn search_into(&self, pattern: &[u8], text: &[u8], matches: &mut MatchSet) -> SearchStats;

    /// Returns every occurrence of `pattern` in `text`.
    fn search(&self, pattern: &[u8], text: &[u8]) -> MatchSet {
        let mut matches = MatchSet::new();
        self.search_into(pattern, text, &mut matches);
        matches
    }

    /// Returns `true` if `pattern` occurs anywhere in `text`.
    fn is_match(&self, pattern: &[u8], text: &[u8]) -> bool {
        !self.search(pattern, text).is_empty()
    }
}

/// Searches `text` for `pattern` with a default [`BoyerMooreMatcher`].
///
/// # Example
///
/// ```
/// use galil_bm_lib::algorithms::search;
///
/// assert_eq!(search("ab", "abab"), vec![0, 2]);
/// assert_eq!(search("aa", "aaa"), vec![0, 1]);
/// assert!(search("xyz", "abc").is_empty());
/// ```
pub fn search(pattern: impl AsRef<[u8]>, text: impl AsRef<[u8]>) -> MatchSet {
    BoyerMooreMatcher::new().search(pattern, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_accumulate() {
        let mut total = SearchStats::default();
        total += SearchStats {
            comparisons: 3,
            alignments: 1,
            skipped: 0,
            deductions: 0,
        };
        total += SearchStats {
            comparisons: 2,
            alignments: 2,
            skipped: 4,
            deductions: 1,
        };

        assert_eq!(total.comparisons, 5);
        assert_eq!(total.alignments, 3);
        assert_eq!(total.skipped, 4);
        assert_eq!(total.deductions, 1);
    }

    #[test]
    fn test_matchers_are_interchangeable() {
        let matchers: Vec<Box<dyn Matcher>> = vec![
            Box::new(BoyerMooreMatcher::new()),
            Box::new(NaiveMatcher::new()),
        ];

        for matcher in &matchers {
            assert_eq!(matcher.search(b"ana", b"banana"), vec![1, 3], "{}", matcher.name());
            assert!(matcher.is_match(b"nan", b"banana"));
            assert!(!matcher.is_match(b"nab", b"banana"));
        }
    }
}
