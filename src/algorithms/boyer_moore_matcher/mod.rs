// Copyright (c) 2025 Galil BM Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Boyer-Moore Pattern Matcher with the Apostolico-Giancarlo skip memo.
//!
//! This module provides an implementation of the Boyer-Moore string search
//! algorithm over raw bytes. Shifts come from the bad character rule and the
//! strong good suffix rule, with a border fallback. On top of that, every
//! alignment records how many bytes it verified, and later alignments use that
//! record to skip, or to settle without reading the text, any stretch that an
//! earlier alignment already covered.
//!
//! # Features
//!
//! - Every occurrence is reported, overlapping ones included
//! - Full byte alphabet, no character boundary handling
//! - All tables are rebuilt per call; nothing is cached between searches
//! - The memo can be switched off to compare against the plain algorithm
//!
//! # Example
//!
//! ```
//! use galil_bm_lib::algorithms::boyer_moore_matcher::{BoyerMooreMatcher, MatcherOptions};
//!
//! let matcher = BoyerMooreMatcher::new();
//!
//! let text = "Finding a needle in a haystack is hard, but finding another needle is easier.";
//! assert_eq!(matcher.search("needle", text), vec![10, 60]);
//!
//! // Same matches without the memo, at the cost of more comparisons
//! let plain = BoyerMooreMatcher::with_options(MatcherOptions::new().galil_rule(false));
//! let (matches, plain_stats) = plain.search_with_stats("aaa", "aaaaaaaa");
//! let (_, stats) = matcher.search_with_stats("aaa", "aaaaaaaa");
//! assert_eq!(matches, vec![0, 1, 2, 3, 4, 5]);
//! assert!(stats.comparisons < plain_stats.comparisons);
//! ```
//!
//! # Performance Characteristics
//!
//! - Preprocessing time: O(σ·m + m²) where σ = 256; the skip validation table
//!   is O(m²) and is only built up to [`preprocess::MAX_SKIP_TABLE_PATTERN_LENGTH`]
//! - Search: O(n) comparisons in the worst case with the memo, sublinear on
//!   typical text
//! - Space: O(σ·m + m² + n)

mod error;
mod matcher;
pub mod preprocess;
pub mod tables;

#[cfg(test)]
mod tests;

// Re-exports
pub use error::{BoyerMooreError, Result};
pub use matcher::{BoyerMooreMatcher, MatcherOptions};
pub use preprocess::PreprocessedPattern;
