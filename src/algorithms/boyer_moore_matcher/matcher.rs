// Copyright (c) 2025 Galil BM Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Boyer-Moore string matching algorithm implementation.
//!
//! This module contains the scan loop of the Boyer-Moore string search
//! algorithm. The pattern is compared right to left at each alignment; on a
//! mismatch the pattern moves by the larger of the bad character and good
//! suffix shifts, after a full match by the pattern's smallest period so that
//! overlapping occurrences are found.
//!
//! Each alignment also leaves behind the number of bytes it verified. A later,
//! overlapping alignment that reaches the same text position consults the skip
//! validation table to decide whether that run can be skipped, proves a
//! mismatch, or proves a match, instead of reading the bytes again.

use super::error::BoyerMooreError;
use super::preprocess::PreprocessedPattern;
use super::tables::SkipVerdict;
use crate::algorithms::naive_matcher;
use crate::algorithms::{MatchSet, Matcher, SearchStats};

/// Options for configuring the Boyer-Moore matcher behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatcherOptions {
    /// Whether to remember verified runs across alignments (generalized Galil rule)
    pub galil_rule: bool,
}

impl Default for MatcherOptions {
    fn default() -> Self {
        Self { galil_rule: true }
    }
}

impl MatcherOptions {
    /// Creates a new options object with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether the skip memo is used.
    ///
    /// Disabling it gives the plain Boyer-Moore scan with the same shifts and
    /// the same matches, only with more byte comparisons.
    pub fn galil_rule(mut self, value: bool) -> Self {
        self.galil_rule = value;
        self
    }
}

/// Boyer-Moore pattern matcher with the Apostolico-Giancarlo skip memo.
///
/// The matcher holds no tables: everything derived from the pattern is built
/// at the start of each search and dropped at its end.
#[derive(Debug, Clone, Default)]
pub struct BoyerMooreMatcher {
    /// Matcher options
    options: MatcherOptions,
}

impl BoyerMooreMatcher {
    /// Creates a new Boyer-Moore matcher with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new Boyer-Moore matcher with custom options.
    pub fn with_options(options: MatcherOptions) -> Self {
        Self { options }
    }

    /// Returns the options this matcher was created with.
    pub fn options(&self) -> &MatcherOptions {
        &self.options
    }

    /// Returns every occurrence of `pattern` in `text`, in ascending order.
    ///
    /// Overlapping occurrences are reported individually. A zero-length
    /// pattern matches at every offset `0..=text.len()`.
    pub fn search(&self, pattern: impl AsRef<[u8]>, text: impl AsRef<[u8]>) -> MatchSet {
        let mut matches = MatchSet::new();
        self.run(pattern.as_ref(), text.as_ref(), &mut matches);
        matches
    }

    /// Like [`BoyerMooreMatcher::search`], but also returns the search counters.
    pub fn search_with_stats(
        &self,
        pattern: impl AsRef<[u8]>,
        text: impl AsRef<[u8]>,
    ) -> (MatchSet, SearchStats) {
        let mut matches = MatchSet::new();
        let stats = self.run(pattern.as_ref(), text.as_ref(), &mut matches);
        (matches, stats)
    }

    /// Finds the first occurrence of the pattern in the text.
    pub fn find_first(&self, pattern: impl AsRef<[u8]>, text: impl AsRef<[u8]>) -> Option<usize> {
        self.search(pattern, text).first().copied()
    }

    /// Applies the edge-case policy, then preprocesses and scans.
    fn run(&self, pattern: &[u8], text: &[u8], matches: &mut MatchSet) -> SearchStats {
        let m = pattern.len();
        let n = text.len();

        if n < m {
            return SearchStats::default();
        }
        if m == 0 {
            matches.extend(0..=n);
            return SearchStats::default();
        }
        if n == 1 {
            // m == 1 as well
            if pattern[0] == text[0] {
                matches.push(0);
            }
            return SearchStats {
                comparisons: 1,
                alignments: 1,
                ..SearchStats::default()
            };
        }
        if m == 1 {
            return naive_matcher::scan(pattern, text, matches);
        }

        match PreprocessedPattern::new(pattern, self.options.galil_rule) {
            Ok(preprocessed) => {
                let stats = scan(&preprocessed, text, matches);
                tracing::debug!(
                    pattern_len = m,
                    text_len = n,
                    matches = matches.len(),
                    comparisons = stats.comparisons,
                    skipped = stats.skipped,
                    "Boyer-Moore scan finished"
                );
                stats
            }
            Err(BoyerMooreError::PatternTooShort(len)) => {
                tracing::warn!(pattern_len = len, "Unexpected short pattern, using naive scan");
                naive_matcher::scan(pattern, text, matches)
            }
        }
    }
}

impl Matcher for BoyerMooreMatcher {
    fn name(&self) -> &str {
        if self.options.galil_rule {
            "boyer-moore"
        } else {
            "boyer-moore (no memo)"
        }
    }

    fn search_into(&self, pattern: &[u8], text: &[u8], matches: &mut MatchSet) -> SearchStats {
        self.run(pattern, text, matches)
    }
}

/// Runs the alignment-shifting scan over `text`.
///
/// `alignment` is the text position under the last pattern byte. The memo
/// slot of an alignment is written exactly once, when the scan leaves it, so
/// only positions left of the current alignment ever hold a value.
fn scan(preprocessed: &PreprocessedPattern<'_>, text: &[u8], matches: &mut MatchSet) -> SearchStats {
    let pattern = preprocessed.pattern;
    let m = pattern.len();
    let n = text.len();
    let last = m - 1;

    let skip_validation = preprocessed.skip_validation.as_ref();
    let mut memo: Vec<Option<usize>> = match skip_validation {
        Some(_) => vec![None; n],
        None => Vec::new(),
    };
    let mut stats = SearchStats::default();
    let mut alignment = last;

    while alignment < n {
        stats.alignments += 1;
        let start = alignment - last;
        let mut pos = last;

        // None for a full match, Some(pos) for the first mismatch from the right
        let mismatch = loop {
            let text_pos = start + pos;

            if let (Some(table), Some(run)) = (skip_validation, memo.get(text_pos).copied().flatten()) {
                match table.verdict(pos, run) {
                    SkipVerdict::Compare => {}
                    SkipVerdict::Skip => {
                        stats.skipped += run as u64;
                        pos -= run;
                        continue;
                    }
                    SkipVerdict::Mismatch => {
                        stats.deductions += 1;
                        break Some(table.mismatch_index(pos, run));
                    }
                    SkipVerdict::Match => {
                        stats.deductions += 1;
                        stats.skipped += (pos + 1) as u64;
                        break None;
                    }
                }
            }

            stats.comparisons += 1;
            if text[text_pos] != pattern[pos] {
                break Some(pos);
            }
            if pos == 0 {
                break None;
            }
            pos -= 1;
        };

        match mismatch {
            Some(pos) => {
                if let Some(slot) = memo.get_mut(alignment) {
                    *slot = Some(last - pos);
                }
                let bad_character_shift = preprocessed.bad_character.shift(text[start + pos], pos);
                let good_suffix_shift = preprocessed.good_suffix_shift(pos);
                alignment += bad_character_shift.max(good_suffix_shift);
            }
            None => {
                matches.push(start);
                if let Some(slot) = memo.get_mut(alignment) {
                    *slot = Some(m);
                }
                alignment += preprocessed.prefix_suffix.full_match_shift();
            }
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::NaiveMatcher;

    #[test]
    fn test_find_first_basic() {
        let matcher = BoyerMooreMatcher::new();

        let text = "This is a pattern in some text.";
        assert_eq!(matcher.find_first("pattern", text), Some(10));

        let text = "This text does not contain what we're looking for.";
        assert_eq!(matcher.find_first("pattern", text), None);
    }

    #[test]
    fn test_search_all_non_overlapping() {
        let matcher = BoyerMooreMatcher::new();

        let text = "pattern at start, middle pattern, and pattern at end";
        assert_eq!(matcher.search("pattern", text), vec![0, 25, 38]);
    }

    #[test]
    fn test_search_overlapping() {
        let matcher = BoyerMooreMatcher::new();

        assert_eq!(matcher.search("ana", "banana"), vec![1, 3]);
        assert_eq!(matcher.search("aaa", "aaaaa"), vec![0, 1, 2]);
        assert_eq!(matcher.search("abab", "abababab"), vec![0, 2, 4]);
    }

    #[test]
    fn test_edge_cases() {
        let matcher = BoyerMooreMatcher::new();

        // Empty text
        assert!(matcher.search("pattern", "").is_empty());
        // Pattern longer than text
        assert!(matcher.search("pattern", "pat").is_empty());
        // Pattern at the very end and the very beginning
        assert_eq!(matcher.find_first("pattern", "This ends with pattern"), Some(15));
        assert_eq!(matcher.find_first("pattern", "pattern starts here"), Some(0));
        // Single byte text
        assert_eq!(matcher.search("a", "a"), vec![0]);
        assert!(matcher.search("a", "b").is_empty());
        // Single byte pattern
        assert_eq!(matcher.search("a", "banana"), vec![1, 3, 5]);
        // Pattern equal to text
        assert_eq!(matcher.search("needle", "needle"), vec![0]);
    }

    #[test]
    fn test_empty_pattern_matches_everywhere() {
        let matcher = BoyerMooreMatcher::new();

        assert_eq!(matcher.search("", "abc"), vec![0, 1, 2, 3]);
        assert_eq!(matcher.search("", ""), vec![0]);
    }

    #[test]
    fn test_full_byte_range() {
        let matcher = BoyerMooreMatcher::new();
        let text = [0x00, 0xff, 0x80, 0xff, 0x80, 0x7f];

        assert_eq!(matcher.search([0xff, 0x80], text), vec![1, 3]);
        assert_eq!(matcher.search([0x80, 0x7f], text), vec![4]);
    }

    #[test]
    fn test_utf8_bytes() {
        // Offsets are byte offsets
        let matcher = BoyerMooreMatcher::new();
        assert_eq!(matcher.find_first("café", "I'm at the café now"), Some(11));
        assert_eq!(matcher.find_first("こんにちは", "Say こんにちは to everyone"), Some(4));
    }

    #[test]
    fn test_repeated_byte_stress_comparisons() {
        let matcher = BoyerMooreMatcher::new();
        let (matches, stats) = matcher.search_with_stats("aaa", "aaaaaaaaaa");

        assert_eq!(matches, (0..=7).collect::<Vec<_>>());
        // One full verification, then one comparison per alignment
        assert_eq!(stats.comparisons, 10);
        assert_eq!(stats.alignments, 8);

        let plain = BoyerMooreMatcher::with_options(MatcherOptions::new().galil_rule(false));
        let (plain_matches, plain_stats) = plain.search_with_stats("aaa", "aaaaaaaaaa");
        assert_eq!(plain_matches, matches);
        assert_eq!(plain_stats.comparisons, 24);
        assert_eq!(plain_stats.skipped, 0);
    }

    #[test]
    fn test_memo_deduces_mismatch() {
        // The second alignment lands on the memo of the first and learns that
        // the run ends in a mismatch without reading the text again
        let matcher = BoyerMooreMatcher::new();
        let (matches, stats) = matcher.search_with_stats("abab", "abababab");

        assert_eq!(matches, vec![0, 2, 4]);
        assert!(stats.deductions > 0);

        let (_, naive_stats) = NaiveMatcher::new().search_with_stats("abab", "abababab");
        assert!(stats.comparisons <= naive_stats.comparisons);
    }

    #[test]
    fn test_matches_memo_free_scan() {
        let matcher = BoyerMooreMatcher::new();
        let plain = BoyerMooreMatcher::with_options(MatcherOptions::new().galil_rule(false));

        let cases: [(&str, &str); 5] = [
            ("abcab", "abcabcabcabcab"),
            ("aab", "aaabaaabaab"),
            ("GCAGAGAG", "GCATCGCAGAGAGTATACAGTACG"),
            ("ba", "aaaa"),
            ("abracadabra", "abracadabracadabra abracadabra"),
        ];

        for (pattern, text) in cases {
            let (matches, stats) = matcher.search_with_stats(pattern, text);
            let (plain_matches, plain_stats) = plain.search_with_stats(pattern, text);
            assert_eq!(matches, plain_matches, "{pattern} in {text}");
            assert_eq!(matches, NaiveMatcher::new().search(pattern, text));
            assert!(stats.comparisons <= plain_stats.comparisons, "{pattern} in {text}");
            assert_eq!(stats.alignments, plain_stats.alignments);
        }
    }

    #[test]
    fn test_search_into_appends() {
        let matcher = BoyerMooreMatcher::new();
        let mut matches = vec![42];
        let stats = matcher.search_into(b"ab", b"xabab", &mut matches);

        assert_eq!(matches, vec![42, 1, 3]);
        assert!(stats.comparisons > 0);
    }

    #[test]
    fn test_options_builder() {
        let options = MatcherOptions::new().galil_rule(false);
        let matcher = BoyerMooreMatcher::with_options(options.clone());

        assert_eq!(matcher.options(), &options);
        assert_eq!(matcher.name(), "boyer-moore (no memo)");
        assert_eq!(BoyerMooreMatcher::new().name(), "boyer-moore");
    }
}
