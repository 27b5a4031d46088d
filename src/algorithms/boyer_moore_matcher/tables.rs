// Copyright (c) 2025 Galil BM Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Tables for the Boyer-Moore string matching algorithm.
//!
//! This module contains the lookup tables derived from the pattern before a
//! scan starts:
//!
//! 1. Bad Character Table: for a mismatching text byte, the distance back to its
//!    nearest occurrence in the pattern.
//!
//! 2. Strong Suffix Table and Prefix Suffix Table: the two halves of the good
//!    suffix rule. The first aligns an earlier full occurrence of the matched
//!    suffix, the second falls back to a border of the pattern.
//!
//! 3. Skip Validation Table: decides, for a comparison index and a run length
//!    remembered from an earlier alignment, what that run proves about the
//!    current alignment.
//!
//! Every table is built once per search call and never mutated afterwards.
//! The construction code lives in the sibling `preprocess` module.

/// Number of distinct byte codes. The tables cover the full byte range.
pub const ALPHABET_SIZE: usize = 256;

/// Bad character table, `ALPHABET_SIZE` rows of `pattern_len` shift distances.
///
/// Entry `[c][i]` is the distance from pattern index `i` back to the nearest
/// occurrence of byte `c` at or before `i`, or `i + 1` when `c` does not occur
/// in `pattern[..=i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadCharacterTable {
    /// Row-major storage, `shifts[c * pattern_len + i]`
    pub(super) shifts: Vec<usize>,
    /// Length of the pattern
    pub(super) pattern_len: usize,
}

impl BadCharacterTable {
    /// Gets the bad character shift for byte `byte` mismatching at `pos`.
    ///
    /// Returns `0` when `pattern[pos] == byte`, which never happens for a real
    /// mismatch.
    #[inline]
    pub fn shift(&self, byte: u8, pos: usize) -> usize {
        debug_assert!(pos < self.pattern_len);
        self.shifts[usize::from(byte) * self.pattern_len + pos]
    }

    /// Returns the row for `byte`.
    pub fn row(&self, byte: u8) -> &[usize] {
        let start = usize::from(byte) * self.pattern_len;
        &self.shifts[start..start + self.pattern_len]
    }

    /// Length of the pattern the table was built from.
    pub fn pattern_len(&self) -> usize {
        self.pattern_len
    }
}

/// Strong good suffix table (`L`).
///
/// Indexed by mismatch position `i`: after matching `pattern[i + 1..]`, the
/// shift that aligns the rightmost earlier occurrence of that suffix whose
/// preceding byte differs from `pattern[i]`. `None` when no such occurrence
/// exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrongSuffixTable {
    pub(super) shifts: Vec<Option<usize>>,
}

impl StrongSuffixTable {
    /// Gets the strong suffix shift for a mismatch at `pos`.
    #[inline]
    pub fn shift(&self, pos: usize) -> Option<usize> {
        self.shifts[pos]
    }

    /// Returns all entries, indexed by mismatch position.
    pub fn as_slice(&self) -> &[Option<usize>] {
        &self.shifts
    }
}

/// Prefix suffix (border) table (`H`).
///
/// Indexed by mismatch position `i`: the shift to the nearest border of the
/// pattern starting at or after `i` (the pattern length when there is none).
/// Entry `0` is the shift after a full match, i.e. the smallest period of the
/// pattern. The last entry is `None`, a mismatch on the final byte only uses
/// the bad character rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixSuffixTable {
    pub(super) shifts: Vec<Option<usize>>,
    /// `nearest_border[j]` for `1 <= j <= m`: smallest `t >= j` such that
    /// `pattern[t..]` is a prefix of the pattern (`m` for the empty border).
    pub(super) nearest_border: Vec<usize>,
}

impl PrefixSuffixTable {
    /// Gets the border shift for a mismatch at `pos`.
    #[inline]
    pub fn shift(&self, pos: usize) -> Option<usize> {
        self.shifts[pos]
    }

    /// Shift applied after a full match.
    #[inline]
    pub fn full_match_shift(&self) -> usize {
        self.nearest_border[1]
    }

    /// Returns `true` if `pattern[start..]` is also a prefix of the pattern.
    ///
    /// `start == 0` is the whole pattern and always qualifies.
    pub fn is_border_start(&self, start: usize) -> bool {
        start == 0 || self.nearest_border.get(start) == Some(&start)
    }

    /// Returns all entries, indexed by mismatch position.
    pub fn as_slice(&self) -> &[Option<usize>] {
        &self.shifts
    }
}

/// What a remembered run proves about the current alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipVerdict {
    /// The run carries no information here, compare the byte directly.
    Compare,
    /// The run is trustworthy, resume comparing `run` positions further left.
    Skip,
    /// The run proves a mismatch, see [`SkipValidationTable::mismatch_index`].
    Mismatch,
    /// The run proves the remaining prefix of the window matches.
    Match,
}

/// Skip validation table for the Apostolico-Giancarlo generalization of the
/// Galil rule.
///
/// For comparison index `i` and a run `r` remembered at the aligned text
/// position (the text bytes ending there equal the last `r` pattern bytes),
/// the verdict depends on `N[i]`, the length of the longest common suffix of
/// `pattern[..=i]` and the whole pattern:
///
/// - `r < N[i]`: both agree for `r` bytes, then the text byte that ended the
///   earlier run differs from the pattern. Mismatch at `i - r`.
/// - `r == N[i]`, `r <= i`: both agree for `r` bytes, nothing is known beyond.
///   Skip them.
/// - `r > N[i]`, `N[i] <= i`: the pattern disagrees with its own tail at
///   `i - N[i]` while the text agrees. Mismatch there.
/// - `r > i`, `N[i] == i + 1`: `pattern[..=i]` is a border and the text matches
///   it. Full match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipValidationTable {
    /// Row-major `pattern_len x (pattern_len + 1)`
    pub(super) verdicts: Vec<SkipVerdict>,
    /// `N[i]` for every pattern index
    pub(super) agreement: Vec<usize>,
    pub(super) pattern_len: usize,
}

impl SkipValidationTable {
    /// Gets the verdict for comparison index `pos` and remembered run `run`.
    #[inline]
    pub fn verdict(&self, pos: usize, run: usize) -> SkipVerdict {
        debug_assert!(run <= self.pattern_len);
        self.verdicts[pos * (self.pattern_len + 1) + run]
    }

    /// Pattern index of the mismatch proven by a [`SkipVerdict::Mismatch`].
    #[inline]
    pub fn mismatch_index(&self, pos: usize, run: usize) -> usize {
        pos - run.min(self.agreement[pos])
    }

    /// Returns `true` if a run of `run` bytes may be relied on at `pos`.
    ///
    /// For `run <= pos` this holds when the run agrees with the bytes of the
    /// pattern's own tail. For longer runs it holds only when the whole
    /// `pattern[..=pos]` is a border of the pattern.
    pub fn is_trusted(&self, pos: usize, run: usize) -> bool {
        let agreement = self.agreement[pos];
        if run <= pos {
            run <= agreement
        } else {
            agreement == pos + 1
        }
    }

    /// Length of the longest common suffix of `pattern[..=pos]` and the pattern.
    pub fn agreement(&self, pos: usize) -> usize {
        self.agreement[pos]
    }
}

#[cfg(test)]
mod tests {
    use super::super::preprocess::{build_bad_character, build_good_suffix, build_skip_validation};
    use super::*;

    #[test]
    fn test_bad_character_rows() {
        // Example row from the classic "babbbbaabbab" walkthrough
        let table = build_bad_character(b"babbbbaabbab");

        assert_eq!(table.row(b'a'), &[1, 0, 1, 2, 3, 4, 0, 0, 1, 2, 0, 1]);
        assert_eq!(table.row(b'b'), &[0, 1, 0, 0, 0, 0, 1, 2, 0, 0, 1, 0]);
        assert_eq!(table.row(b'z'), &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
    }

    #[test]
    fn test_bad_character_high_bytes() {
        let table = build_bad_character(&[0xff, 0x80, 0xff]);

        assert_eq!(table.shift(0xff, 2), 0);
        assert_eq!(table.shift(0xff, 1), 1);
        assert_eq!(table.shift(0x80, 2), 1);
        assert_eq!(table.shift(0x00, 2), 3);
    }

    #[test]
    fn test_good_suffix_anpanman() {
        let pattern = b"ANPANMAN";
        let bad_character = build_bad_character(pattern);
        let (strong, prefix) = build_good_suffix(pattern, &bad_character);

        // Both earlier "N"s are preceded by 'A', same as the mismatched byte
        assert_eq!(strong.shift(6), None);
        assert_eq!(prefix.shift(6), Some(6));
        // "AN" recurs at 3 preceded by 'P' != 'M'
        assert_eq!(strong.shift(5), Some(3));
        // "MAN" never recurs, but the border "AN" allows a shift of 6
        assert_eq!(strong.shift(4), None);
        assert_eq!(prefix.shift(4), Some(6));
        // Final byte only uses the bad character rule
        assert_eq!(strong.shift(7), None);
        assert_eq!(prefix.shift(7), None);
        assert_eq!(prefix.full_match_shift(), 6);
    }

    #[test]
    fn test_prefix_suffix_periodic() {
        let pattern = b"abab";
        let bad_character = build_bad_character(pattern);
        let (_, prefix) = build_good_suffix(pattern, &bad_character);

        assert_eq!(prefix.full_match_shift(), 2);
        assert!(prefix.is_border_start(0));
        assert!(prefix.is_border_start(2));
        assert!(!prefix.is_border_start(1));
        assert!(!prefix.is_border_start(3));
    }

    #[test]
    fn test_skip_validation_verdicts() {
        let pattern = b"abab";
        let bad_character = build_bad_character(pattern);
        let (_, prefix) = build_good_suffix(pattern, &bad_character);
        let table = build_skip_validation(pattern, &prefix);

        // N = [0, 2, 0, 4]
        assert_eq!(table.agreement(0), 0);
        assert_eq!(table.agreement(1), 2);
        assert_eq!(table.agreement(2), 0);
        assert_eq!(table.agreement(3), 4);

        assert_eq!(table.verdict(2, 0), SkipVerdict::Compare);
        assert_eq!(table.verdict(2, 1), SkipVerdict::Mismatch);
        assert_eq!(table.mismatch_index(2, 1), 2);
        assert_eq!(table.verdict(1, 0), SkipVerdict::Mismatch);
        assert_eq!(table.verdict(1, 1), SkipVerdict::Mismatch);
        assert_eq!(table.mismatch_index(1, 1), 0);
        assert_eq!(table.verdict(1, 2), SkipVerdict::Match);
        assert_eq!(table.verdict(1, 4), SkipVerdict::Match);

        assert!(table.is_trusted(1, 2));
        assert!(!table.is_trusted(2, 1));
    }

    #[test]
    fn test_skip_validation_partial_period() {
        // N[2] == 2: "ab" ends both pattern[..=2] and the pattern
        let pattern = b"xabyab";
        let bad_character = build_bad_character(pattern);
        let (_, prefix) = build_good_suffix(pattern, &bad_character);
        let table = build_skip_validation(pattern, &prefix);

        assert_eq!(table.agreement(2), 2);
        assert_eq!(table.verdict(2, 2), SkipVerdict::Skip);
        assert_eq!(table.verdict(2, 1), SkipVerdict::Mismatch);
        assert_eq!(table.mismatch_index(2, 1), 1);
        assert_eq!(table.verdict(2, 3), SkipVerdict::Mismatch);
        assert_eq!(table.mismatch_index(2, 3), 0);
        assert_eq!(table.verdict(2, 6), SkipVerdict::Mismatch);
        assert!(table.is_trusted(2, 2));
        assert!(!table.is_trusted(2, 3));
    }
}
