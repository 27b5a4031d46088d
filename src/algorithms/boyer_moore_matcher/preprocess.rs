// Copyright (c) 2025 Galil BM Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Pattern preprocessing for the Boyer-Moore algorithm.
//!
//! This module contains functions for preprocessing the pattern before searching,
//! which is a key part of the Boyer-Moore algorithm's efficiency. The preprocessing
//! step analyzes the pattern alone to generate the lookup tables that drive
//! the shifts and the memo checks of the search phase.
//!
//! All builders require a pattern of at least two bytes. Shorter patterns are
//! routed elsewhere by the matcher before preprocessing starts.

use super::error::{BoyerMooreError, Result};
use super::tables::{
    BadCharacterTable, PrefixSuffixTable, SkipValidationTable, SkipVerdict, StrongSuffixTable,
    ALPHABET_SIZE,
};

/// Longest pattern for which the quadratic skip validation table is built.
///
/// Longer patterns are scanned without the memo, which only costs comparisons.
pub const MAX_SKIP_TABLE_PATTERN_LENGTH: usize = 4096;

/// Builds the bad character table.
///
/// Every entry starts at `i + 1`, the positions of each pattern byte are
/// zeroed, then each byte's row is filled forward from its first occurrence
/// with `row[i] = row[i - 1] + 1` wherever the slot is not already zero.
pub fn build_bad_character(pattern: &[u8]) -> BadCharacterTable {
    let m = pattern.len();
    let mut shifts = Vec::with_capacity(ALPHABET_SIZE * m);
    for _ in 0..ALPHABET_SIZE {
        shifts.extend(1..=m);
    }

    let mut first_seen = [None::<usize>; ALPHABET_SIZE];
    for (pos, &byte) in pattern.iter().enumerate() {
        shifts[usize::from(byte) * m + pos] = 0;
        if first_seen[usize::from(byte)].is_none() {
            first_seen[usize::from(byte)] = Some(pos);
        }
    }

    // Bytes absent from the pattern keep their defaults
    for (byte, first) in first_seen.iter().enumerate() {
        let Some(first) = *first else { continue };
        let row = &mut shifts[byte * m..(byte + 1) * m];
        for pos in first + 1..m {
            if row[pos] != 0 {
                row[pos] = row[pos - 1] + 1;
            }
        }
    }

    BadCharacterTable {
        shifts,
        pattern_len: m,
    }
}

/// Nearest occurrence of `byte` in `pattern[..=pos]`, read off the bad
/// character table.
fn occurrence_at_or_before(table: &BadCharacterTable, byte: u8, pos: usize) -> Option<usize> {
    let distance = table.shift(byte, pos);
    (distance <= pos).then(|| pos - distance)
}

/// Builds the strong suffix table and the prefix suffix table.
///
/// For each mismatch position, right to left, the earlier occurrences of the
/// matched suffix's leading byte are visited through the bad character table
/// and verified in full. The first one (rightmost) whose preceding byte
/// differs from the mismatched pattern byte gives the strong shift.
pub fn build_good_suffix(
    pattern: &[u8],
    bad_character: &BadCharacterTable,
) -> (StrongSuffixTable, PrefixSuffixTable) {
    let m = pattern.len();
    debug_assert!(m >= 2, "good suffix tables need at least two bytes");
    let last = m - 1;

    let mut strong = vec![None; m];
    for pos in (0..last).rev() {
        let suffix = &pattern[pos + 1..];
        let lead = suffix[0];
        let mut candidate = occurrence_at_or_before(bad_character, lead, pos);

        while let Some(start) = candidate {
            let differs_before = start == 0 || pattern[start - 1] != pattern[pos];
            if differs_before && pattern[start + 1..start + suffix.len()] == suffix[1..] {
                strong[pos] = Some(pos + 1 - start);
                break;
            }
            candidate = start
                .checked_sub(1)
                .and_then(|before| occurrence_at_or_before(bad_character, lead, before));
        }
    }

    // nearest_border[start] is start itself when pattern[start..] is a prefix,
    // otherwise the value of the next index. The whole pattern never counts.
    let mut nearest_border = vec![m; m + 1];
    nearest_border[0] = 0;
    for start in (1..m).rev() {
        let is_border = pattern[start] == pattern[0] && pattern[start..] == pattern[..m - start];
        nearest_border[start] = if is_border {
            start
        } else {
            nearest_border[start + 1]
        };
    }

    let mut shifts: Vec<Option<usize>> = (0..m)
        .map(|pos| Some(nearest_border[pos.max(1)]))
        .collect();
    shifts[last] = None;

    (
        StrongSuffixTable { shifts: strong },
        PrefixSuffixTable {
            shifts,
            nearest_border,
        },
    )
}

/// Builds the skip validation table.
///
/// The agreement `N[i]` is measured by comparing the bytes ending at `i`
/// against the pattern's own tail. When the border table already says that
/// `pattern[..=i]` is a border, the comparison is skipped and `N[i] = i + 1`.
pub fn build_skip_validation(
    pattern: &[u8],
    prefix_suffix: &PrefixSuffixTable,
) -> SkipValidationTable {
    let m = pattern.len();
    let last = m - 1;

    let agreement: Vec<usize> = (0..m)
        .map(|pos| {
            if prefix_suffix.is_border_start(last - pos) {
                return pos + 1;
            }
            let mut len = 0;
            while len <= pos && pattern[pos - len] == pattern[last - len] {
                len += 1;
            }
            len
        })
        .collect();

    let mut verdicts = Vec::with_capacity(m * (m + 1));
    for (pos, &agree) in agreement.iter().enumerate() {
        for run in 0..=m {
            let verdict = if run > pos {
                if agree == pos + 1 {
                    SkipVerdict::Match
                } else {
                    SkipVerdict::Mismatch
                }
            } else if run == agree {
                if run == 0 {
                    SkipVerdict::Compare
                } else {
                    SkipVerdict::Skip
                }
            } else {
                SkipVerdict::Mismatch
            };
            verdicts.push(verdict);
        }
    }

    SkipValidationTable {
        verdicts,
        agreement,
        pattern_len: m,
    }
}

/// Result of the preprocessing step containing all necessary lookup tables.
#[derive(Debug)]
pub struct PreprocessedPattern<'p> {
    /// The pattern being searched for
    pub pattern: &'p [u8],

    /// Bad character rule table
    pub bad_character: BadCharacterTable,

    /// Strong good suffix table
    pub strong_suffix: StrongSuffixTable,

    /// Border fallback for the good suffix rule
    pub prefix_suffix: PrefixSuffixTable,

    /// Memo validation table, absent when the memo is disabled or the pattern
    /// is longer than [`MAX_SKIP_TABLE_PATTERN_LENGTH`]
    pub skip_validation: Option<SkipValidationTable>,
}

impl<'p> PreprocessedPattern<'p> {
    /// Preprocesses a pattern for use in the Boyer-Moore algorithm.
    ///
    /// # Arguments
    ///
    /// * `pattern` - The pattern to preprocess.
    /// * `galil_rule` - Whether to build the skip validation table for the memo.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is shorter than two bytes.
    pub fn new(pattern: &'p [u8], galil_rule: bool) -> Result<Self> {
        if pattern.len() < 2 {
            return Err(BoyerMooreError::PatternTooShort(pattern.len()));
        }

        let bad_character = build_bad_character(pattern);
        let (strong_suffix, prefix_suffix) = build_good_suffix(pattern, &bad_character);

        let skip_validation = if !galil_rule {
            None
        } else if pattern.len() > MAX_SKIP_TABLE_PATTERN_LENGTH {
            tracing::debug!(
                pattern_len = pattern.len(),
                limit = MAX_SKIP_TABLE_PATTERN_LENGTH,
                "Pattern too long for the skip validation table, scanning without memo"
            );
            None
        } else {
            Some(build_skip_validation(pattern, &prefix_suffix))
        };

        Ok(Self {
            pattern,
            bad_character,
            strong_suffix,
            prefix_suffix,
            skip_validation,
        })
    }

    /// Length of the pattern in bytes.
    pub fn pattern_len(&self) -> usize {
        self.pattern.len()
    }

    /// Good suffix shift for a mismatch at `pos`: the strong shift, else the
    /// border shift, else `0` (final position).
    #[inline]
    pub fn good_suffix_shift(&self, pos: usize) -> usize {
        self.strong_suffix
            .shift(pos)
            .or_else(|| self.prefix_suffix.shift(pos))
            .unwrap_or(0)
    }
}
