// Copyright (c) 2025 Galil BM Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types for the Boyer-Moore Pattern Matcher.

/// Error types for Boyer-Moore Pattern Matcher operations
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum BoyerMooreError {
    /// Pattern too short for table preprocessing
    #[error("Pattern of {0} byte(s) is too short for preprocessing, at least 2 are required")]
    PatternTooShort(usize),
}

/// Result type for Boyer-Moore Pattern Matcher operations
pub type Result<T> = std::result::Result<T, BoyerMooreError>;
