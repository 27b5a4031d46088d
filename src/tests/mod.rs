//! Test modules for galil_bm.
//!
//! This module contains the crate-level test suites, including:
//! - Configuration loading and validation
//! - Error types and reporting
//! - The harness end to end, from fixture files to reports
//! - Shared fixtures and proptest strategies

pub mod harness_tests;

// Re-export commonly used testing tools to simplify imports in test modules
pub use test_utils::{bytes_strategy, create_test_dir, sample_records, TestFixture};
