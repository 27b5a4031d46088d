// Copyright (c) 2025 Galil BM Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Benchmark harness for the matchers.
//!
//! This module provides:
//! - [`fixture`]: the length-prefixed fixture format, reader, writer and a
//!   seeded generator
//! - [`driver`]: the timed test driver and its input/metrics capabilities
//! - [`report`]: per-function statistics rendered as text or JSON
//!
//! Nothing in here affects how the matchers behave.

pub mod driver;
pub mod fixture;
pub mod report;

use std::path::Path;

use crate::algorithms::{BoyerMooreMatcher, MatchSet, NaiveMatcher};
use crate::config::harness::HarnessConfig;
use crate::error::GalilResult;

// Re-export the commonly used types
pub use driver::{
    DriverOptions, InputSource, IterSource, Metrics, SearchMetrics, TestDriver, TestFunction,
};
pub use fixture::{FixtureReader, FixtureRecord, FixtureWriter, GeneratorOptions};
pub use report::{DriverReport, FunctionReport};

/// Header of the Boyer-Moore entry in the default driver.
pub const BOYER_MOORE_HEADER: &str = "Boyer-Moore String Search";

/// Header of the naive entry in the default driver.
pub const NAIVE_HEADER: &str = "Naive String Search";

/// Driver options from the harness configuration.
impl From<&HarnessConfig> for DriverOptions {
    fn from(config: &HarnessConfig) -> Self {
        Self {
            repetitions: config.repetitions,
            verify_results: config.verify_results,
        }
    }
}

/// Builds the default search driver: Boyer-Moore first, as the reference,
/// then the naive matcher.
pub fn default_driver(options: DriverOptions) -> TestDriver<FixtureRecord, MatchSet, SearchMetrics> {
    let mut driver = TestDriver::for_matcher(BOYER_MOORE_HEADER, BoyerMooreMatcher::new(), options);
    driver.add_matcher(NAIVE_HEADER, NaiveMatcher::new());
    driver
}

/// Runs `driver` over the fixture at `path` and returns the report.
pub fn run_fixture_file<P: AsRef<Path>>(
    driver: &mut TestDriver<FixtureRecord, MatchSet, SearchMetrics>,
    path: P,
    max_record_len: usize,
) -> GalilResult<DriverReport> {
    let path = path.as_ref();
    let _span = tracing::info_span!("fixture", path = %path.display()).entered();

    let mut reader = fixture::open_fixture(path, max_record_len)?;
    driver.run(&mut reader)?;
    Ok(DriverReport::from_driver(path.display().to_string(), driver))
}
