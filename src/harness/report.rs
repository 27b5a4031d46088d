// Copyright (c) 2025 Galil BM Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Driver run reports.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::algorithms::MatchSet;
use crate::config::harness::OutputFormat;
use crate::error::GalilResult;
use crate::harness::driver::{SearchMetrics, TestDriver};

/// Statistics of one test function after a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionReport {
    /// Display name of the function
    pub header: String,
    /// Number of timed calls
    pub calls: u64,
    /// Total time in microseconds
    pub total_micros: u64,
    /// Average time per call in microseconds
    pub average_micros: f64,
    /// Inputs with at least one match
    pub found: u64,
    /// Total matches
    pub matches: u64,
    /// Average matches per input with any
    pub average_matches: f64,
    /// Inputs on which the output differed from the reference function
    pub disagreements: u64,
}

/// Report of one driver run over one input source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverReport {
    /// Where the inputs came from, usually a fixture path
    pub source: String,
    /// Number of inputs processed
    pub inputs: u64,
    /// Whether outputs were checked against the reference function
    pub verified: bool,
    /// One entry per function, in registration order
    pub functions: Vec<FunctionReport>,
}

impl DriverReport {
    /// Builds a report from the current statistics of a search driver.
    pub fn from_driver<I>(
        source: impl Into<String>,
        driver: &TestDriver<I, MatchSet, SearchMetrics>,
    ) -> Self {
        let functions = driver
            .functions()
            .iter()
            .map(|function| {
                let metrics = function.metrics();
                FunctionReport {
                    header: function.header().to_string(),
                    calls: function.calls(),
                    total_micros: u64::try_from(function.elapsed().as_micros()).unwrap_or(u64::MAX),
                    average_micros: function.average().as_secs_f64() * 1e6,
                    found: metrics.found,
                    matches: metrics.matches,
                    average_matches: metrics.average_matches(),
                    disagreements: function.disagreements(),
                }
            })
            .collect();

        Self {
            source: source.into(),
            inputs: driver.inputs(),
            verified: driver.options().verify_results,
            functions,
        }
    }

    /// Total disagreements over all functions.
    pub fn disagreements(&self) -> u64 {
        self.functions.iter().map(|function| function.disagreements).sum()
    }

    /// Renders the report in `format`.
    pub fn render(&self, format: OutputFormat) -> GalilResult<String> {
        match format {
            OutputFormat::Text => Ok(self.to_string()),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

impl Display for DriverReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Source: {} ({} inputs)", self.source, self.inputs)?;
        for function in &self.functions {
            writeln!(f)?;
            writeln!(f, "{}", function.header)?;
            writeln!(f, "{}", "=".repeat(function.header.chars().count()))?;
            writeln!(f, "  Test Calls......: {}", function.calls)?;
            writeln!(f, "  Test Time.......: {} microseconds", function.total_micros)?;
            writeln!(f, " Average Time.....: {:.3} microseconds", function.average_micros)?;
            writeln!(f, "  Search Found....: {}", function.found)?;
            writeln!(f, "  Search Matches..: {} occurrences", function.matches)?;
            writeln!(f, " Average Matches..: {:.3} occurrences", function.average_matches)?;
            if self.verified {
                writeln!(f, "  Disagreements...: {}", function.disagreements)?;
            }
        }
        Ok(())
    }
}
