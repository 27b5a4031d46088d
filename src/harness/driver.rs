// Copyright (c) 2025 Galil BM Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Timed test driver.
//!
//! A [`TestDriver`] owns an ordered list of [`TestFunction`]s that all take the
//! same input type and produce the same output type. Running the driver pulls
//! inputs from an [`InputSource`] until it is exhausted and feeds each one to
//! every function in registration order, timing every call and handing the
//! output to the function's [`Metrics`].

use std::fmt;
use std::io::BufRead;
use std::time::{Duration, Instant};

use crate::algorithms::{MatchSet, Matcher};
use crate::error::GalilResult;
use crate::harness::fixture::{FixtureReader, FixtureRecord};

/// Supplies driver inputs one at a time.
#[cfg_attr(test, mockall::automock(type Input = FixtureRecord;))]
pub trait InputSource {
    /// Input type produced by this source.
    type Input;

    /// Returns the next input, or `Ok(None)` once the source is exhausted.
    fn next_input(&mut self) -> GalilResult<Option<Self::Input>>;
}

impl<R: BufRead> InputSource for FixtureReader<R> {
    type Input = FixtureRecord;

    fn next_input(&mut self) -> GalilResult<Option<FixtureRecord>> {
        Ok(self.read_record()?)
    }
}

/// Input source over any iterator.
#[derive(Debug, Clone)]
pub struct IterSource<It>(pub It);

impl<It: Iterator> InputSource for IterSource<It> {
    type Input = It::Item;

    fn next_input(&mut self) -> GalilResult<Option<It::Item>> {
        Ok(self.0.next())
    }
}

/// Accumulates statistics about the outputs of one test function.
pub trait Metrics<O>: Default {
    /// Records one output.
    fn record(&mut self, output: &O);

    /// Clears everything recorded so far.
    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Metrics for search functions: how many inputs produced at least one match,
/// and how many matches were reported overall.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchMetrics {
    /// Inputs with at least one match
    pub found: u64,
    /// Total matches over all inputs
    pub matches: u64,
}

impl SearchMetrics {
    /// Average number of matches per input that had any.
    pub fn average_matches(&self) -> f64 {
        if self.found == 0 {
            0.0
        } else {
            self.matches as f64 / self.found as f64
        }
    }
}

impl Metrics<MatchSet> for SearchMetrics {
    fn record(&mut self, output: &MatchSet) {
        if !output.is_empty() {
            self.found += 1;
        }
        self.matches += output.len() as u64;
    }
}

type BoxedFn<I, O> = Box<dyn Fn(&I) -> O + Send + Sync>;

/// A named function under test with its accumulated statistics.
pub struct TestFunction<I, O, M> {
    header: String,
    function: BoxedFn<I, O>,
    calls: u64,
    elapsed: Duration,
    disagreements: u64,
    metrics: M,
}

impl<I, O, M: Metrics<O>> TestFunction<I, O, M> {
    /// Wraps `function` under `header`.
    pub fn new<F>(header: impl Into<String>, function: F) -> Self
    where
        F: Fn(&I) -> O + Send + Sync + 'static,
    {
        Self {
            header: header.into(),
            function: Box::new(function),
            calls: 0,
            elapsed: Duration::ZERO,
            disagreements: 0,
            metrics: M::default(),
        }
    }

    /// Display name of the function.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Number of timed calls.
    pub fn calls(&self) -> u64 {
        self.calls
    }

    /// Total time spent inside the function.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Average time per call, zero before the first call.
    pub fn average(&self) -> Duration {
        match u32::try_from(self.calls) {
            Ok(0) => Duration::ZERO,
            Ok(calls) => self.elapsed / calls,
            Err(_) => Duration::from_secs_f64(self.elapsed.as_secs_f64() / self.calls as f64),
        }
    }

    /// Number of inputs on which this function disagreed with the first one.
    pub fn disagreements(&self) -> u64 {
        self.disagreements
    }

    /// Metrics recorded for this function.
    pub fn metrics(&self) -> &M {
        &self.metrics
    }

    fn reset(&mut self) {
        self.calls = 0;
        self.elapsed = Duration::ZERO;
        self.disagreements = 0;
        self.metrics.reset();
    }

    /// Calls the function `repetitions` times (at least once) and returns the
    /// last output.
    fn timed(&mut self, input: &I, repetitions: u32) -> O {
        let mut output = self.timed_once(input);
        for _ in 1..repetitions {
            output = self.timed_once(input);
        }
        output
    }

    fn timed_once(&mut self, input: &I) -> O {
        let start = Instant::now();
        let output = (self.function)(input);
        self.elapsed += start.elapsed();
        self.calls += 1;
        output
    }
}

impl<I, O, M: fmt::Debug> fmt::Debug for TestFunction<I, O, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestFunction")
            .field("header", &self.header)
            .field("calls", &self.calls)
            .field("elapsed", &self.elapsed)
            .field("disagreements", &self.disagreements)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

/// Options for a driver run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverOptions {
    /// Timed calls per function and input
    pub repetitions: u32,
    /// Whether every output is compared against the first function's output
    pub verify_results: bool,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            repetitions: 1,
            verify_results: true,
        }
    }
}

/// Ordered collection of test functions sharing one input and output type.
pub struct TestDriver<I, O, M> {
    functions: Vec<TestFunction<I, O, M>>,
    options: DriverOptions,
    inputs: u64,
}

impl<I, O, M> TestDriver<I, O, M>
where
    O: PartialEq,
    M: Metrics<O>,
{
    /// Creates a driver with `function` as its first entry.
    ///
    /// When result verification is on, the first entry is the reference the
    /// others are compared against.
    pub fn new<F>(header: impl Into<String>, function: F, options: DriverOptions) -> Self
    where
        F: Fn(&I) -> O + Send + Sync + 'static,
    {
        Self {
            functions: vec![TestFunction::new(header, function)],
            options,
            inputs: 0,
        }
    }

    /// Registers another function after the existing ones.
    pub fn add_test<F>(&mut self, header: impl Into<String>, function: F) -> &mut Self
    where
        F: Fn(&I) -> O + Send + Sync + 'static,
    {
        self.functions.push(TestFunction::new(header, function));
        self
    }

    /// Registered functions, in order.
    pub fn functions(&self) -> &[TestFunction<I, O, M>] {
        &self.functions
    }

    /// Options the driver runs with.
    pub fn options(&self) -> DriverOptions {
        self.options
    }

    /// Number of inputs processed by the last run.
    pub fn inputs(&self) -> u64 {
        self.inputs
    }

    /// Resets all statistics.
    pub fn reset(&mut self) {
        self.inputs = 0;
        for function in &mut self.functions {
            function.reset();
        }
    }

    /// Runs every function on every input of `source`.
    ///
    /// Statistics from earlier runs are discarded first. Returns the number of
    /// inputs processed.
    ///
    /// # Errors
    ///
    /// Stops at the first error from the source; statistics collected up to
    /// that point are kept.
    pub fn run<S>(&mut self, source: &mut S) -> GalilResult<u64>
    where
        S: InputSource<Input = I> + ?Sized,
    {
        self.reset();

        while let Some(input) = source.next_input()? {
            self.run_one(&input);
        }

        tracing::info!(
            inputs = self.inputs,
            functions = self.functions.len(),
            "Driver run finished"
        );
        Ok(self.inputs)
    }

    fn run_one(&mut self, input: &I) {
        let repetitions = self.options.repetitions;
        let verify = self.options.verify_results;
        let index = self.inputs;

        let Some((reference, rest)) = self.functions.split_first_mut() else {
            return;
        };

        let expected = reference.timed(input, repetitions);
        reference.metrics.record(&expected);

        for function in rest {
            let output = function.timed(input, repetitions);
            function.metrics.record(&output);
            if verify && output != expected {
                function.disagreements += 1;
                tracing::warn!(
                    input = index,
                    function = %function.header,
                    reference = %reference.header,
                    "Output differs from the reference function"
                );
            }
        }

        self.inputs += 1;
    }
}

impl TestDriver<FixtureRecord, MatchSet, SearchMetrics> {
    /// Creates a search driver with `matcher` as the reference function.
    pub fn for_matcher<Mt>(header: impl Into<String>, matcher: Mt, options: DriverOptions) -> Self
    where
        Mt: Matcher + 'static,
    {
        Self::new(
            header,
            move |record: &FixtureRecord| matcher.search(&record.pattern, &record.text),
            options,
        )
    }

    /// Registers another matcher.
    pub fn add_matcher<Mt>(&mut self, header: impl Into<String>, matcher: Mt) -> &mut Self
    where
        Mt: Matcher + 'static,
    {
        self.add_test(header, move |record: &FixtureRecord| {
            matcher.search(&record.pattern, &record.text)
        })
    }
}

impl<I, O, M: fmt::Debug> fmt::Debug for TestDriver<I, O, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestDriver")
            .field("functions", &self.functions)
            .field("options", &self.options)
            .field("inputs", &self.inputs)
            .finish()
    }
}
