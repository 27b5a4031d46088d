//! galil_bm Library
//!
//! Exact single-pattern substring search over bytes: Boyer-Moore with the bad
//! character and strong good suffix rules, generalized with the
//! Apostolico-Giancarlo skip memo so that no text byte proven equal at an
//! earlier alignment is compared again. A naive matcher serves as the
//! reference implementation.
//!
//! Around the matchers the library carries a small benchmark harness (fixture
//! files, a timed driver, reports) and the configuration and error plumbing
//! used by the `galil_bm` binary.
//!
//! # Example
//!
//! ```
//! use galil_bm_lib::search;
//!
//! assert_eq!(search("ana", "bananas"), vec![1, 3]);
//! ```

// Re-export public modules
pub mod algorithms;
pub mod config;
pub mod error;
pub mod harness;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

pub use algorithms::{
    search, BoyerMooreMatcher, MatchSet, Matcher, MatcherOptions, NaiveMatcher, SearchStats,
};

/// Version information for galil_bm.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library initialization function.
///
/// Installs the tracing error reporter unless one is already set.
pub fn init() {
    if !error::has_error_reporter() {
        error::set_error_reporter(std::sync::Arc::new(error::TracingErrorReporter));
    }
}
