//! galil_bm - Main entrypoint.
//!
//! Command line front end for the matchers and the benchmark harness. It loads
//! configuration, initializes logging, and dispatches to a subcommand. Reports
//! and match offsets go to stdout, logs to stderr.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{ArgGroup, Parser, Subcommand};
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use galil_bm_lib::config::harness::OutputFormat;
use galil_bm_lib::config::{self, ConfigLoader, GalilConfig, LogConfig, ENV_PREFIX};
use galil_bm_lib::error::{report_error, ErrorContext, GalilError};
use galil_bm_lib::harness::{self, fixture, DriverOptions, DriverReport, GeneratorOptions};
use galil_bm_lib::{BoyerMooreMatcher, MatcherOptions, NaiveMatcher};

/// Command line arguments for galil_bm.
#[derive(Parser, Debug)]
#[clap(name = "galil_bm", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Print reports and results as JSON
    #[clap(long)]
    json: bool,

    /// Command to execute
    #[clap(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Time Boyer-Moore against the naive matcher over fixture files
    Run {
        /// Fixture files, the configured default fixture when empty
        #[clap(value_parser)]
        files: Vec<PathBuf>,
    },

    /// Search one pattern in a text or a file and print the match offsets
    #[clap(group(ArgGroup::new("haystack").required(true).args(["text", "file"])))]
    Search {
        /// Pattern to search for
        #[clap(short, long)]
        pattern: String,

        /// Text to search
        #[clap(short, long)]
        text: Option<String>,

        /// File whose raw bytes are searched
        #[clap(short, long, value_parser)]
        file: Option<PathBuf>,

        /// Use the naive matcher instead of Boyer-Moore
        #[clap(long)]
        naive: bool,

        /// Disable the skip memo
        #[clap(long, conflicts_with = "naive")]
        no_memo: bool,
    },

    /// Write a fixture file of random records
    GenFixture {
        /// Path to output fixture file
        #[clap(short, long, value_parser)]
        output: PathBuf,

        /// Number of records
        #[clap(long, default_value_t = 100)]
        records: usize,

        /// Length of every text
        #[clap(long, default_value_t = 10_000)]
        text_len: usize,

        /// Length of every pattern
        #[clap(long, default_value_t = 8)]
        pattern_len: usize,

        /// Bytes to draw from
        #[clap(long, default_value = "acgt")]
        alphabet: String,

        /// Probability of planting the pattern in the text
        #[clap(long, default_value_t = 0.5)]
        plant_probability: f64,

        /// Random seed
        #[clap(long, default_value_t = 42)]
        seed: u64,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Initialize the logging system.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(log: &LogConfig) -> Result<(), GalilError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(ErrorLayer::default());

    let result = if log.json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_file(log.source_location)
                    .with_line_number(log.source_location)
                    .with_writer(io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_file(log.source_location)
                    .with_line_number(log.source_location)
                    .with_thread_names(true)
                    .with_writer(io::stderr),
            )
            .try_init()
    };

    result.map_err(|e| GalilError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

/// Main entry point for the application.
fn main() -> ExitCode {
    let args = Args::parse();

    // Logging depends on the configuration, so load it first
    let loaded = ConfigLoader::new(args.config.as_deref(), ENV_PREFIX).load();
    let log_config = loaded
        .as_ref()
        .map(|config| config.log.clone())
        .unwrap_or_default();
    if let Err(e) = init_logging(&log_config) {
        eprintln!("{e}");
    }
    galil_bm_lib::init();

    match execute(args, loaded) {
        Ok(code) => code,
        Err(err) => {
            let details = format!("{err:#}");
            let error = err
                .downcast::<GalilError>()
                .unwrap_or_else(|err| GalilError::Custom(err.to_string()));
            report_error(
                ErrorContext::new(error, "galil_bm")
                    .with_details(details)
                    .with_span_trace(),
            );
            ExitCode::FAILURE
        }
    }
}

fn execute(
    args: Args,
    loaded: Result<GalilConfig, galil_bm_lib::error::config::ConfigError>,
) -> anyhow::Result<ExitCode> {
    match args.command {
        Command::Run { files } => {
            let config = loaded.map_err(GalilError::from).context("Failed to load configuration")?;
            config::init_global_config(config.clone());
            let format = if args.json {
                OutputFormat::Json
            } else {
                config.harness.output_format
            };
            run_fixtures(&config, files, format)
        }
        Command::Search {
            pattern,
            text,
            file,
            naive,
            no_memo,
        } => {
            let haystack = match (text, file) {
                (Some(text), _) => text.into_bytes(),
                (None, Some(path)) => fs::read(&path)
                    .map_err(GalilError::from)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                (None, None) => bail!("either --text or --file is required"),
            };
            search(pattern.as_bytes(), &haystack, naive, no_memo, args.json)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::GenFixture {
            output,
            records,
            text_len,
            pattern_len,
            alphabet,
            plant_probability,
            seed,
        } => {
            let options = GeneratorOptions {
                records,
                text_len,
                pattern_len,
                alphabet: alphabet.into_bytes(),
                plant_probability,
                seed,
            };
            gen_fixture(&output, &options)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Validate => {
            info!("Validating configuration");
            loaded.map_err(GalilError::from).context("Configuration validation failed")?;
            println!("Configuration is valid");
            Ok(ExitCode::SUCCESS)
        }
        Command::GenConfig { output } => {
            info!("Generating default configuration");

            // Create parent directories if they don't exist
            if let Some(parent) = output.parent().filter(|parent| !parent.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(GalilError::Io)?;
            }
            config::write_config(&GalilConfig::default(), &output).map_err(GalilError::from)?;

            info!("Default configuration written to {:?}", output);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_fixtures(
    config: &GalilConfig,
    files: Vec<PathBuf>,
    format: OutputFormat,
) -> anyhow::Result<ExitCode> {
    let files = if files.is_empty() {
        vec![config.harness.default_fixture.clone()]
    } else {
        files
    };

    let mut reports = Vec::with_capacity(files.len());
    for path in &files {
        let mut driver = harness::default_driver(DriverOptions::from(&config.harness));
        let report = harness::run_fixture_file(&mut driver, path, config.harness.max_record_len)
            .with_context(|| format!("Failed to run fixture {}", path.display()))?;
        reports.push(report);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => {
            for report in &reports {
                writeln!(out, "{report}")?;
            }
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&reports).map_err(GalilError::from)?)?;
        }
    }

    let disagreements: u64 = reports.iter().map(DriverReport::disagreements).sum();
    if disagreements > 0 {
        tracing::error!(disagreements, "Matchers disagreed with the reference");
        return Ok(ExitCode::from(2));
    }
    Ok(ExitCode::SUCCESS)
}

fn search(pattern: &[u8], text: &[u8], naive: bool, no_memo: bool, json: bool) -> anyhow::Result<()> {
    let (matches, stats) = if naive {
        NaiveMatcher::new().search_with_stats(pattern, text)
    } else {
        let options = MatcherOptions::new().galil_rule(!no_memo);
        BoyerMooreMatcher::with_options(options).search_with_stats(pattern, text)
    };
    info!(
        matches = matches.len(),
        comparisons = stats.comparisons,
        alignments = stats.alignments,
        "Search finished"
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if json {
        let value = serde_json::json!({
            "pattern": String::from_utf8_lossy(pattern),
            "matches": matches,
            "stats": stats,
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&value).map_err(GalilError::from)?)?;
    } else {
        for offset in &matches {
            writeln!(out, "{offset}")?;
        }
    }
    out.flush()?;
    Ok(())
}

fn gen_fixture(output: &Path, options: &GeneratorOptions) -> anyhow::Result<()> {
    let records = fixture::generate_fixture(options).map_err(GalilError::from)?;
    fixture::write_fixture_file(output, &records)
        .map_err(GalilError::from)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(records = records.len(), path = %output.display(), "Fixture written");
    Ok(())
}
