//! Tests for the benchmark harness.
//!
//! These run the default driver over fixture files on disk and check the
//! resulting reports.

use proptest::prelude::*;

use crate::config::harness::{HarnessConfig, OutputFormat};
use crate::error::GalilError;
use crate::harness::fixture::{generate_fixture, open_fixture, FixtureRecord, GeneratorOptions};
use crate::harness::{
    default_driver, run_fixture_file, DriverOptions, DriverReport, BOYER_MOORE_HEADER,
    NAIVE_HEADER,
};
use crate::tests::{bytes_strategy, sample_records, TestFixture};

/// Test a full run over a hand-written fixture.
#[test]
fn test_run_sample_fixture() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture.create_fixture("test_in.txt", &sample_records());

    let mut driver = default_driver(DriverOptions::from(&HarnessConfig::default()));
    let report = run_fixture_file(&mut driver, &path, 1024).unwrap();

    assert_eq!(report.inputs, 4);
    assert_eq!(report.functions.len(), 2);
    assert_eq!(report.functions[0].header, BOYER_MOORE_HEADER);
    assert_eq!(report.functions[1].header, NAIVE_HEADER);
    for function in &report.functions {
        assert_eq!(function.calls, 4);
        assert_eq!(function.found, 3);
        assert_eq!(function.matches, 6);
        assert_eq!(function.disagreements, 0);
    }
}

/// Test that a fixture written by hand in the raw format is read as expected.
#[test]
fn test_run_raw_fixture_bytes() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture
        .create_file("raw.txt", b"2\0ab\x004\0abab\x001\0z\x003\0abc\x000\0".as_slice())
        .unwrap();

    let mut driver = default_driver(DriverOptions::default());
    let report = run_fixture_file(&mut driver, &path, 1024).unwrap();

    assert_eq!(report.inputs, 2);
    assert_eq!(report.functions[0].matches, 2);
    assert_eq!(report.functions[0].found, 1);
}

/// Test that a malformed fixture surfaces as a fixture error.
#[test]
fn test_run_malformed_fixture() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture.create_file("broken.txt", b"5\0ab".as_slice()).unwrap();

    let mut driver = default_driver(DriverOptions::default());
    let err = run_fixture_file(&mut driver, &path, 1024).unwrap_err();

    assert!(matches!(err, GalilError::Fixture(_)));
}

/// Test that a missing fixture surfaces as an IO error.
#[test]
fn test_run_missing_fixture() {
    let fixture = TestFixture::new().unwrap();
    let mut driver = default_driver(DriverOptions::default());

    let err = run_fixture_file(&mut driver, fixture.path("absent.txt"), 1024).unwrap_err();
    assert!(matches!(err, GalilError::Fixture(_)));
}

/// Test that generated fixtures never make the matchers disagree.
#[test]
fn test_generated_fixture_agreement() {
    let fixture = TestFixture::new().unwrap();
    let options = GeneratorOptions {
        records: 50,
        text_len: 500,
        pattern_len: 3,
        alphabet: b"ab".to_vec(),
        plant_probability: 0.5,
        seed: 1234,
    };
    let records = generate_fixture(&options).unwrap();
    let path = fixture.create_fixture("generated.txt", &records);

    let mut driver = default_driver(DriverOptions {
        repetitions: 2,
        verify_results: true,
    });
    let report = run_fixture_file(&mut driver, &path, 1024).unwrap();

    assert_eq!(report.inputs, 50);
    assert_eq!(report.disagreements(), 0);
    assert_eq!(report.functions[0].calls, 100);
    assert_eq!(report.functions[0].matches, report.functions[1].matches);
}

/// Test that the JSON report parses back.
#[test]
fn test_report_json_roundtrip() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture.create_fixture("json.txt", &sample_records());

    let mut driver = default_driver(DriverOptions::default());
    let report = run_fixture_file(&mut driver, &path, 1024).unwrap();
    let json = report.render(OutputFormat::Json).unwrap();
    let parsed: DriverReport = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.inputs, report.inputs);
    assert_eq!(parsed.functions.len(), 2);
    assert_eq!(parsed.functions[1].matches, 6);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    // Property: records written to disk are read back unchanged
    #[test]
    fn prop_fixture_file_agreement(
        texts in prop::collection::vec(bytes_strategy(b"ab\0\xff", 40), 1..8),
        patterns in prop::collection::vec(bytes_strategy(b"ab\0", 4), 1..8)
    ) {
        let records: Vec<FixtureRecord> = patterns
            .into_iter()
            .zip(texts)
            .filter(|(pattern, _)| !pattern.is_empty())
            .map(|(pattern, text)| FixtureRecord { pattern, text })
            .collect();

        let fixture = TestFixture::new().unwrap();
        let path = fixture.create_fixture("prop.txt", &records);
        let read: Vec<FixtureRecord> = open_fixture(&path, 1024)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        prop_assert_eq!(read, records);
    }
}
