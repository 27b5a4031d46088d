// Copyright (c) 2025 Galil BM Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Fixture file codec.
//!
//! A fixture is a sequence of `(pattern, text)` records. Each field is stored
//! as its decimal ASCII length, a NUL byte, the raw bytes, and a closing NUL:
//!
//! ```text
//! 3\0ana\06\0banana\0
//! ```
//!
//! Reading stops cleanly at end of input or at a record whose pattern length
//! is zero. Anything else that does not follow the layout is an error.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use rand::prelude::*;

use crate::error::fixture::{FixtureError, FixtureField};

/// Longest accepted length field, in digits.
const MAX_LENGTH_DIGITS: usize = 20;

/// Result type for fixture operations.
pub type FixtureResult<T> = Result<T, FixtureError>;

/// One search input: a pattern and the text to search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureRecord {
    /// Pattern bytes, never empty in a well-formed fixture
    pub pattern: Vec<u8>,
    /// Text bytes, possibly empty
    pub text: Vec<u8>,
}

impl FixtureRecord {
    /// Creates a record from anything byte-like.
    pub fn new(pattern: impl Into<Vec<u8>>, text: impl Into<Vec<u8>>) -> Self {
        Self {
            pattern: pattern.into(),
            text: text.into(),
        }
    }
}

/// Streaming fixture decoder.
///
/// Yields records until the end marker, then `None`. After an error the
/// reader is exhausted.
#[derive(Debug)]
pub struct FixtureReader<R> {
    reader: R,
    record: usize,
    max_len: usize,
    finished: bool,
}

impl<R: BufRead> FixtureReader<R> {
    /// Creates a reader over `reader` rejecting fields longer than `max_len` bytes.
    pub fn new(reader: R, max_len: usize) -> Self {
        Self {
            reader,
            record: 0,
            max_len,
            finished: false,
        }
    }

    /// Number of records decoded so far.
    pub fn records_read(&self) -> usize {
        self.record
    }

    /// Decodes the next record, `Ok(None)` at the end of the stream.
    pub fn read_record(&mut self) -> FixtureResult<Option<FixtureRecord>> {
        if self.finished {
            return Ok(None);
        }

        let result = self.decode_record();
        match &result {
            Ok(Some(_)) => self.record += 1,
            Ok(None) | Err(_) => self.finished = true,
        }
        result
    }

    fn decode_record(&mut self) -> FixtureResult<Option<FixtureRecord>> {
        let Some(pattern_len) = self.read_length(FixtureField::Pattern)? else {
            return Ok(None);
        };
        if pattern_len == 0 {
            return Ok(None);
        }
        let pattern = self.read_field(FixtureField::Pattern, pattern_len)?;

        let text_len = match self.read_length(FixtureField::Text)? {
            Some(len) => len,
            None => {
                return Err(FixtureError::Truncated {
                    record: self.record,
                    field: FixtureField::Text,
                    expected: 1,
                    actual: 0,
                })
            }
        };
        let text = self.read_field(FixtureField::Text, text_len)?;

        Ok(Some(FixtureRecord { pattern, text }))
    }

    /// Reads a NUL-terminated decimal length. `None` when the input ends before
    /// anything but whitespace.
    fn read_length(&mut self, field: FixtureField) -> FixtureResult<Option<usize>> {
        let mut raw = Vec::new();
        (&mut self.reader)
            .take(MAX_LENGTH_DIGITS as u64 + 1)
            .read_until(0, &mut raw)?;

        let terminated = raw.last() == Some(&0);
        if terminated {
            raw.pop();
        }
        let digits = raw.trim_ascii();

        if !terminated {
            if digits.is_empty() && raw.len() <= MAX_LENGTH_DIGITS {
                return Ok(None);
            }
            return Err(self.invalid_length(field, &raw));
        }
        if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
            return Err(self.invalid_length(field, &raw));
        }

        let len = std::str::from_utf8(digits)
            .ok()
            .and_then(|digits| digits.parse::<usize>().ok())
            .ok_or_else(|| self.invalid_length(field, &raw))?;

        if len > self.max_len {
            return Err(FixtureError::LengthTooLarge {
                record: self.record,
                field,
                len,
                max: self.max_len,
            });
        }
        Ok(Some(len))
    }

    fn read_field(&mut self, field: FixtureField, len: usize) -> FixtureResult<Vec<u8>> {
        let mut data = Vec::with_capacity(len);
        (&mut self.reader).take(len as u64).read_to_end(&mut data)?;
        if data.len() != len {
            return Err(FixtureError::Truncated {
                record: self.record,
                field,
                expected: len,
                actual: data.len(),
            });
        }

        let mut terminator = [0u8; 1];
        match self.reader.read_exact(&mut terminator) {
            Ok(()) if terminator[0] == 0 => Ok(data),
            Ok(()) => Err(FixtureError::MissingTerminator {
                record: self.record,
                field,
            }),
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => {
                Err(FixtureError::MissingTerminator {
                    record: self.record,
                    field,
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    fn invalid_length(&self, field: FixtureField, raw: &[u8]) -> FixtureError {
        FixtureError::InvalidLength {
            record: self.record,
            field,
            value: String::from_utf8_lossy(raw).into_owned(),
        }
    }
}

impl<R: BufRead> Iterator for FixtureReader<R> {
    type Item = FixtureResult<FixtureRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}

/// Opens a fixture file for reading.
pub fn open_fixture<P: AsRef<Path>>(
    path: P,
    max_len: usize,
) -> FixtureResult<FixtureReader<BufReader<File>>> {
    let file = File::open(path.as_ref())?;
    Ok(FixtureReader::new(BufReader::new(file), max_len))
}

/// Fixture encoder.
#[derive(Debug)]
pub struct FixtureWriter<W: Write> {
    writer: W,
    records: usize,
}

impl<W: Write> FixtureWriter<W> {
    /// Creates a writer over `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer, records: 0 }
    }

    /// Encodes one record.
    ///
    /// # Errors
    ///
    /// Fails for an empty pattern, which readers would take as the end of the
    /// stream.
    pub fn write_record(&mut self, record: &FixtureRecord) -> FixtureResult<()> {
        if record.pattern.is_empty() {
            return Err(FixtureError::Unencodable {
                record: self.records,
                message: "an empty pattern marks the end of a fixture".to_string(),
            });
        }

        self.write_field(&record.pattern)?;
        self.write_field(&record.text)?;
        self.records += 1;
        Ok(())
    }

    /// Number of records written so far.
    pub fn records_written(&self) -> usize {
        self.records
    }

    /// Flushes and returns the underlying writer.
    pub fn finish(mut self) -> FixtureResult<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write_field(&mut self, bytes: &[u8]) -> io::Result<()> {
        write!(self.writer, "{}", bytes.len())?;
        self.writer.write_all(&[0])?;
        self.writer.write_all(bytes)?;
        self.writer.write_all(&[0])
    }
}

/// Writes `records` to a new fixture file at `path`.
pub fn write_fixture_file<P: AsRef<Path>>(path: P, records: &[FixtureRecord]) -> FixtureResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = FixtureWriter::new(BufWriter::new(file));
    for record in records {
        writer.write_record(record)?;
    }
    writer.finish()?;
    Ok(())
}

/// Parameters for random fixture generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorOptions {
    /// Number of records
    pub records: usize,
    /// Length of every text
    pub text_len: usize,
    /// Length of every pattern
    pub pattern_len: usize,
    /// Bytes to draw from
    pub alphabet: Vec<u8>,
    /// Probability that the pattern is copied into the text at a random offset
    pub plant_probability: f64,
    /// Random seed for reproducibility
    pub seed: u64,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            records: 100,
            text_len: 10_000,
            pattern_len: 8,
            alphabet: b"acgt".to_vec(),
            plant_probability: 0.5,
            seed: 42,
        }
    }
}

/// Generates random fixture records. The same options always give the same
/// records.
pub fn generate_fixture(options: &GeneratorOptions) -> FixtureResult<Vec<FixtureRecord>> {
    if options.pattern_len == 0 {
        return Err(FixtureError::Unencodable {
            record: 0,
            message: "pattern length must be at least 1".to_string(),
        });
    }
    if options.alphabet.is_empty() {
        return Err(FixtureError::Unencodable {
            record: 0,
            message: "alphabet must not be empty".to_string(),
        });
    }

    let mut rng = StdRng::seed_from_u64(options.seed);
    let plant_probability = options.plant_probability.clamp(0.0, 1.0);
    let draw = |rng: &mut StdRng, len: usize| -> Vec<u8> {
        (0..len)
            .map(|_| options.alphabet[rng.gen_range(0..options.alphabet.len())])
            .collect()
    };

    let mut records = Vec::with_capacity(options.records);
    for _ in 0..options.records {
        let pattern = draw(&mut rng, options.pattern_len);
        let mut text = draw(&mut rng, options.text_len);

        if options.text_len >= options.pattern_len && rng.gen_bool(plant_probability) {
            let offset = rng.gen_range(0..=options.text_len - options.pattern_len);
            text[offset..offset + options.pattern_len].copy_from_slice(&pattern);
        }
        records.push(FixtureRecord { pattern, text });
    }

    tracing::debug!(
        records = records.len(),
        text_len = options.text_len,
        pattern_len = options.pattern_len,
        seed = options.seed,
        "Generated fixture records"
    );
    Ok(records)
}
