//! Fixture error module.
//!
//! Errors raised while decoding or encoding the length-prefixed fixture
//! format. Every decoding error carries the zero-based index of the record
//! being read.

use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Which field of a fixture record an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureField {
    /// The pattern, first field of a record
    Pattern,
    /// The text, second field of a record
    Text,
}

impl Display for FixtureField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pattern => f.write_str("pattern"),
            Self::Text => f.write_str("text"),
        }
    }
}

/// Errors that can occur while reading or writing fixtures.
#[derive(Error, Debug)]
pub enum FixtureError {
    /// The length field is not a decimal number.
    #[error("Record {record}: invalid {field} length {value:?}")]
    InvalidLength {
        /// Index of the record
        record: usize,
        /// Field being decoded
        field: FixtureField,
        /// Raw length field, lossily decoded
        value: String,
    },

    /// The length field exceeds the configured maximum.
    #[error("Record {record}: {field} length {len} exceeds the maximum of {max}")]
    LengthTooLarge {
        /// Index of the record
        record: usize,
        /// Field being decoded
        field: FixtureField,
        /// Declared length
        len: usize,
        /// Configured maximum
        max: usize,
    },

    /// The stream ended before the declared number of bytes was read.
    #[error("Record {record}: {field} truncated, expected {expected} byte(s), got {actual}")]
    Truncated {
        /// Index of the record
        record: usize,
        /// Field being decoded
        field: FixtureField,
        /// Declared length
        expected: usize,
        /// Bytes actually available
        actual: usize,
    },

    /// The byte after the field data is not a NUL terminator.
    #[error("Record {record}: {field} is not NUL terminated")]
    MissingTerminator {
        /// Index of the record
        record: usize,
        /// Field being decoded
        field: FixtureField,
    },

    /// The record cannot be represented in the fixture format.
    #[error("Record {record}: {message}")]
    Unencodable {
        /// Index of the record
        record: usize,
        /// Reason
        message: String,
    },

    /// Underlying IO failure.
    #[error("Fixture IO error: {0}")]
    Io(#[from] std::io::Error),
}
