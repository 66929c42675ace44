//! Contains errors that may be encountered when handing buffers to the upsampler
//!
//! The kernels themselves never check anything, every precondition is verified once
//! per call at the public entry points and reported through [`UpsampleErrors`]
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

/// Common upsampling errors
#[allow(clippy::module_name_repetitions)]
pub enum UpsampleErrors {
    /// Sample width is zero
    ZeroWidth,
    /// Plane has no rows
    ZeroHeight,
    /// Padded rows for this sample width would not fit in a `usize`
    WidthTooLarge(usize),
    /// Row group size is zero or odd
    BadRowGroup(usize),
    /// Fewer input rows than the row group plus its two context rows
    MissingContextRows {
        /// Rows the call needs
        expected: usize,
        /// Rows that were given
        found: usize,
    },
    /// Fewer output rows than the row group size
    MissingOutputRows {
        /// Rows the call needs
        expected: usize,
        /// Rows that were given
        found: usize,
    },
    /// An input row is shorter than the padded input capacity
    ShortInputRow {
        /// Index of the row in the input table
        row: usize,
        /// Minimum capacity for the sample width
        expected: usize,
        /// Length of the row
        found: usize,
    },
    /// An output row is shorter than the padded output capacity
    ShortOutputRow {
        /// Index of the row in the output table
        row: usize,
        /// Minimum capacity for the sample width
        expected: usize,
        /// Length of the row
        found: usize,
    },
    /// Plane dimensions and data disagree
    BadPlane(String),
}

impl Debug for UpsampleErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self {
            Self::ZeroWidth => write!(f, "Sample width is set to zero, cannot continue"),
            Self::ZeroHeight => write!(f, "Sample plane has no rows, cannot continue"),
            Self::WidthTooLarge(width) => write!(
                f,
                "Sample width {} is too large, padded rows would overflow usize",
                width
            ),
            Self::BadRowGroup(size) => {
                write!(f, "Row group size must be even and non-zero, got {}", size)
            }
            Self::MissingContextRows { expected, found } => write!(
                f,
                "Not enough input rows, expected {} (row group plus two context rows) but found {}",
                expected, found
            ),
            Self::MissingOutputRows { expected, found } => write!(
                f,
                "Not enough output rows, expected {} but found {}",
                expected, found
            ),
            Self::ShortInputRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "Input row {} is too short, expected a padded length of at least {} but found {}",
                row, expected, found
            ),
            Self::ShortOutputRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "Output row {} is too short, expected a padded length of at least {} but found {}",
                row, expected, found
            ),
            Self::BadPlane(ref reason) => write!(f, "Bad sample plane. Reason:{}", reason),
        }
    }
}

impl Display for UpsampleErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Same messages either way
        Debug::fmt(self, f)
    }
}

impl Error for UpsampleErrors {}

#[test]
fn error_messages_name_the_row() {
    let err = UpsampleErrors::ShortOutputRow {
        row: 3,
        expected: 64,
        found: 6,
    };
    assert_eq!(
        err.to_string(),
        "Output row 3 is too short, expected a padded length of at least 64 but found 6"
    );
}
