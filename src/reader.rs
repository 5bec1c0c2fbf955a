use std::io::{self, BufRead};
use std::num::ParseIntError;

use log::debug;
use thiserror::Error;

use crate::PointSetMut;

/// The error type returned when a point set cannot be read from text.
///
/// Every variant describes a structural problem of the input. Reading stops at the first
/// problem; no partially filled point set is ever returned. Row indices are zero-based and count
/// data rows only, the header is not a row.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input ended before the header line.
    #[error("can't find header line")]
    MissingHeader,

    /// The header line did not consist of exactly two tokens.
    #[error("invalid header: expected 2 tokens, found {found}")]
    InvalidHeader {
        /// The number of tokens found on the header line.
        found: usize,
    },

    /// A header token was not a non-negative integer.
    #[error("invalid header value {token:?}")]
    InvalidCount {
        /// The offending token.
        token: String,
        /// The underlying integer parse error.
        #[source]
        source: ParseIntError,
    },

    /// The header describes more coordinates than can be addressed.
    #[error("point set of {size} points with dimension {dimension} is too large")]
    ShapeOverflow {
        /// The number of points given by the header.
        size: usize,
        /// The dimension given by the header.
        dimension: usize,
    },

    /// The input ended before all rows announced by the header were read.
    #[error("can't find row {row}")]
    MissingRow {
        /// Index of the first missing row.
        row: usize,
    },

    /// A row did not contain exactly one token per dimension.
    #[error("expected {expected} coordinates instead of {found} at row {row}")]
    DimensionMismatch {
        /// Index of the offending row.
        row: usize,
        /// The dimension given by the header.
        expected: usize,
        /// The number of tokens found on the row.
        found: usize,
    },

    /// A coordinate token was not a finite real number.
    #[error("invalid coordinate {token:?} at row {row}, column {column}")]
    InvalidCoordinate {
        /// Index of the offending row.
        row: usize,
        /// Index of the coordinate within its row.
        column: usize,
        /// The offending token.
        token: String,
    },

    /// Reading from the underlying stream failed.
    #[error("failed to read point set: {0}")]
    Io(#[from] io::Error),
}

/// Reads a point set from a line oriented text stream.
///
/// The first line holds two integers: the number of points `n`, then the dimension `d`. It is
/// followed by `n` lines with `d` real numbers each. Tokens are separated by whitespace. Numbers
/// use `.` as decimal separator regardless of the system locale. Content after the last row is
/// not read.
///
/// For example, the three two dimensional points `(0, 0)`, `(2, 3)` and `(4, 5)` are stored as:
/// ```text
/// 3 2
/// 0 0
/// 2 3
/// 4 5
/// ```
///
/// The stream must be UTF-8 encoded. Invalid UTF-8 is reported as [ParseError::Io].
///
/// # Example
/// ```
/// use miniball_points::{read_point_set, ArrayPointSet, ParseError, PointSet};
///
/// fn main() -> Result<(), ParseError> {
///     let input = "2 3\n1.5 0 -2\n0.25 1e3 7\n";
///     let points: ArrayPointSet = read_point_set(input.as_bytes())?;
///
///     assert_eq!(points.size(), 2);
///     assert_eq!(points.dimension(), 3);
///     assert_eq!(points.point(1), &[0.25, 1000.0, 7.0]);
///     Ok(())
/// }
/// ```
pub fn read_point_set<P, R>(reader: R) -> Result<P, ParseError>
where
    P: PointSetMut,
    R: BufRead,
{
    let mut lines = reader.lines();

    let header = lines.next().ok_or(ParseError::MissingHeader)??;
    let (size, dimension) = parse_header(&header)?;
    debug!("Reading {} points of dimension {}", size, dimension);

    // The header alone does not justify an allocation: rows are collected first and the point
    // set is only created once all of them have been read.
    let mut coordinates: Vec<P::Scalar> = Vec::new();

    for row in 0..size {
        let line = lines.next().ok_or(ParseError::MissingRow { row })??;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != dimension {
            return Err(ParseError::DimensionMismatch {
                row,
                expected: dimension,
                found: tokens.len(),
            });
        }

        for (column, token) in tokens.into_iter().enumerate() {
            let value = parse_coordinate(token).ok_or_else(|| ParseError::InvalidCoordinate {
                row,
                column,
                token: token.to_owned(),
            })?;
            coordinates.push(value);
        }
    }

    let mut points = P::with_shape(dimension, size);
    if dimension > 0 {
        for (index, value) in coordinates.into_iter().enumerate() {
            points.set_coord(index / dimension, index % dimension, value);
        }
    }
    Ok(points)
}

/// Parses a point set from a string. See [read_point_set] for the expected format.
pub fn parse_point_set<P: PointSetMut>(input: &str) -> Result<P, ParseError> {
    read_point_set(input.as_bytes())
}

fn parse_header(line: &str) -> Result<(usize, usize), ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [size, dimension] = tokens.as_slice() else {
        return Err(ParseError::InvalidHeader {
            found: tokens.len(),
        });
    };
    let size = parse_count(size)?;
    let dimension = parse_count(dimension)?;

    if size.checked_mul(dimension).is_none() {
        return Err(ParseError::ShapeOverflow { size, dimension });
    }
    Ok((size, dimension))
}

fn parse_count(token: &str) -> Result<usize, ParseError> {
    token
        .parse()
        .map_err(|source| ParseError::InvalidCount {
            token: token.to_owned(),
            source,
        })
}

fn parse_coordinate<S: crate::Coordinate>(token: &str) -> Option<S> {
    token.parse::<S>().ok().filter(|value| value.is_finite())
}
