use std::collections::TryReserveError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DpError {
    #[error(
        "coordinate (column {column}, row {row}) exceeds the matrix of {columns} columns and {rows} rows"
    )]
    CoordinateOutOfBounds {
        column: usize,
        row: usize,
        columns: usize,
        rows: usize,
    },

    #[error("failed to allocate matrix storage for {requested} cells: {source}")]
    Allocation {
        requested: usize,
        #[source]
        source: TryReserveError,
    },

    #[error("invalid scoring parameters: {msg}")]
    InvalidScoring { msg: String },

    #[error("band [{lower}, {upper}] does not intersect the alignment matrix")]
    InvalidBand { lower: i64, upper: i64 },

    #[error("batch of {size} sequence pairs exceeds the {lanes} available simd lanes")]
    BatchSize { size: usize, lanes: usize },

    #[error("score {value} overflows the scalar type of the simd vector")]
    ScoreOverflow { value: i64 },

    #[error(
        "cigar consumes {consumed1} and {consumed2} symbols but the sequences have {len1} and {len2}"
    )]
    CigarLength {
        consumed1: usize,
        consumed2: usize,
        len1: usize,
        len2: usize,
    },
}

pub type DpResult<T> = Result<T, DpError>;

/// Grow `buffer` so that it can hold `len` elements, reporting allocation failure.
pub(crate) fn try_reserve_total<T>(buffer: &mut Vec<T>, len: usize) -> DpResult<()> {
    let additional = len.saturating_sub(buffer.len());
    buffer
        .try_reserve(additional)
        .map_err(|source| DpError::Allocation {
            requested: len,
            source,
        })
}
