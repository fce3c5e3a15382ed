//! Errors raised when grid invariants would be violated

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("Grid must have at least one row")]
    EmptyGrid,

    #[error("Grid must have at least one column")]
    ZeroWidth,

    #[error("Grid of {rows}x{cols} cells is too large")]
    TooLarge { rows: usize, cols: usize },

    #[error("Expected {expected} rows, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Row {row} has length {len}, expected {expected}")]
    RaggedRow { row: usize, len: usize, expected: usize },

    #[error("Coordinates ({row}, {col}) out of bounds for {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Cell ({row}, {col}) has negative age {value}")]
    NegativeAge { row: usize, col: usize, value: i64 },

    #[error("Cell ({row}, {col}) age {value} exceeds the maximum of {max}", max = u32::MAX)]
    AgeOverflow { row: usize, col: usize, value: i64 },
}

pub type GridResult<T> = std::result::Result<T, GridError>;
