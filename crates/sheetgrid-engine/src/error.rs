//! Error types for the SheetGrid engine.

use thiserror::Error;

/// Errors raised by the cell store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SheetError {
    #[error("Cell {row},{col} is outside the {rows}x{cols} sheet")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("A {rows}x{cols} sheet exceeds {max} cells", max = crate::engine::MAX_CELLS)]
    TooLarge { rows: usize, cols: usize },

    #[error("Invalid cell reference: {0}")]
    InvalidCellRef(String),
}

/// Failures inside formula processing.
///
/// These never reach callers of [`crate::engine::evaluate`]; they are
/// converted into [`crate::engine::Evaluation::Error`] at that boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormulaError {
    #[error("Malformed aggregate call: {0}")]
    MalformedAggregate(String),
}

pub type Result<T> = std::result::Result<T, SheetError>;
