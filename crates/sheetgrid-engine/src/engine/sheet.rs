//! Cell storage for the spreadsheet grid.
//!
//! - [`Sheet`] - Fixed-size dense grid of raw cell text
//! - [`CellSource`] - Read-only view the formula engine evaluates against

use super::cell_ref::CellRef;
use crate::error::{Result, SheetError};

/// Read access to raw cell content.
///
/// The formula engine only ever needs dimensions and raw text; anything that
/// can answer these can be evaluated against.
pub trait CellSource {
    fn rows(&self) -> usize;
    fn cols(&self) -> usize;

    /// Raw text at a coordinate, `None` when out of range.
    fn raw(&self, row: usize, col: usize) -> Option<&str>;

    fn raw_at(&self, cell: &CellRef) -> Option<&str> {
        self.raw(cell.row, cell.col)
    }
}

/// Largest number of cells a sheet may hold.
pub const MAX_CELLS: usize = 1_000_000;

/// A `rows x cols` grid of raw cell text, stored row-major.
///
/// Every in-range cell always holds a string; blank cells hold `""`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sheet {
    rows: usize,
    cols: usize,
    cells: Vec<String>,
}

impl Sheet {
    /// Allocate a blank sheet.
    ///
    /// # Panics
    ///
    /// Panics if `rows * cols` exceeds [`MAX_CELLS`]; use [`Sheet::try_new`]
    /// for dimensions that come from outside the program.
    pub fn new(rows: usize, cols: usize) -> Sheet {
        match Self::try_new(rows, cols) {
            Ok(sheet) => sheet,
            Err(e) => panic!("{e}"),
        }
    }

    /// Allocate a blank sheet, rejecting grids larger than [`MAX_CELLS`].
    pub fn try_new(rows: usize, cols: usize) -> Result<Sheet> {
        let len = rows
            .checked_mul(cols)
            .filter(|n| *n <= MAX_CELLS)
            .ok_or(SheetError::TooLarge { rows, cols })?;
        Ok(Sheet {
            rows,
            cols,
            cells: vec![String::new(); len],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    fn index_or_err(&self, row: usize, col: usize) -> Result<usize> {
        self.index(row, col).ok_or(SheetError::OutOfBounds {
            row,
            col,
            rows: self.rows,
            cols: self.cols,
        })
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.index(row, col).map(|i| self.cells[i].as_str())
    }

    /// Overwrite a cell. Content is not validated; malformed formulas only
    /// show up when evaluated.
    pub fn set(&mut self, row: usize, col: usize, text: impl Into<String>) -> Result<()> {
        let i = self.index_or_err(row, col)?;
        self.cells[i] = text.into();
        Ok(())
    }

    /// Reset a cell to blank.
    pub fn clear(&mut self, row: usize, col: usize) -> Result<()> {
        let i = self.index_or_err(row, col)?;
        self.cells[i].clear();
        Ok(())
    }

    /// Populated cells in row-major order.
    pub fn iter_non_blank(&self) -> impl Iterator<Item = (CellRef, &str)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, text)| !text.is_empty())
            .map(move |(i, text)| (CellRef::new(i / cols, i % cols), text.as_str()))
    }
}

impl CellSource for Sheet {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn raw(&self, row: usize, col: usize) -> Option<&str> {
        self.get(row, col)
    }
}
