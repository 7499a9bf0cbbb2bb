//! sheetgrid_engine - Cell store + formula evaluation.

pub mod engine;
pub mod error;

pub use error::{FormulaError, Result, SheetError};
