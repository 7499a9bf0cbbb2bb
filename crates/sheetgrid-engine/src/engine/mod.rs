//! Spreadsheet engine API.
//!
//! - [`Sheet`], [`CellSource`] - Raw cell storage and its read interface
//! - [`CellRef`] - Cell reference parsing (A1 notation <-> row/col indices)
//! - [`substitute_references`] - Replace references with their values
//! - [`eval_restricted`] - Allow-listed arithmetic evaluator
//! - [`evaluate`] - Turn a cell's raw text into a display result
//! - [`format_number`] - Format values for display

mod arith;
mod cell_ref;
mod eval;
mod format;
mod preprocess;
mod sheet;

pub use arith::{eval_restricted, is_allowed_char};
pub use cell_ref::CellRef;
pub use eval::{ERROR_MARKER, Evaluation, evaluate, is_formula};
pub use format::format_number;
pub use preprocess::{MAX_FORMULA_DEPTH, coerce_number, resolve_reference, substitute_references};
pub use sheet::{CellSource, MAX_CELLS, Sheet};
