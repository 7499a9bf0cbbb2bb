//! Error types for SheetGrid core.

use thiserror::Error;

use sheetgrid_engine::SheetError;

/// Errors that can occur in the SheetGrid application
#[derive(Error, Debug)]
pub enum SheetgridError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error in {path}: {message}")]
    Config { path: String, message: String },

    #[error("Invalid grid dimensions {rows}x{cols}: {reason}")]
    InvalidDimensions {
        rows: usize,
        cols: usize,
        reason: &'static str,
    },

    #[error(transparent)]
    Sheet(#[from] SheetError),
}

pub type Result<T> = std::result::Result<T, SheetgridError>;
