//! sheetgrid-core - UI-agnostic document model + configuration.

pub mod config;
pub mod document;
pub mod error;

pub use config::{ClickToEdit, Config, GridConfig, load_config};
pub use document::{Document, Selection};
pub use error::{Result, SheetgridError};

pub use sheetgrid_engine::engine::{CellRef, Evaluation};
