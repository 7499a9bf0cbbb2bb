use log::debug;
use sheetgrid_engine::engine::{CellRef, Sheet};

use crate::config::{ClickToEdit, Config};
use crate::error::Result;

/// The selected cell (0-indexed).
pub type Selection = CellRef;

/// UI-agnostic document state for the spreadsheet.
///
/// Owns the sheet and everything a front end needs to drive it; front ends
/// hold a `Document` and call into it rather than sharing global state.
#[derive(Clone, Debug)]
pub struct Document {
    /// Raw cell content
    pub(crate) sheet: Sheet,
    /// Currently selected cell
    pub(crate) selection: Selection,
    /// Whether the selected cell is being edited in place
    pub(crate) editing: bool,
    /// In-place editor text while editing
    pub(crate) edit_buffer: String,
    /// What a click on the selected cell does
    pub(crate) click_to_edit: ClickToEdit,
}

impl Document {
    /// Create a blank document; `A1` is selected and nothing is being edited.
    ///
    /// Panics on grids larger than [`sheetgrid_engine::engine::MAX_CELLS`],
    /// like [`Sheet::new`]. [`Document::from_config`] reports an error instead.
    pub fn new(rows: usize, cols: usize, click_to_edit: ClickToEdit) -> Self {
        Self::with_sheet(Sheet::new(rows, cols), click_to_edit)
    }

    fn with_sheet(sheet: Sheet, click_to_edit: ClickToEdit) -> Self {
        Document {
            sheet,
            selection: CellRef::new(0, 0),
            editing: false,
            edit_buffer: String::new(),
            click_to_edit,
        }
    }

    /// Create a document from configuration, validating its dimensions.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let grid = &config.grid;
        debug!(
            "new {}x{} document, click-to-edit {:?}",
            grid.rows, grid.cols, grid.click_to_edit
        );
        let sheet = Sheet::try_new(grid.rows, grid.cols)?;
        Ok(Self::with_sheet(sheet, grid.click_to_edit))
    }

    pub fn sheet(&self) -> &Sheet {
        &self.sheet
    }

    pub fn rows(&self) -> usize {
        self.sheet.rows()
    }

    pub fn cols(&self) -> usize {
        self.sheet.cols()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Text of the in-place editor (meaningful while editing).
    pub fn edit_buffer(&self) -> &str {
        &self.edit_buffer
    }

    pub fn click_to_edit(&self) -> ClickToEdit {
        self.click_to_edit
    }

    /// Clamp a coordinate into the grid.
    pub(crate) fn clamp(&self, row: usize, col: usize) -> CellRef {
        CellRef::new(
            row.min(self.rows().saturating_sub(1)),
            col.min(self.cols().saturating_sub(1)),
        )
    }
}

impl Default for Document {
    fn default() -> Self {
        let config = Config::default();
        Self::new(config.grid.rows, config.grid.cols, config.grid.click_to_edit)
    }
}
