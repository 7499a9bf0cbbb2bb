use log::trace;
use sheetgrid_engine::engine::CellRef;

use super::Document;
use crate::config::ClickToEdit;
use crate::error::Result;

impl Document {
    /// Click on a cell.
    ///
    /// Clicking the already-selected cell while not editing starts editing it
    /// under [`ClickToEdit::Reclick`]. Any other click moves the selection and
    /// leaves edit mode without committing.
    pub fn select_cell(&mut self, row: usize, col: usize) {
        let target = self.clamp(row, col);
        if target == self.selection && !self.editing && self.click_to_edit == ClickToEdit::Reclick
        {
            self.begin_edit(target.row, target.col);
            return;
        }
        self.selection = target;
        self.editing = false;
        self.edit_buffer.clear();
    }

    /// Select a cell and open it for editing (double-click / Enter).
    pub fn begin_edit(&mut self, row: usize, col: usize) {
        self.selection = self.clamp(row, col);
        self.editing = true;
        self.edit_buffer = self.selected_raw().to_string();
        trace!("editing {}", self.selection);
    }

    pub fn begin_edit_selected(&mut self) {
        let CellRef { row, col } = self.selection;
        self.begin_edit(row, col);
    }

    /// Replace the in-place editor text without committing it.
    pub fn set_edit_buffer(&mut self, text: &str) {
        if self.editing {
            self.edit_buffer = text.to_string();
        }
    }

    /// Write `text` into the selected cell and leave edit mode.
    pub fn commit_edit(&mut self, text: &str) -> Result<()> {
        let CellRef { row, col } = self.selection;
        self.sheet.set(row, col, text)?;
        self.editing = false;
        self.edit_buffer.clear();
        trace!("committed {} = {:?}", self.selection, text);
        Ok(())
    }

    /// Commit, then move one column right (Tab).
    pub fn commit_and_advance(&mut self, text: &str) -> Result<()> {
        self.commit_edit(text)?;
        self.move_selection(0, 1);
        Ok(())
    }

    /// Focus left the in-place editor: commit the buffer if still editing.
    pub fn blur(&mut self) -> Result<()> {
        if !self.editing {
            return Ok(());
        }
        let text = std::mem::take(&mut self.edit_buffer);
        self.commit_edit(&text)
    }

    /// Leave edit mode, discarding the buffer (Escape).
    pub fn cancel_edit(&mut self) {
        self.editing = false;
        self.edit_buffer.clear();
    }

    /// Arrow-key navigation, clamped at the grid edges.
    ///
    /// Ignored while editing. Returns whether the key was handled.
    pub fn move_selection(&mut self, d_row: isize, d_col: isize) -> bool {
        if self.editing {
            return false;
        }
        let CellRef { row, col } = self.selection;
        self.selection = self.clamp(
            row.saturating_add_signed(d_row),
            col.saturating_add_signed(d_col),
        );
        true
    }

    /// Formula bar typing: writes through to the selected cell immediately.
    pub fn formula_bar_input(&mut self, text: &str) -> Result<()> {
        self.commit_edit(text)
    }

    /// Overwrite any cell directly.
    pub fn set_cell(&mut self, cell: &CellRef, text: &str) -> Result<()> {
        self.sheet.set(cell.row, cell.col, text)?;
        Ok(())
    }

    pub fn clear_cell(&mut self, cell: &CellRef) -> Result<()> {
        self.sheet.clear(cell.row, cell.col)?;
        Ok(())
    }
}
