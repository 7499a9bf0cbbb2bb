use sheetgrid_engine::engine::{CellRef, Evaluation, evaluate, is_formula};

use super::Document;

impl Document {
    /// Raw text of a cell, `None` out of range.
    pub fn raw(&self, cell: &CellRef) -> Option<&str> {
        self.sheet.get(cell.row, cell.col)
    }

    pub(crate) fn selected_raw(&self) -> &str {
        self.raw(&self.selection).unwrap_or_default()
    }

    /// Evaluate a cell for display. Literals come back as [`Evaluation::Text`].
    pub fn evaluate_cell(&self, cell: &CellRef) -> Option<Evaluation> {
        let raw = self.raw(cell)?;
        if is_formula(raw) {
            Some(evaluate(raw, &self.sheet))
        } else {
            Some(Evaluation::Text(raw.to_string()))
        }
    }

    /// What the grid shows for a cell.
    pub fn display_value(&self, row: usize, col: usize) -> String {
        self.evaluate_cell(&CellRef::new(row, col))
            .map(|e| e.to_string())
            .unwrap_or_default()
    }

    /// Formula text shown on hover for formula cells.
    pub fn tooltip(&self, row: usize, col: usize) -> Option<&str> {
        self.sheet.get(row, col).filter(|raw| is_formula(raw))
    }

    /// Formula bar contents: the selected cell's raw text.
    pub fn formula_bar_text(&self) -> &str {
        self.selected_raw()
    }

    /// Status bar label for the selection, e.g. `B3`.
    pub fn status_label(&self) -> String {
        self.selection.to_string()
    }

    /// Column header letters.
    pub fn column_label(col: usize) -> String {
        CellRef::col_to_letters(col)
    }

    pub fn column_labels(&self) -> Vec<String> {
        (0..self.cols()).map(Self::column_label).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClickToEdit;

    fn doc_with(cells: &[(&str, &str)]) -> Document {
        let mut d = Document::new(10, 5, ClickToEdit::Reclick);
        for (name, text) in cells {
            let cell = CellRef::parse(name).unwrap();
            d.set_cell(&cell, text).unwrap();
        }
        d
    }

    #[test]
    fn test_display_value_literals_and_formulas() {
        let d = doc_with(&[("A1", "5"), ("B1", "=A1*2"), ("C1", "hello"), ("D1", "=sum(1")]);
        assert_eq!(d.display_value(0, 0), "5");
        assert_eq!(d.display_value(0, 1), "10");
        assert_eq!(d.display_value(0, 2), "hello");
        assert_eq!(d.display_value(0, 3), "#ERR");
        assert_eq!(d.display_value(0, 4), "");
        assert_eq!(d.display_value(99, 0), "");
    }

    #[test]
    fn test_leading_space_formula_is_passed_through() {
        // Shown as a formula cell, but the engine only strips an unindented '='.
        let d = doc_with(&[("A1", " =1+2")]);
        assert_eq!(d.tooltip(0, 0), Some(" =1+2"));
        assert_eq!(d.display_value(0, 0), " =1+2");
    }

    #[test]
    fn test_tooltip_only_for_formulas() {
        let d = doc_with(&[("A1", "5"), ("B1", "=A1")]);
        assert_eq!(d.tooltip(0, 0), None);
        assert_eq!(d.tooltip(0, 1), Some("=A1"));
    }

    #[test]
    fn test_formula_bar_and_status() {
        let mut d = doc_with(&[("B3", "=1+1")]);
        assert_eq!(d.status_label(), "A1");
        assert_eq!(d.formula_bar_text(), "");
        d.select_cell(2, 1);
        assert_eq!(d.status_label(), "B3");
        assert_eq!(d.formula_bar_text(), "=1+1");
    }

    #[test]
    fn test_column_labels() {
        let d = Document::new(1, 28, ClickToEdit::Reclick);
        let labels = d.column_labels();
        assert_eq!(labels[0], "A");
        assert_eq!(labels[25], "Z");
        assert_eq!(labels[26], "AA");
        assert_eq!(labels.len(), 28);
    }
}
