//! Plain-text rendering of the grid.

use sheetgrid_core::Document;

const MAX_COL_WIDTH: usize = 16;

fn fit(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        format!("{text:<width$}")
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('~');
        cut
    }
}

/// Render column headers, row numbers and display values.
///
/// The selected cell is wrapped in brackets; while editing, it shows the
/// editor text instead of its value.
pub fn render_grid(doc: &Document) -> String {
    let selection = doc.selection();
    let cells: Vec<Vec<String>> = (0..doc.rows())
        .map(|row| {
            (0..doc.cols())
                .map(|col| {
                    let selected = selection.row == row && selection.col == col;
                    if selected && doc.is_editing() {
                        format!("[{}|]", doc.edit_buffer())
                    } else if selected {
                        format!("[{}]", doc.display_value(row, col))
                    } else {
                        doc.display_value(row, col)
                    }
                })
                .collect()
        })
        .collect();

    let labels = doc.column_labels();
    let widths: Vec<usize> = (0..doc.cols())
        .map(|col| {
            cells
                .iter()
                .map(|row| row[col].chars().count())
                .chain(std::iter::once(labels[col].len()))
                .max()
                .unwrap_or(1)
                .clamp(3, MAX_COL_WIDTH)
        })
        .collect();
    let gutter = doc.rows().to_string().len();

    let mut out = String::new();
    out.push_str(&" ".repeat(gutter));
    for (label, width) in labels.iter().zip(&widths) {
        out.push_str(" | ");
        out.push_str(&fit(label, *width));
    }
    out.push('\n');
    for (row, values) in cells.iter().enumerate() {
        out.push_str(&format!("{:>gutter$}", row + 1));
        for (value, width) in values.iter().zip(&widths) {
            out.push_str(" | ");
            out.push_str(&fit(value, *width));
        }
        out.push('\n');
    }
    out.push_str(&format!("{}: {}", doc.status_label(), doc.formula_bar_text()));
    out
}
