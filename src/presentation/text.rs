use crate::domain::GridView;

/// Renders a grid view as an aligned plain-text table with a `|` after the index column.
///
/// Columns take the width of their longest cell; nothing is cut off.
pub fn render_text(view: &GridView) -> String {
    let widths = view.natural_column_widths();
    let index_width = view.index_width();
    let mut lines = Vec::with_capacity(view.rows.len() + 1);

    let mut header = format!("{:>index_width$} |", "");
    for (label, width) in view.column_headers.iter().zip(&widths) {
        header.push_str(&format!(" {}", pad(label, *width)));
    }
    lines.push(header.trim_end().to_string());

    for row in &view.rows {
        let mut line = format!("{:>index_width$} |", row.header);
        for (cell, width) in row.cells.iter().zip(&widths) {
            line.push_str(&format!(" {}", pad(&cell.text, *width)));
        }
        lines.push(line.trim_end().to_string());
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn pad(text: &str, width: usize) -> String {
    format!("{text:<width$}")
}
