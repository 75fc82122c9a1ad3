//! Result rendering services.
//!
//! Turns a [`ResultGrid`] into the declarative [`GridView`] shared by all
//! presentation backends, and owns the mount/clear lifecycle of the result
//! panel.

use super::errors::FileResult;
use super::models::{BLANK_CELL, GridRowView, GridView, RenderedCell, ResultGrid};
use std::io::Write;

/// Builds grid views with 1-based numeric row and column headers.
///
/// # Examples
///
/// ```
/// use plantdesk::domain::{GridRenderer, ResultGrid};
/// use serde_json::json;
///
/// let grid = ResultGrid::new(vec![vec![json!("InOut"), json!(null)]]);
/// let view = GridRenderer::build(&grid);
///
/// assert_eq!(view.column_headers, vec!["1", "2"]);
/// assert_eq!(view.rows[0].header, "1");
/// assert!(view.rows[0].cells[0].is_active());
/// assert_eq!(view.rows[0].cells[1].text, " ");
/// ```
pub struct GridRenderer;

impl GridRenderer {
    pub fn build(grid: &ResultGrid) -> GridView {
        let cols = grid.col_count();
        let column_headers = (0..cols).map(Self::header_label).collect();

        let rows = (0..grid.row_count())
            .map(|row| GridRowView {
                header: Self::header_label(row),
                cells: (0..cols).map(|col| Self::build_cell(grid, row, col)).collect(),
            })
            .collect();

        GridView { column_headers, rows }
    }

    pub fn header_label(index: usize) -> String {
        (index + 1).to_string()
    }

    fn build_cell(grid: &ResultGrid, row: usize, col: usize) -> RenderedCell {
        match grid.get(row, col) {
            Some(value) => RenderedCell {
                row,
                col,
                present: true,
                text: ResultGrid::cell_text(value),
            },
            None => RenderedCell {
                row,
                col,
                present: false,
                text: BLANK_CELL.to_string(),
            },
        }
    }
}

/// The result area: at most one mounted view, plus its visibility.
#[derive(Debug, Default)]
pub struct ResultPanel {
    view: Option<GridView>,
    visible: bool,
}

impl ResultPanel {
    /// Mounts a fresh view of `grid`, replacing whatever was mounted before.
    pub fn render(&mut self, grid: &ResultGrid) {
        self.view = Some(GridRenderer::build(grid));
        self.visible = true;
    }

    /// Unmounts the view and hides the panel. Safe to call when already empty.
    pub fn clear(&mut self) {
        self.view = None;
        self.visible = false;
    }

    pub fn view(&self) -> Option<&GridView> {
        self.view.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Writes result grids as CSV, one record per row.
pub struct CsvExporter;

impl CsvExporter {
    /// Absent cells become empty fields; short rows are padded to the grid width.
    pub fn write_grid<W: Write>(grid: &ResultGrid, writer: W) -> FileResult<()> {
        let mut csv_writer = csv::WriterBuilder::new().flexible(false).from_writer(writer);
        let cols = grid.col_count();

        for row in 0..grid.row_count() {
            let record: Vec<String> = (0..cols)
                .map(|col| grid.get(row, col).map(ResultGrid::cell_text).unwrap_or_default())
                .collect();
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn plant_grid() -> ResultGrid {
        ResultGrid::new(vec![
            vec![json!(null), json!(null), json!("InOut")],
            vec![json!(null), json!("Robot"), json!("Press")],
        ])
    }

    #[test]
    fn test_dimensions_match_grid() {
        for (r, c) in [(1, 1), (2, 3), (5, 5), (7, 2)] {
            let grid = ResultGrid::new(vec![vec![json!(0); c]; r]);
            let view = GridRenderer::build(&grid);
            assert_eq!(view.data_row_count(), r);
            assert_eq!(view.data_col_count(), c);
            assert!(view.rows.iter().all(|row| row.cells.len() == c));
        }
    }

    #[test]
    fn test_headers_are_one_based() {
        let view = GridRenderer::build(&plant_grid());
        assert_eq!(view.column_headers, vec!["1", "2", "3"]);
        let row_headers: Vec<_> = view.rows.iter().map(|r| r.header.as_str()).collect();
        assert_eq!(row_headers, vec!["1", "2"]);
    }

    #[test]
    fn test_null_cells_are_blank_and_inactive() {
        let view = GridRenderer::build(&plant_grid());

        let empty = view.cell(0, 0).unwrap();
        assert!(!empty.present);
        assert!(!empty.is_active());
        assert_eq!(empty.text, BLANK_CELL);

        let station = view.cell(1, 2).unwrap();
        assert!(station.is_active());
        assert_eq!(station.text, "Press");
        assert_eq!((station.row, station.col), (1, 2));
    }

    #[test]
    fn test_numeric_cells() {
        let grid = ResultGrid::new(vec![vec![json!(1), json!(null)], vec![json!(3), json!(4)]]);
        let view = GridRenderer::build(&grid);
        assert_eq!(view.cell(0, 0).unwrap().text, "1");
        assert!(!view.cell(0, 1).unwrap().is_active());
        assert_eq!(view.cell(1, 1).unwrap().text, "4");
    }

    #[test]
    fn test_ragged_rows_are_padded_with_blanks() {
        let grid = ResultGrid::new(vec![vec![json!("a")], vec![json!("b"), json!("c")]]);
        let view = GridRenderer::build(&grid);
        let padded = view.cell(0, 1).unwrap();
        assert!(!padded.present);
        assert_eq!(padded.text, BLANK_CELL);
    }

    #[test]
    fn test_empty_grid_has_no_rows() {
        let view = GridRenderer::build(&ResultGrid::default());
        assert_eq!(view, GridView::default());
    }

    #[test]
    fn test_render_replaces_previous_view() {
        let mut panel = ResultPanel::default();
        panel.render(&plant_grid());
        let small = ResultGrid::new(vec![vec![json!("x")]]);
        panel.render(&small);

        let view = panel.view().unwrap();
        assert_eq!(view.data_row_count(), 1);
        assert_eq!(view.data_col_count(), 1);
        assert!(panel.is_visible());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut panel = ResultPanel::default();
        panel.clear();
        assert!(panel.view().is_none());
        assert!(!panel.is_visible());

        panel.render(&plant_grid());
        panel.clear();
        panel.clear();
        assert!(panel.view().is_none());
        assert!(!panel.is_visible());
    }

    #[test]
    fn test_clear_then_render_matches_fresh_render() {
        let mut fresh = ResultPanel::default();
        fresh.render(&plant_grid());

        let mut reused = ResultPanel::default();
        reused.render(&ResultGrid::new(vec![vec![json!(9); 4]; 4]));
        reused.clear();
        reused.render(&plant_grid());

        assert_eq!(fresh.view(), reused.view());
        assert_eq!(fresh.is_visible(), reused.is_visible());
    }

    #[test]
    fn test_column_widths() {
        let view = GridRenderer::build(&plant_grid());
        assert_eq!(view.column_widths(), vec![1, 5, 5]);
        assert_eq!(view.index_width(), 1);
    }

    #[test]
    fn test_csv_export() {
        let mut out = Vec::new();
        CsvExporter::write_grid(&plant_grid(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), ",,InOut\n,Robot,Press\n");
    }
}
