use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::{SubmitError, SubmitResult};

/// Placeholder text for absent cells, so a cell never collapses to zero width.
pub const BLANK_CELL: &str = " ";

/// Two-dimensional result returned by the computation service.
///
/// Cells are raw JSON values; `null` marks an absent cell. Rows are expected
/// to have equal length but this is not enforced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultGrid {
    rows: Vec<Vec<Value>>,
}

impl ResultGrid {
    pub fn new(rows: Vec<Vec<Value>>) -> Self {
        Self { rows }
    }

    /// Decodes a response body, rejecting anything that is not an array of arrays.
    pub fn from_json(body: &str) -> SubmitResult<Self> {
        serde_json::from_str::<ResultGrid>(body)
            .map_err(|e| SubmitError::MalformedResponse(e.to_string()))
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row.
    pub fn col_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Returns the cell at `(row, col)`, or `None` if it is null or missing.
    pub fn get(&self, row: usize, col: usize) -> Option<&Value> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .filter(|v| !v.is_null())
    }

    /// Textual form of a present cell: strings unquoted, everything else as compact JSON.
    pub fn cell_text(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// View-only projection of one grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCell {
    pub row: usize,
    pub col: usize,
    pub present: bool,
    pub text: String,
}

impl RenderedCell {
    /// Present cells are marked active for styling.
    pub fn is_active(&self) -> bool {
        self.present
    }

    /// Stable element identifier, column first.
    pub fn element_id(&self) -> String {
        format!("plant-grid-{}-{}", self.col, self.row)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRowView {
    pub header: String,
    pub cells: Vec<RenderedCell>,
}

/// Declarative table built from a [`ResultGrid`], consumed by every presentation backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridView {
    pub column_headers: Vec<String>,
    pub rows: Vec<GridRowView>,
}

impl GridView {
    pub fn data_row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn data_col_count(&self) -> usize {
        self.column_headers.len()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&RenderedCell> {
        self.rows.get(row).and_then(|r| r.cells.get(col))
    }

    /// Display width of each data column, capped for the terminal pane.
    pub fn column_widths(&self) -> Vec<usize> {
        self.natural_column_widths()
            .into_iter()
            .map(|w| w.clamp(1, 40))
            .collect()
    }

    /// Width of the longest text in each data column, header included.
    pub fn natural_column_widths(&self) -> Vec<usize> {
        self.column_headers
            .iter()
            .enumerate()
            .map(|(col, header)| {
                self.rows
                    .iter()
                    .filter_map(|r| r.cells.get(col))
                    .map(|c| c.text.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(1)
            })
            .collect()
    }

    /// Width of the row-header column.
    pub fn index_width(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.header.chars().count())
            .max()
            .unwrap_or(0)
            .max(1)
    }
}

/// A successful response: the parsed grid and the body it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    pub grid: ResultGrid,
    pub raw: String,
}

impl RunResult {
    pub fn from_body(body: String) -> SubmitResult<Self> {
        let grid = ResultGrid::from_json(&body)?;
        Ok(Self { grid, raw: body })
    }
}
