//! Console preview sink
//!
//! Prints a fixed number of leading records as a plain text table with a
//! per-cell width cap, followed by a `(rows, cols)` shape line.

use crate::output::traits::{OutputResult, TabularSink};
use crate::record::ResultSet;
use std::io::Write;

/// Default cap on rendered cell width
const DEFAULT_MAX_COL_WIDTH: usize = 40;

/// Sink that renders a head-of-table preview to stdout
pub struct ConsolePreview {
    rows: usize,
    max_col_width: usize,
}

impl ConsolePreview {
    /// Creates a preview of the first `rows` records
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            max_col_width: DEFAULT_MAX_COL_WIDTH,
        }
    }

    /// Overrides the cell width cap
    pub fn with_max_col_width(mut self, width: usize) -> Self {
        self.max_col_width = width;
        self
    }

    /// Renders the preview into any writer
    pub fn render<W: Write>(&self, results: &ResultSet, mut w: W) -> OutputResult<()> {
        let columns = results.columns();

        if !columns.is_empty() {
            // Column widths sized to header and visible cells, capped
            let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
            for record in results.iter().take(self.rows) {
                for (i, column) in columns.iter().enumerate() {
                    let cell = record.get(column).unwrap_or("");
                    widths[i] = widths[i].max(truncate(cell, self.max_col_width).chars().count());
                }
            }
            for width in &mut widths {
                *width = (*width).min(self.max_col_width);
            }

            write_row(&mut w, &columns, &widths)?;
            for record in results.iter().take(self.rows) {
                let cells: Vec<String> = columns
                    .iter()
                    .map(|column| truncate(record.get(column).unwrap_or(""), self.max_col_width))
                    .collect();
                write_row(&mut w, &cells, &widths)?;
            }
        }

        let (rows, cols) = results.shape();
        writeln!(w, "({}, {})", rows, cols)?;
        Ok(())
    }
}

impl TabularSink for ConsolePreview {
    fn write(&mut self, results: &ResultSet) -> OutputResult<()> {
        let stdout = std::io::stdout();
        self.render(results, stdout.lock())
    }
}

/// Writes one padded, space-separated row
fn write_row<W: Write, S: AsRef<str>>(w: &mut W, cells: &[S], widths: &[usize]) -> OutputResult<()> {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        let cell = cell.as_ref();
        line.push_str(cell);
        let pad = widths[i].saturating_sub(cell.chars().count());
        line.extend(std::iter::repeat(' ').take(pad));
    }
    writeln!(w, "{}", line.trim_end())?;
    Ok(())
}

/// Caps a cell at `width` characters, marking the cut with an ellipsis
fn truncate(cell: &str, width: usize) -> String {
    if cell.chars().count() <= width {
        return cell.to_string();
    }
    let kept: String = cell.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}
