//! Template rendering for CLI output using outstanding

use cohortlib::DisplayGrid;
use console::Style;
use outstanding::{render_auto, render_with_output, Theme};
use serde::Serialize;

/// Include template at compile time
const COHORT_TABLE_TEMPLATE: &str = include_str!("../templates/cohort_table.jinja");

/// Re-export OutputMode for callers
pub use outstanding::OutputMode;

/// Widest a column may get before its cells are truncated
const MAX_CELL_WIDTH: usize = 24;

/// Row data for template rendering (pre-formatted)
#[derive(Debug, Serialize)]
struct TemplateRow {
    /// Pre-padded cells: cohort key left-aligned, values right-aligned
    cells: Vec<String>,
}

/// Data context for cohort table template
#[derive(Debug, Serialize)]
struct CohortTableContext {
    /// Pre-padded header cells
    columns: Vec<String>,
    /// Separator line (dashes)
    separator: String,
    /// Data rows
    rows: Vec<TemplateRow>,
}

/// Truncate a cell to fit within max_len, adding ".." suffix if needed
fn truncate_cell(cell: &str, max_len: usize) -> String {
    if cell.chars().count() > max_len {
        let kept: String = cell.chars().take(max_len.saturating_sub(2)).collect();
        format!("{}..", kept)
    } else {
        cell.to_string()
    }
}

/// Width of each column: the widest of its header and cells, capped
fn column_widths(grid: &DisplayGrid) -> Vec<usize> {
    let mut widths: Vec<usize> = grid.headers.iter().map(|h| h.chars().count()).collect();
    for row in &grid.rows {
        for (i, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(len),
                None => widths.push(len),
            }
        }
    }
    widths.into_iter().map(|w| w.min(MAX_CELL_WIDTH)).collect()
}

/// Pad a line of cells: first column left-aligned, the rest right-aligned
fn pad_cells(cells: &[String], widths: &[usize]) -> Vec<String> {
    cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, &width))| {
            let cell = truncate_cell(cell, width);
            if i == 0 {
                format!("{:<width$}", cell, width = width)
            } else {
                format!("{:>width$}", cell, width = width)
            }
        })
        .collect()
}

/// Create the theme with styles
fn create_theme() -> Theme {
    Theme::new().add("category", Style::new().bold())
}

/// Render a display grid using outstanding.
///
/// JSON mode serializes the grid itself; the other modes fill the table
/// template with pre-padded cells.
pub fn render_grid(grid: &DisplayGrid, output_mode: OutputMode) -> anyhow::Result<String> {
    let theme = create_theme();

    if matches!(output_mode, OutputMode::Json) {
        return Ok(render_auto(COHORT_TABLE_TEMPLATE, grid, &theme, output_mode)?);
    }

    let widths = column_widths(grid);
    let columns = pad_cells(&grid.headers, &widths);

    // Column separators are two spaces wide
    let line_width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    let separator = "-".repeat(line_width);

    let rows = grid
        .rows
        .iter()
        .map(|row| TemplateRow {
            cells: pad_cells(row, &widths),
        })
        .collect();

    let context = CohortTableContext {
        columns,
        separator,
        rows,
    };

    Ok(render_with_output(
        COHORT_TABLE_TEMPLATE,
        &context,
        &theme,
        output_mode,
    )?)
}
