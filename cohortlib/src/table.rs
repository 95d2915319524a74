//! Table-ready data structures for cohort output.
//!
//! This module provides `DisplayGrid`, a presentation-ready grid of strings
//! that can be rendered as markup or serialized to JSON.
//!
//! The data flow is:
//! 1. Raw report (`Report`, as returned by the API)
//! 2. DisplayGrid (rows grouped by cohort, values formatted)
//! 3. Markup (table element tree, see `render`)

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::CohortError;
use crate::format::format_value;
use crate::options::CohortSize;
use crate::report::Report;
use crate::Result;

/// Header of the leading column.
pub const COHORT_HEADER: &str = "Cohort";

/// Table-ready cohort data.
///
/// `headers` is the header row; each entry of `rows` starts with the cohort
/// key followed by one formatted value per period present in the report.
/// Rows are not padded to the header width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayGrid {
    /// Column headers: ["Cohort", "<size> 0", ..., "<size> N"]
    pub headers: Vec<String>,
    /// Data rows, in first-seen cohort order
    pub rows: Vec<Vec<String>>,
}

impl DisplayGrid {
    /// Build the grid for a report. See [`tablize`].
    pub fn from_report(report: &Report, cohort_size: CohortSize) -> Result<Self> {
        tablize(report, cohort_size)
    }

    /// Flatten into a single 2-D grid with the header row first.
    pub fn into_rows(self) -> Vec<Vec<String>> {
        let mut grid = Vec::with_capacity(self.rows.len() + 1);
        grid.push(self.headers);
        grid.extend(self.rows);
        grid
    }
}

/// Build the header row for a cohort size.
fn build_headers(cohort_size: CohortSize) -> Vec<String> {
    let mut headers = vec![COHORT_HEADER.to_string()];
    headers.extend((0..=cohort_size.periods()).map(|i| format!("{} {}", cohort_size, i)));
    headers
}

/// Turn a cohort report into a grid of display strings.
///
/// Rows are grouped by adjacency: a new data row starts whenever a row's
/// cohort key differs from the key of the row being filled. Input rows
/// whose dimensions don't reach the cohort column are skipped.
///
/// Fails with `MissingCohortDimension` when the report has no `ga:cohort`
/// column, and with `MalformedRow` when a usable row carries no value or
/// the report has no metric header to format it with.
pub fn tablize(report: &Report, cohort_size: CohortSize) -> Result<DisplayGrid> {
    let headers = build_headers(cohort_size);

    let cohort_index = report
        .cohort_column_index()
        .ok_or(CohortError::MissingCohortDimension)?;

    let mut rows: Vec<Vec<String>> = Vec::new();

    for (index, row) in report.rows().iter().enumerate() {
        let Some(key) = row.dimension(cohort_index) else {
            debug!(row = index, cohort_index, "skipping row without cohort dimension");
            continue;
        };

        let starts_new_cohort = rows
            .last()
            .and_then(|current| current.first())
            .map_or(true, |current_key| current_key != key);
        if starts_new_cohort {
            debug!(row = index, cohort = key, "starting cohort row");
            rows.push(vec![key.to_string()]);
        }

        let value = row.primary_value().ok_or_else(|| CohortError::MalformedRow {
            index,
            reason: "row has no metric values".to_string(),
        })?;
        let metric_type = report
            .primary_metric_type()
            .ok_or_else(|| CohortError::MalformedRow {
                index,
                reason: "report has no metric header entries".to_string(),
            })?;

        if let Some(current) = rows.last_mut() {
            current.push(format_value(value, metric_type)?);
        }
    }

    trace!(
        columns = headers.len(),
        rows = rows.len(),
        "tablized cohort report"
    );

    Ok(DisplayGrid { headers, rows })
}

/// Like [`tablize`], taking the cohort size as its key ("Day", "Week", "Month").
pub fn tablize_str(report: &Report, cohort_size_key: &str) -> Result<DisplayGrid> {
    tablize(report, cohort_size_key.parse()?)
}
