//! # cohortlib
//!
//! Turns cohort-analysis reports from the analytics reporting API into
//! tables: one row per cohort, one column per period offset, with values
//! formatted according to the metric's declared type.
//!
//! ## Overview
//!
//! The pipeline has two stateless stages:
//!
//! - **Tablize**: `Report` + `CohortSize` → `DisplayGrid`, a header row and
//!   data rows of display strings. Rows are grouped by the `ga:cohort`
//!   dimension as they appear in the report.
//! - **Render**: `DisplayGrid` → `Markup`, a table element tree with stable
//!   class names (`CohortTable`, `CohortTable-table`, `CohortTable-tr`,
//!   `CohortTable-th`, `CohortTable-td`) that can be written out as HTML.
//!
//! Values are formatted per metric type:
//!
//! - **PERCENT**: `0.5` → `50%`
//! - **CURRENCY**: `9.5` → `$9.50`
//! - anything else passes through unchanged
//!
//! ## Example
//!
//! ```rust
//! use cohortlib::{render_html, tablize, CohortSize, Response, Settings};
//!
//! let response = Response::from_json_str(r#"{
//!   "result": { "reports": [{
//!     "columnHeader": {
//!       "dimensions": ["ga:cohort", "ga:cohortNthWeek"],
//!       "metricHeader": { "metricHeaderEntries": [{ "name": "ga:cohortRetentionRate", "type": "PERCENT" }] }
//!     },
//!     "data": { "rows": [
//!       { "dimensions": ["0", "0000"], "metrics": [{ "values": ["0.5"] }] },
//!       { "dimensions": ["0", "0001"], "metrics": [{ "values": ["0.75"] }] },
//!       { "dimensions": ["1", "0000"], "metrics": [{ "values": ["0.2"] }] }
//!     ] }
//!   }] }
//! }"#).unwrap();
//!
//! let grid = tablize(response.first_report().unwrap(), CohortSize::Week).unwrap();
//! assert_eq!(grid.headers.len(), 8);
//! assert_eq!(grid.rows[0], vec!["0", "50%", "75%"]);
//! assert_eq!(grid.rows[1], vec!["1", "20%"]);
//!
//! let html = render_html(&response, &Settings::new(CohortSize::Week)).unwrap();
//! assert!(html.contains(r#"<td class="CohortTable-td">75%</td>"#));
//! ```

pub mod error;
pub mod format;
pub mod options;
pub mod render;
pub mod report;
pub mod table;

pub use error::CohortError;
pub use format::format_value;
pub use options::{load_settings, CohortSize, Settings};
pub use render::{render, render_html, Markup, Node};
pub use report::{
    load_response, ColumnHeader, DateRangeValues, MetricHeader, MetricHeaderEntry, MetricType,
    MetricValue, Report, ReportData, ReportRow, Response, ResponseResult, COHORT_DIMENSION,
};
pub use table::{tablize, tablize_str, DisplayGrid, COHORT_HEADER};

/// Result type for cohortlib operations
pub type Result<T> = std::result::Result<T, CohortError>;
