//! Error types for cohortlib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building or rendering a cohort table
#[derive(Error, Debug)]
pub enum CohortError {
    /// The report has no `ga:cohort` column
    #[error("report data doesn't include a cohort column")]
    MissingCohortDimension,

    /// Cohort size key outside Day/Week/Month
    #[error("unknown cohort size '{0}' (expected Day, Week or Month)")]
    UnknownCohortSize(String),

    /// The response carries no report to render
    #[error("response contains no reports")]
    MissingReport,

    /// A data row (or the header describing it) lacks the metric data needed
    #[error("malformed row {index}: {reason}")]
    MalformedRow { index: usize, reason: String },

    /// A value that should be numeric could not be parsed
    #[error("invalid {metric_type} value '{value}'")]
    InvalidMetricValue { value: String, metric_type: String },

    /// Failed to read an input file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Input was not valid JSON for the expected shape
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
