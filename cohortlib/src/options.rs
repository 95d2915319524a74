//! Input options for building cohort tables.
//!
//! This module contains the configuration types that control how a report
//! is laid out: the cohort size selector and the settings object the host
//! application supplies alongside a response.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::CohortError;
use crate::Result;

/// Cohort size: the length of one period column.
///
/// Each size maps to a fixed number of period offsets after the cohort's
/// start, so a table has `periods() + 1` period columns (offset 0 included).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CohortSize {
    /// Daily cohorts, offsets 0..=8
    Day,
    /// Weekly cohorts, offsets 0..=6
    #[default]
    Week,
    /// Monthly cohorts, offsets 0..=3
    Month,
}

impl CohortSize {
    pub const ALL: [CohortSize; 3] = [CohortSize::Day, CohortSize::Week, CohortSize::Month];

    /// Highest period offset shown for this size.
    pub fn periods(&self) -> usize {
        match self {
            CohortSize::Day => 8,
            CohortSize::Week => 6,
            CohortSize::Month => 3,
        }
    }

    /// Label used in period column headers ("Week 0", "Week 1", ...).
    pub fn label(&self) -> &'static str {
        match self {
            CohortSize::Day => "Day",
            CohortSize::Week => "Week",
            CohortSize::Month => "Month",
        }
    }
}

impl fmt::Display for CohortSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CohortSize {
    type Err = CohortError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "day" => Ok(CohortSize::Day),
            "week" => Ok(CohortSize::Week),
            "month" => Ok(CohortSize::Month),
            _ => Err(CohortError::UnknownCohortSize(s.to_string())),
        }
    }
}

/// Settings supplied by the host application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Cohort size the response was requested with
    #[serde(default)]
    pub response_cohort_size: CohortSize,
}

impl Settings {
    pub fn new(response_cohort_size: CohortSize) -> Self {
        Self {
            response_cohort_size,
        }
    }

    /// Builder: set the cohort size
    pub fn cohort_size(mut self, size: CohortSize) -> Self {
        self.response_cohort_size = size;
        self
    }
}

/// Read and parse a settings JSON file.
pub fn load_settings(path: impl AsRef<Path>) -> Result<Settings> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| CohortError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&contents)?)
}
