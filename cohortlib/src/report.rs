//! Data model for reporting API responses.
//!
//! Mirrors the JSON shape returned by the analytics reporting API:
//!
//! ```text
//! { "result": { "reports": [ {
//!     "columnHeader": { "dimensions": [...], "metricHeader": { "metricHeaderEntries": [...] } },
//!     "data": { "rows": [ { "dimensions": [...], "metrics": [ { "values": [...] } ] } ] }
//! } ] } }
//! ```
//!
//! Only the fields the cohort table needs are modelled; everything else in the
//! payload is ignored on deserialization.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::path::Path;

use crate::error::CohortError;
use crate::Result;

/// Dimension name identifying the cohort a row belongs to.
pub const COHORT_DIMENSION: &str = "ga:cohort";

/// Top-level API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub result: ResponseResult,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResponseResult {
    #[serde(default)]
    pub reports: Vec<Report>,
}

impl Response {
    /// Parse a response from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The report the cohort table is built from (always the first one).
    pub fn first_report(&self) -> Result<&Report> {
        self.result.reports.first().ok_or(CohortError::MissingReport)
    }
}

/// Read and parse a response JSON file.
pub fn load_response(path: impl AsRef<Path>) -> Result<Response> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| CohortError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Response::from_json_str(&contents)
}

/// A single report: column metadata plus data rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub column_header: ColumnHeader,
    #[serde(default)]
    pub data: ReportData,
}

impl Report {
    /// Position of the cohort dimension within the column header, if present.
    pub fn cohort_column_index(&self) -> Option<usize> {
        self.column_header
            .dimensions
            .iter()
            .position(|d| d == COHORT_DIMENSION)
    }

    /// Type of the first metric column, which drives value formatting.
    pub fn primary_metric_type(&self) -> Option<MetricType> {
        self.column_header
            .metric_header
            .metric_header_entries
            .first()
            .map(|entry| entry.metric_type)
    }

    /// Data rows, treating an absent `rows` key as no rows.
    pub fn rows(&self) -> &[ReportRow] {
        self.data.rows.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnHeader {
    #[serde(default)]
    pub dimensions: Vec<String>,
    #[serde(default)]
    pub metric_header: MetricHeader,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricHeader {
    #[serde(default)]
    pub metric_header_entries: Vec<MetricHeaderEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricHeaderEntry {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub metric_type: MetricType,
}

/// Semantic type of a metric column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetricType {
    #[default]
    MetricTypeUnspecified,
    Integer,
    Float,
    Currency,
    Percent,
    Time,
    /// Any type name the API adds later
    #[serde(other)]
    Other,
}

impl MetricType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricType::MetricTypeUnspecified => "METRIC_TYPE_UNSPECIFIED",
            MetricType::Integer => "INTEGER",
            MetricType::Float => "FLOAT",
            MetricType::Currency => "CURRENCY",
            MetricType::Percent => "PERCENT",
            MetricType::Time => "TIME",
            MetricType::Other => "OTHER",
        }
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReportData {
    /// Omitted by the API when the report is empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<ReportRow>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Vec<String>>,
    #[serde(default)]
    pub metrics: Vec<DateRangeValues>,
}

impl ReportRow {
    /// Cohort key at `index`, or `None` if the row's dimensions are too short.
    pub fn dimension(&self, index: usize) -> Option<&str> {
        self.dimensions
            .as_ref()
            .and_then(|dims| dims.get(index))
            .map(String::as_str)
    }

    /// First value of the first metric set.
    pub fn primary_value(&self) -> Option<&MetricValue> {
        self.metrics.first().and_then(|m| m.values.first())
    }
}

/// Metric values for one date range.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DateRangeValues {
    #[serde(default)]
    pub values: Vec<MetricValue>,
}

/// A metric value as sent by the API.
///
/// The API encodes values as strings; plain JSON numbers are accepted as well.
/// The original text is kept so untyped values pass through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawValue")]
pub struct MetricValue(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawValue> for MetricValue {
    fn from(raw: RawValue) -> Self {
        match raw {
            RawValue::Text(s) => MetricValue(s),
            RawValue::Number(n) => MetricValue(n.to_string()),
        }
    }
}

impl Serialize for MetricValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl MetricValue {
    pub fn new(raw: impl Into<String>) -> Self {
        MetricValue(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric reading of the value, if it parses as one.
    pub fn as_f64(&self) -> Option<f64> {
        self.0.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    fn sample_json() -> serde_json::Value {
        json!({
            "result": {
                "reports": [{
                    "columnHeader": {
                        "dimensions": ["ga:cohort", "ga:cohortNthWeek"],
                        "metricHeader": {
                            "metricHeaderEntries": [
                                {"name": "ga:cohortRetentionRate", "type": "PERCENT"}
                            ]
                        }
                    },
                    "data": {
                        "rows": [
                            {"dimensions": ["0", "0000"], "metrics": [{"values": ["0.5"]}]},
                            {"dimensions": ["0", "0001"], "metrics": [{"values": [0.25]}]}
                        ],
                        "totals": [{"values": ["1"]}]
                    }
                }]
            }
        })
    }

    #[test]
    fn test_parse_response() {
        let response: Response = serde_json::from_value(sample_json()).unwrap();
        let report = response.first_report().unwrap();

        assert_eq!(report.cohort_column_index(), Some(0));
        assert_eq!(report.primary_metric_type(), Some(MetricType::Percent));
        assert_eq!(report.rows().len(), 2);
        assert_eq!(report.rows()[0].dimension(1), Some("0000"));
    }

    #[test]
    fn test_numeric_values_keep_their_text() {
        let response: Response = serde_json::from_value(sample_json()).unwrap();
        let rows = response.first_report().unwrap().rows();

        assert_eq!(rows[0].primary_value().unwrap().as_str(), "0.5");
        assert_eq!(rows[1].primary_value().unwrap().as_str(), "0.25");
    }

    #[test]
    fn test_missing_rows_is_empty() {
        let report: Report = serde_json::from_value(json!({
            "columnHeader": {"dimensions": ["ga:cohort"]},
            "data": {}
        }))
        .unwrap();

        assert!(report.rows().is_empty());
        assert_eq!(report.primary_metric_type(), None);
    }

    #[test]
    fn test_unknown_metric_type() {
        let entry: MetricHeaderEntry =
            serde_json::from_value(json!({"name": "ga:x", "type": "DURATION"})).unwrap();
        assert_eq!(entry.metric_type, MetricType::Other);
    }

    #[test]
    fn test_first_report_missing() {
        let response: Response = serde_json::from_value(json!({"result": {"reports": []}})).unwrap();
        assert!(matches!(
            response.first_report(),
            Err(CohortError::MissingReport)
        ));
    }

    #[test]
    fn test_row_dimension_out_of_range() {
        let row: ReportRow =
            serde_json::from_value(json!({"dimensions": ["a"], "metrics": []})).unwrap();
        assert_eq!(row.dimension(0), Some("a"));
        assert_eq!(row.dimension(1), None);
        assert!(row.primary_value().is_none());
    }

    #[test]
    fn test_metric_value_as_f64() {
        assert_eq!(MetricValue::new("9.5").as_f64(), Some(9.5));
        assert_eq!(MetricValue::new(" 42 ").as_f64(), Some(42.0));
        assert_eq!(MetricValue::new("n/a").as_f64(), None);
        assert_eq!(MetricValue::new("NaN").as_f64(), None);
    }

    #[test]
    fn test_load_response() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("response.json");
        fs::write(&path, sample_json().to_string()).unwrap();

        let response = load_response(&path).unwrap();
        assert_eq!(response.result.reports.len(), 1);
    }

    #[test]
    fn test_load_response_missing_file() {
        let dir = tempdir().unwrap();
        let result = load_response(dir.path().join("nope.json"));
        assert!(matches!(result, Err(CohortError::FileRead { .. })));
    }
}
