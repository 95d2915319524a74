//! Per-metric value formatting.

use crate::error::CohortError;
use crate::report::{MetricType, MetricValue};
use crate::Result;

/// Format a metric value for display according to its column type.
///
/// - `PERCENT`: scaled by 100, rounded to two decimals, suffixed with `%`
/// - `CURRENCY`: fixed two decimals, prefixed with `$`
/// - anything else: the raw value, untouched
pub fn format_value(value: &MetricValue, metric_type: MetricType) -> Result<String> {
    match metric_type {
        MetricType::Percent => Ok(format!("{}%", round2(numeric(value, metric_type)? * 100.0))),
        // Round first so half-cent ties go away from zero rather than to even
        MetricType::Currency => Ok(format!("${:.2}", round2(numeric(value, metric_type)?))),
        _ => Ok(value.as_str().to_string()),
    }
}

fn numeric(value: &MetricValue, metric_type: MetricType) -> Result<f64> {
    value.as_f64().ok_or_else(|| CohortError::InvalidMetricValue {
        value: value.as_str().to_string(),
        metric_type: metric_type.to_string(),
    })
}

/// Round to two decimal places. Display then prints the shortest form,
/// so `50.0` shows as `50` and `12.3` as `12.3`.
fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    // -0.0 would print as "-0"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(raw: &str, metric_type: MetricType) -> String {
        format_value(&MetricValue::new(raw), metric_type).unwrap()
    }

    #[test]
    fn test_percent() {
        assert_eq!(fmt("0.5", MetricType::Percent), "50%");
        assert_eq!(fmt("0.75", MetricType::Percent), "75%");
        assert_eq!(fmt("0.2", MetricType::Percent), "20%");
        assert_eq!(fmt("0.123456", MetricType::Percent), "12.35%");
        assert_eq!(fmt("1", MetricType::Percent), "100%");
        assert_eq!(fmt("0", MetricType::Percent), "0%");
    }

    #[test]
    fn test_currency() {
        assert_eq!(fmt("9.5", MetricType::Currency), "$9.50");
        assert_eq!(fmt("0", MetricType::Currency), "$0.00");
        assert_eq!(fmt("1234", MetricType::Currency), "$1234.00");
    }

    #[test]
    fn test_currency_half_cent_rounds_up() {
        assert_eq!(fmt("0.125", MetricType::Currency), "$0.13");
        assert_eq!(fmt("10.625", MetricType::Currency), "$10.63");
        assert_eq!(fmt("2.5", MetricType::Currency), "$2.50");
        assert_eq!(fmt("0.004", MetricType::Currency), "$0.00");
    }

    #[test]
    fn test_passthrough() {
        assert_eq!(fmt("42", MetricType::Integer), "42");
        assert_eq!(fmt("3.14159", MetricType::Float), "3.14159");
        assert_eq!(fmt("00:01:30", MetricType::Time), "00:01:30");
        assert_eq!(fmt("n/a", MetricType::Other), "n/a");
    }

    #[test]
    fn test_non_numeric_percent_is_an_error() {
        let err = format_value(&MetricValue::new("abc"), MetricType::Percent).unwrap_err();
        assert!(matches!(
            err,
            CohortError::InvalidMetricValue { ref value, ref metric_type }
                if value == "abc" && metric_type == "PERCENT"
        ));
    }

    #[test]
    fn test_non_numeric_currency_is_an_error() {
        assert!(format_value(&MetricValue::new(""), MetricType::Currency).is_err());
    }
}
