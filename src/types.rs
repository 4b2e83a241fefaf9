//! Core value types shared across the pipeline stages

use crate::error::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde_json::Value;
use std::fmt;
use std::time::Duration;

/// Output artifact format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Delimited text, one line per row
    Csv,
    /// One pretty-printed JSON array of arrays
    Json,
}

impl OutputFormat {
    /// Parse a config value into a format, failing before any database I/O
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(Error::invalid_value(
                "output_file_type",
                format!("'{other}' is not one of 'csv', 'json'"),
            )),
        }
    }

    /// File extension used in the artifact name
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// One column value fetched from the database.
///
/// A tagged variant per scalar class so serialization can pattern-match
/// exhaustively. `Date` carries values whose time-of-day is zero; they
/// serialize as `YYYY-MM-DD` while `Timestamp` keeps the full instant.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Null,
    Text(String),
    Integer(i64),
    Float(f64),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
}

impl ScalarValue {
    /// Textual coercion used by the CSV writer. NULL becomes the empty field.
    pub fn to_field(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Text(s) => s.clone(),
            Self::Integer(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Date(d) => d.format("%Y-%m-%d").to_string(),
            Self::Timestamp(ts) => {
                if ts.nanosecond() == 0 {
                    ts.format("%Y-%m-%d %H:%M:%S").to_string()
                } else {
                    ts.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
                }
            }
        }
    }

    /// JSON coercion. Date/time values become their ISO-8601 textual form;
    /// a non-finite float has no JSON representation and is rejected.
    pub fn to_json(&self) -> Result<Value> {
        match self {
            Self::Null => Ok(Value::Null),
            Self::Text(s) => Ok(Value::String(s.clone())),
            Self::Integer(i) => Ok(Value::from(*i)),
            Self::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .ok_or_else(|| Error::serialization("non-finite float")),
            Self::Date(d) => Ok(Value::String(d.format("%Y-%m-%d").to_string())),
            Self::Timestamp(ts) => {
                let text = if ts.nanosecond() == 0 {
                    ts.format("%Y-%m-%dT%H:%M:%S").to_string()
                } else {
                    ts.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
                };
                Ok(Value::String(text))
            }
        }
    }
}

/// One fetched row, column values in select-list order
pub type Row = Vec<ScalarValue>;

/// The full result set of one query run, buffered in memory
#[derive(Debug)]
pub struct QueryResult {
    /// All fetched rows, in fetch order
    pub rows: Vec<Row>,
    /// Wall time spent executing and fetching
    pub elapsed: Duration,
}

impl QueryResult {
    /// Number of fetched rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_format_parse() {
        assert_eq!(OutputFormat::parse("csv").unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::parse("json").unwrap(), OutputFormat::Json);
        assert!(OutputFormat::parse("parquet").is_err());
        assert!(OutputFormat::parse("CSV").is_err());
    }

    #[test]
    fn test_scalar_to_field() {
        assert_eq!(ScalarValue::Null.to_field(), "");
        assert_eq!(ScalarValue::Text("a,b".into()).to_field(), "a,b");
        assert_eq!(ScalarValue::Integer(-42).to_field(), "-42");
        assert_eq!(ScalarValue::Float(3.5).to_field(), "3.5");

        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(ScalarValue::Date(d).to_field(), "2024-01-01");

        let ts = d.and_hms_opt(14, 30, 45).unwrap();
        assert_eq!(ScalarValue::Timestamp(ts).to_field(), "2024-01-01 14:30:45");

        let ts_us = d.and_hms_micro_opt(14, 30, 45, 123_456).unwrap();
        assert_eq!(
            ScalarValue::Timestamp(ts_us).to_field(),
            "2024-01-01 14:30:45.123456"
        );
    }

    #[test]
    fn test_scalar_to_json() {
        assert_eq!(ScalarValue::Null.to_json().unwrap(), json!(null));
        assert_eq!(ScalarValue::Integer(1).to_json().unwrap(), json!(1));
        assert_eq!(ScalarValue::Float(2.5).to_json().unwrap(), json!(2.5));

        let d = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(ScalarValue::Date(d).to_json().unwrap(), json!("2024-01-02"));

        let ts = d.and_hms_opt(3, 4, 5).unwrap();
        assert_eq!(
            ScalarValue::Timestamp(ts).to_json().unwrap(),
            json!("2024-01-02T03:04:05")
        );
    }

    #[test]
    fn test_non_finite_float_rejected() {
        let err = ScalarValue::Float(f64::NAN).to_json().unwrap_err();
        assert!(err.to_string().contains("non-finite float"));
        assert!(ScalarValue::Float(f64::INFINITY).to_json().is_err());
    }
}
