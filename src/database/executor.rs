//! Query execution against Oracle
//!
//! The driver (ODPI-C) always negotiates UTF-8 client-side, so no
//! process-level NLS environment is touched.

use crate::config::JobProfile;
use crate::error::{Error, Result};
use crate::types::{QueryResult, Row, ScalarValue};
use chrono::NaiveDate;
use oracle::sql_type::OracleType;
use oracle::Connection;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

/// Result of one fetch attempt.
///
/// A database error raised while executing or fetching is data, not a crate
/// error: the run reports it and stops without writing a file. Connection
/// failures and unsupported column types stay ordinary errors.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The full result set is in memory
    Fetched(QueryResult),
    /// The statement failed; the run aborts after reporting
    QueryFailed {
        /// Oracle error code (0 when the driver gave no database error)
        code: i32,
        message: String,
        /// Time spent before the failure surfaced
        elapsed: Duration,
    },
}

/// Executes one SQL statement and buffers the whole result set
#[derive(Debug)]
pub struct QueryExecutor {
    host: String,
    port: u16,
    service: String,
    username: String,
    password: String,
}

impl QueryExecutor {
    /// Build an executor from the loaded profile
    pub fn from_profile(profile: &JobProfile) -> Self {
        Self {
            host: profile.ora_host.clone(),
            port: profile.ora_port,
            service: profile.ora_database.clone(),
            username: profile.ora_id.clone(),
            password: profile.ora_password.clone(),
        }
    }

    /// EZCONNECT descriptor: `host:port/service`
    pub fn connect_string(&self) -> String {
        format!("{}:{}/{}", self.host, self.port, self.service)
    }

    /// Connect, execute the statement once, fetch every row.
    ///
    /// The connection is closed on every path before this returns.
    pub fn fetch(&self, sql: &str) -> Result<FetchOutcome> {
        let conn = Connection::connect(&self.username, &self.password, self.connect_string())
            .map_err(|e| Error::connect(e.to_string()))?;
        tracing::debug!(connect = %self.connect_string(), "connection established");

        let outcome = run_query(&conn, sql);

        if let Err(e) = conn.close() {
            tracing::warn!("failed to close connection: {e}");
        }
        outcome
    }
}

/// Read the SQL file, stripping surrounding whitespace and trailing `;`
pub fn load_query(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|e| {
        Error::config(format!("Failed to read query file {}: {e}", path.display()))
    })?;

    let sql = raw.trim().trim_end_matches(';').trim_end();
    if sql.is_empty() {
        return Err(Error::config(format!(
            "Query file {} contains no statement",
            path.display()
        )));
    }
    Ok(sql.to_string())
}

fn run_query(conn: &Connection, sql: &str) -> Result<FetchOutcome> {
    let started = Instant::now();

    let mut stmt = match conn.statement(sql).build() {
        Ok(stmt) => stmt,
        Err(e) => return Ok(failed(&e, started.elapsed())),
    };

    let result_set = match stmt.query(&[]) {
        Ok(rows) => rows,
        Err(e) => return Ok(failed(&e, started.elapsed())),
    };

    let column_types: Vec<OracleType> = result_set
        .column_info()
        .iter()
        .map(|c| c.oracle_type().clone())
        .collect();

    let mut rows: Vec<Row> = Vec::new();
    for row_result in result_set {
        let row = match row_result {
            Ok(row) => row,
            Err(e) => return Ok(failed(&e, started.elapsed())),
        };
        match convert_row(&row, &column_types) {
            Ok(values) => rows.push(values),
            Err(Error::Query { code, message }) => {
                return Ok(FetchOutcome::QueryFailed {
                    code,
                    message,
                    elapsed: started.elapsed(),
                })
            }
            Err(other) => return Err(other),
        }
    }

    Ok(FetchOutcome::Fetched(QueryResult {
        rows,
        elapsed: started.elapsed(),
    }))
}

fn failed(err: &oracle::Error, elapsed: Duration) -> FetchOutcome {
    let (code, message) = db_code_message(err);
    FetchOutcome::QueryFailed {
        code,
        message,
        elapsed,
    }
}

/// Pull the ORA code/message out of a driver error
fn db_code_message(err: &oracle::Error) -> (i32, String) {
    match err {
        oracle::Error::OciError(db) | oracle::Error::DpiError(db) => {
            (db.code(), db.message().to_string())
        }
        other => (0, other.to_string()),
    }
}

fn convert_row(row: &oracle::Row, column_types: &[OracleType]) -> Result<Row> {
    column_types
        .iter()
        .enumerate()
        .map(|(idx, otype)| convert_value(row, idx, otype))
        .collect()
}

/// Map one column value into the tagged scalar.
///
/// Fetch errors from the driver become `Error::Query` (the caught kind);
/// column types with no textual/JSON coercion are rejected outright.
fn convert_value(row: &oracle::Row, idx: usize, otype: &OracleType) -> Result<ScalarValue> {
    match otype {
        OracleType::Int64 | OracleType::UInt64 | OracleType::Number(_, 0) => {
            let v: Option<i64> = row.get(idx).map_err(db_error)?;
            Ok(v.map_or(ScalarValue::Null, ScalarValue::Integer))
        }
        OracleType::Number(_, _)
        | OracleType::Float(_)
        | OracleType::BinaryFloat
        | OracleType::BinaryDouble => {
            let v: Option<f64> = row.get(idx).map_err(db_error)?;
            Ok(v.map_or(ScalarValue::Null, ScalarValue::Float))
        }
        OracleType::Date
        | OracleType::Timestamp(_)
        | OracleType::TimestampTZ(_)
        | OracleType::TimestampLTZ(_) => {
            let v: Option<oracle::sql_type::Timestamp> = row.get(idx).map_err(db_error)?;
            match v {
                Some(ts) => date_or_timestamp(
                    ts.year(),
                    ts.month(),
                    ts.day(),
                    ts.hour(),
                    ts.minute(),
                    ts.second(),
                    ts.nanosecond(),
                ),
                None => Ok(ScalarValue::Null),
            }
        }
        OracleType::Raw(_)
        | OracleType::LongRaw
        | OracleType::BLOB
        | OracleType::BFILE
        | OracleType::Object(_) => Err(Error::serialization(otype.to_string())),
        _ => {
            let v: Option<String> = row.get(idx).map_err(db_error)?;
            Ok(v.map_or(ScalarValue::Null, ScalarValue::Text))
        }
    }
}

fn db_error(err: oracle::Error) -> Error {
    let (code, message) = db_code_message(&err);
    Error::Query { code, message }
}

/// A value with zero time-of-day is a plain date; anything else keeps the
/// full instant.
fn date_or_timestamp(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    nanosecond: u32,
) -> Result<ScalarValue> {
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| Error::serialization(format!("date {year:04}-{month:02}-{day:02}")))?;

    if hour == 0 && minute == 0 && second == 0 && nanosecond == 0 {
        return Ok(ScalarValue::Date(date));
    }

    date.and_hms_nano_opt(hour, minute, second, nanosecond)
        .map(ScalarValue::Timestamp)
        .ok_or_else(|| {
            Error::serialization(format!("time {hour:02}:{minute:02}:{second:02}.{nanosecond}"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_connect_string() {
        let executor = QueryExecutor {
            host: "db.example.com".into(),
            port: 1521,
            service: "ORCLPDB1".into(),
            username: "scott".into(),
            password: "tiger".into(),
        };
        assert_eq!(executor.connect_string(), "db.example.com:1521/ORCLPDB1");
    }

    #[test]
    fn test_load_query_strips_terminator() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "\n  SELECT id, name FROM orders ;\n\n").unwrap();

        let sql = load_query(file.path()).unwrap();
        assert_eq!(sql, "SELECT id, name FROM orders");
    }

    #[test]
    fn test_load_query_missing_file() {
        let err = load_query("/nonexistent/query.sql").unwrap_err();
        assert!(err.to_string().contains("query file"));
    }

    #[test]
    fn test_load_query_empty() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, " ;\n").unwrap();
        assert!(load_query(file.path()).is_err());
    }

    #[test]
    fn test_date_or_timestamp_split() {
        let date = date_or_timestamp(2024, 1, 1, 0, 0, 0, 0).unwrap();
        assert!(matches!(date, ScalarValue::Date(_)));
        assert_eq!(date.to_field(), "2024-01-01");

        let ts = date_or_timestamp(2024, 1, 1, 14, 30, 45, 0).unwrap();
        assert!(matches!(ts, ScalarValue::Timestamp(_)));
        assert_eq!(ts.to_field(), "2024-01-01 14:30:45");
    }

    #[test]
    fn test_date_or_timestamp_out_of_range() {
        assert!(date_or_timestamp(2024, 13, 1, 0, 0, 0, 0).is_err());
    }
}
