//! Error types for the export job
//!
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! Only the query-fetch failure is handled specially (see
//! [`crate::database::FetchOutcome`]); everything else propagates to `main`.

use thiserror::Error;

/// The main error type for the export pipeline
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config key '{field}' in section [{section}]")]
    MissingConfigField { section: String, field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    // ============================================================================
    // Database Errors
    // ============================================================================
    #[error("Database connection failed: {message}")]
    Connect { message: String },

    #[error("Database query failed (ORA-{code:05}): {message}")]
    Query { code: i32, message: String },

    // ============================================================================
    // Serialization Errors
    // ============================================================================
    #[error("Value of type {type_name} is not serializable")]
    Serialization { type_name: String },

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    // ============================================================================
    // Upload Errors
    // ============================================================================
    #[error("Upload failed: {message}")]
    Upload { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(section: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            section: section.into(),
            field: field.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a connection error
    pub fn connect(message: impl Into<String>) -> Self {
        Self::Connect {
            message: message.into(),
        }
    }

    /// Create a serialization error naming the offending type
    pub fn serialization(type_name: impl Into<String>) -> Self {
        Self::Serialization {
            type_name: type_name.into(),
        }
    }

    /// Create an upload error
    pub fn upload(message: impl Into<String>) -> Self {
        Self::Upload {
            message: message.into(),
        }
    }
}

/// Result type alias for the export pipeline
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field("default", "ora_host");
        assert_eq!(
            err.to_string(),
            "Missing required config key 'ora_host' in section [default]"
        );

        let err = Error::Query {
            code: 942,
            message: "table or view does not exist".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Database query failed (ORA-00942): table or view does not exist"
        );

        let err = Error::serialization("BLOB");
        assert_eq!(err.to_string(), "Value of type BLOB is not serializable");
    }

    #[test]
    fn test_invalid_value_display() {
        let err = Error::invalid_value("output_file_type", "expected 'csv' or 'json'");
        assert_eq!(
            err.to_string(),
            "Invalid config value for 'output_file_type': expected 'csv' or 'json'"
        );
    }
}
