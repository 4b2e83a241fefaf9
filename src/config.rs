//! Settings profiles
//!
//! One run reads exactly one named section from an INI file and turns it
//! into an immutable [`JobProfile`]. Validation that can fail the run cheaply
//! (format enum, port, delimiter) happens here, before any database I/O.

use crate::error::{Error, Result};
use crate::types::OutputFormat;
use ini::Ini;
use std::path::{Path, PathBuf};

/// Fixed relative path of the settings file
pub const SETTINGS_PATH: &str = "./settings.conf";

/// Oracle default listener port, used when `ora_port` is absent
const DEFAULT_ORA_PORT: u16 = 1521;

/// One named database/bucket/query profile, loaded once per run
#[derive(Debug, Clone)]
pub struct JobProfile {
    /// Section name the profile was loaded from
    pub section: String,

    pub ora_host: String,
    pub ora_port: u16,
    pub ora_id: String,
    pub ora_password: String,
    pub ora_database: String,

    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub aws_s3_bucket: String,
    /// S3 region; boto3 resolved this implicitly, object_store needs it
    pub aws_region: String,

    /// Path of the file holding the single SQL statement
    pub query_file: PathBuf,
    pub output_file_type: OutputFormat,
    /// Artifact base name; extension and `.gzip` suffix are appended
    pub output_file_name: String,
    /// CSV field delimiter, present iff the format is csv
    pub delimiter: Option<u8>,
}

impl JobProfile {
    /// Load the named section from an INI settings file.
    pub fn load(path: impl AsRef<Path>, section: &str) -> Result<Self> {
        let path = path.as_ref();
        let ini = Ini::load_from_file(path).map_err(|e| {
            Error::config(format!("Failed to read {}: {e}", path.display()))
        })?;

        let props = ini.section(Some(section)).ok_or_else(|| {
            Error::config(format!(
                "Section [{section}] not found in {}",
                path.display()
            ))
        })?;

        let required = |key: &str| -> Result<String> {
            props
                .get(key)
                .map(str::to_string)
                .ok_or_else(|| Error::missing_field(section, key))
        };

        let ora_port = match props.get("ora_port") {
            Some(raw) => raw.parse::<u16>().map_err(|_| {
                Error::invalid_value("ora_port", format!("'{raw}' is not a valid port"))
            })?,
            None => DEFAULT_ORA_PORT,
        };

        // Format is validated before anything touches the database.
        let output_file_type = match props.get("output_file_type") {
            Some(raw) => OutputFormat::parse(raw)?,
            None => OutputFormat::Csv,
        };

        let delimiter = match output_file_type {
            OutputFormat::Csv => Some(parse_delimiter(&required("delimiter")?)?),
            OutputFormat::Json => None,
        };

        Ok(Self {
            section: section.to_string(),
            ora_host: required("ora_host")?,
            ora_port,
            ora_id: required("ora_id")?,
            ora_password: required("ora_password")?,
            ora_database: required("ora_database")?,
            aws_access_key_id: required("aws_access_key_id")?,
            aws_secret_access_key: required("aws_secret_access_key")?,
            aws_s3_bucket: required("aws_s3_bucket")?,
            aws_region: props
                .get("aws_region")
                .unwrap_or("us-east-1")
                .to_string(),
            query_file: PathBuf::from(required("query_file")?),
            output_file_type,
            output_file_name: required("output_file_name")?,
            delimiter,
        })
    }

    /// Local artifact name, also used as the remote object key:
    /// `<output_file_name>.<format>.gzip`
    pub fn artifact_name(&self) -> String {
        format!(
            "{}.{}.gzip",
            self.output_file_name,
            self.output_file_type.extension()
        )
    }
}

/// The csv writer takes a single delimiter byte.
fn parse_delimiter(raw: &str) -> Result<u8> {
    match raw.as_bytes() {
        [b] => Ok(*b),
        _ => Err(Error::invalid_value(
            "delimiter",
            format!("'{raw}' must be a single character"),
        )),
    }
}
