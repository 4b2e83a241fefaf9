// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # ora2s3
//!
//! Exports the result set of one SQL query from an Oracle database to a
//! gzip-compressed CSV or JSON file and uploads it to an S3 bucket.
//!
//! A run is driven entirely by one section of an INI settings file:
//! connection endpoint and credentials, S3 target, query file path, output
//! format and file name. The pipeline is connect, fetch, write, upload, with
//! a stage-by-stage progress report on stdout.
//!
//! ```rust,ignore
//! use ora2s3::config::JobProfile;
//! use ora2s3::database::{load_query, FetchOutcome, QueryExecutor};
//! use ora2s3::output::{write_artifact, ObjectUploader};
//!
//! #[tokio::main]
//! async fn main() -> ora2s3::Result<()> {
//!     let profile = JobProfile::load("./settings.conf", "default")?;
//!     let sql = load_query(&profile.query_file)?;
//!     if let FetchOutcome::Fetched(result) = QueryExecutor::from_profile(&profile).fetch(&sql)? {
//!         let local = std::path::PathBuf::from(profile.artifact_name());
//!         let artifact = write_artifact(
//!             &local,
//!             &result.rows,
//!             profile.output_file_type,
//!             profile.delimiter,
//!         )?;
//!         ObjectUploader::from_profile(&profile)?.upload(&artifact.path).await?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod output;
pub mod report;
pub mod types;

pub use config::JobProfile;
pub use error::{Error, Result};
pub use types::{OutputFormat, QueryResult, Row, ScalarValue};
