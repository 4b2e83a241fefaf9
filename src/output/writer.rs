//! Gzip-compressed artifact writer
//!
//! Serializes the in-memory row sequence in one pass and closes the stream
//! before reporting the compressed size. CSV rows are joined with the
//! profile's delimiter (fields containing the delimiter or quotes are
//! quoted, no header row); JSON output is one pretty-printed array of
//! arrays with date/time values in ISO-8601 form.

use crate::error::{Error, Result};
use crate::types::{OutputFormat, Row};
use csv::WriterBuilder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// The written local artifact and the metrics kept for the final report
#[derive(Debug)]
pub struct Artifact {
    /// Local path; the file name doubles as the remote object key
    pub path: PathBuf,
    /// Rows serialized, equal to the fetched row count
    pub row_count: usize,
    /// Compressed size in bytes
    pub bytes: u64,
}

/// Serialize all rows to `path` as a gzip stream.
pub fn write_artifact(
    path: &Path,
    rows: &[Row],
    format: OutputFormat,
    delimiter: Option<u8>,
) -> Result<Artifact> {
    let file = File::create(path)?;
    let buf = BufWriter::with_capacity(128 * 1024, file);
    let encoder = GzEncoder::new(buf, Compression::default());

    match format {
        OutputFormat::Csv => {
            let delimiter = delimiter
                .ok_or_else(|| Error::config("csv output requires a delimiter"))?;
            let mut writer = WriterBuilder::new()
                .delimiter(delimiter)
                .from_writer(encoder);
            for row in rows {
                writer.write_record(row.iter().map(|value| value.to_field()))?;
            }
            let encoder = writer
                .into_inner()
                .map_err(|e| Error::Other(format!("Failed to flush csv stream: {e}")))?;
            encoder.finish()?.flush()?;
        }
        OutputFormat::Json => {
            let document: Vec<Vec<Value>> = rows
                .iter()
                .map(|row| row.iter().map(|value| value.to_json()).collect())
                .collect::<Result<_>>()?;
            let mut encoder = encoder;
            encoder.write_all(serde_json::to_string_pretty(&document)?.as_bytes())?;
            encoder.finish()?.flush()?;
        }
    }

    let bytes = fs::metadata(path)?.len();
    Ok(Artifact {
        path: path.to_path_buf(),
        row_count: rows.len(),
        bytes,
    })
}
