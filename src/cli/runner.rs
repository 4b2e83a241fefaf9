//! CLI runner - executes the export pipeline

use crate::cli::commands::Cli;
use crate::config::{JobProfile, SETTINGS_PATH};
use crate::database::{load_query, FetchOutcome, QueryExecutor};
use crate::error::Result;
use crate::output::{write_artifact, ObjectUploader};
use crate::report::{format_count, format_elapsed, stage, RULE};
use chrono::Local;
use std::path::PathBuf;
use std::time::Instant;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the pipeline: load the profile, fetch the query result, write the
    /// gzip artifact and upload it. A failed query terminates the run with a
    /// report rather than an error exit.
    pub async fn run(&self) -> Result<()> {
        let run_started = Instant::now();

        println!("{RULE}");
        println!("Oracle to S3");
        println!("  Start at {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
        println!("  Setting section: {}", self.cli.setting_section);

        let profile = JobProfile::load(SETTINGS_PATH, &self.cli.setting_section)?;
        tracing::debug!(section = %profile.section, "loaded settings");

        stage("Query");
        let executor = QueryExecutor::from_profile(&profile);
        println!("  Connect to oracle database... {}", executor.connect_string());

        let sql = load_query(&profile.query_file)?;
        println!("  Load query file << {}", profile.query_file.display());

        println!("  Fetch data...");
        let result = match executor.fetch(&sql)? {
            FetchOutcome::Fetched(result) => result,
            FetchOutcome::QueryFailed {
                code,
                message,
                elapsed,
            } => {
                println!("    Oracle-Error-Code: ORA-{code:05}");
                println!("    Oracle-Error-Message: {message}");
                println!("* Elapsed time: {}", format_elapsed(elapsed));
                println!("* Program terminated");
                println!("{RULE}");
                return Ok(());
            }
        };
        println!("* Elapsed time: {}", format_elapsed(result.elapsed));

        stage("Create file");
        let artifact_path = PathBuf::from(profile.artifact_name());
        println!(
            "  Write fetched data to local file >> {}",
            artifact_path.display()
        );
        let write_started = Instant::now();
        let artifact = write_artifact(
            &artifact_path,
            &result.rows,
            profile.output_file_type,
            profile.delimiter,
        )?;
        println!("* Elapsed time: {}", format_elapsed(write_started.elapsed()));

        stage("Transfer file");
        let uploader = ObjectUploader::from_profile(&profile)?;
        println!("  S3 bucket name: {}", uploader.bucket());
        println!("  Transfer... {}", artifact.path.display());
        let upload_started = Instant::now();
        let remote = uploader.upload(&artifact.path).await?;
        println!("          >>> {remote}");
        println!("  File transfer completed.");
        println!("* Elapsed time: {}", format_elapsed(upload_started.elapsed()));

        stage("Result");
        println!("  Row count: {}", format_count(artifact.row_count as u64));
        println!("  Compressed file size: {} bytes", format_count(artifact.bytes));
        println!("* Total elapsed time: {}", format_elapsed(run_started.elapsed()));
        println!("{RULE}");

        Ok(())
    }
}
