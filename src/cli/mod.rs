//! CLI module
//!
//! Command-line interface for the export job. A run is a single pipeline
//! (connect, fetch, write, upload) selected by a settings section, so there
//! are no subcommands.

mod commands;
mod runner;

pub use commands::Cli;
pub use runner::Runner;
