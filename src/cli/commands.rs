//! CLI argument parsing

use clap::Parser;

/// Oracle to S3 export job
#[derive(Parser, Debug)]
#[command(name = "ora2s3")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Section of the settings file to run
    #[arg(short = 'c', long = "setting_section", default_value = "default")]
    pub setting_section: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_section_defaults() {
        let cli = Cli::parse_from(["ora2s3"]);
        assert_eq!(cli.setting_section, "default");
    }

    #[test]
    fn test_section_short_and_long() {
        let cli = Cli::parse_from(["ora2s3", "-c", "nightly"]);
        assert_eq!(cli.setting_section, "nightly");

        let cli = Cli::parse_from(["ora2s3", "--setting_section", "nightly"]);
        assert_eq!(cli.setting_section, "nightly");
    }
}
