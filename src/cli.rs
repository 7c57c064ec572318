//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Labelstats - conversation labeling statistics
///
/// Aggregates labeled-conversation spreadsheets into a comprehensive
/// statistics report plus a dashboard dataset, and merges free-text
/// report documents into a previously produced report.
///
/// Examples:
///   labelstats aggregate
///   labelstats aggregate --config team.toml --out-dir reports
///   labelstats merge --document "Task6_ Report.docx"
///   labelstats init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    ///
    /// If not specified, looks for .labelstats.toml in the current directory.
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Directory the JSON artifacts are written to and read from
    #[arg(long, value_name = "DIR", default_value = ".", global = true)]
    pub out_dir: PathBuf,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// The batch job to run.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Aggregate the configured labeling spreadsheets into the
    /// comprehensive report and dashboard dataset
    Aggregate,

    /// Extract a report document and merge it into a prior report
    Merge {
        /// Path to the .docx report document
        #[arg(short, long, value_name = "FILE")]
        document: PathBuf,

        /// Prior report to extend
        ///
        /// Defaults to the aggregate report inside --out-dir.
        #[arg(short, long, value_name = "FILE")]
        report: Option<PathBuf>,
    },

    /// Generate a default .labelstats.toml configuration file
    InitConfig,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref config) = self.config {
            if !config.exists() {
                return Err(format!("Config file does not exist: {}", config.display()));
            }
        }

        if let Command::Merge { document, .. } = &self.command {
            if !document.exists() {
                return Err(format!("Document does not exist: {}", document.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args(command: Command) -> Args {
        Args {
            command,
            config: None,
            out_dir: PathBuf::from("."),
            verbose: false,
            quiet: false,
        }
    }

    #[test]
    fn test_parse_aggregate() {
        let args = Args::try_parse_from(["labelstats", "aggregate", "--out-dir", "reports"])
            .unwrap();
        assert!(matches!(args.command, Command::Aggregate));
        assert_eq!(args.out_dir, PathBuf::from("reports"));
    }

    #[test]
    fn test_parse_merge_requires_document() {
        assert!(Args::try_parse_from(["labelstats", "merge"]).is_err());

        let args =
            Args::try_parse_from(["labelstats", "merge", "--document", "report.docx"]).unwrap();
        match args.command {
            Command::Merge { document, report } => {
                assert_eq!(document, PathBuf::from("report.docx"));
                assert!(report.is_none());
            }
            _ => panic!("expected merge subcommand"),
        }
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args(Command::Aggregate);
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_missing_config() {
        let mut args = make_args(Command::Aggregate);
        args.config = Some(PathBuf::from("no-such-config.toml"));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args(Command::Aggregate);
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
