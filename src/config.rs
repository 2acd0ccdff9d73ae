//! Configuration types for dynamodb-export
//!
//! This module defines:
//! - CLI argument parsing using clap derive macros
//! - Runtime configuration with validation

use crate::error::ConfigError;
use crate::scan::ScanFilter;
use clap::Parser;
use std::fmt;
use std::path::PathBuf;

/// Export a DynamoDB table to CSV or JSON
#[derive(Parser, Debug, Clone)]
#[command(
    name = "dynamodb-export",
    version,
    about = "Export a DynamoDB table to CSV or JSON",
    long_about = "Exports every matching record from one DynamoDB table into a flat file.\n\n\
                  Records are filtered server-side: by recipe code when --recette is given,\n\
                  otherwise by the step-zero marker (noEtape == 0). Credentials come from\n\
                  the named AWS profile.",
    after_help = "EXAMPLES:\n    \
        dynamodb-export -t prod-recipes\n    \
        dynamodb-export -t prod-recipes -r R42 -f json\n    \
        dynamodb-export -p staging -t steps -o /tmp/steps.csv"
)]
pub struct CliArgs {
    /// AWS credential/config profile name
    #[arg(short, long, default_value = "default", value_name = "NAME")]
    pub profile: String,

    /// Table name to export
    #[arg(short, long, value_name = "TABLE")]
    pub table: String,

    /// Recipe code filter (codeRecette); omit to filter on noEtape == 0
    #[arg(short, long, value_name = "CODE")]
    pub recette: Option<String>,

    /// Output format [csv/json]
    #[arg(short, long, default_value = "csv", value_name = "FORMAT")]
    pub format: String,

    /// Output file path (defaults to <table>.<ext>)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Quiet mode - suppress progress output
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose output (debug logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// Output format for the export file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Comma-delimited with a header row
    Csv,
    /// One JSON array of string-valued objects
    Json,
}

impl OutputFormat {
    /// Parse the `--format` value
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        match text.to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidFormat {
                format: text.to_string(),
            }),
        }
    }

    /// File extension for the format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Validated runtime configuration for one export run
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// AWS profile used for credential resolution
    pub profile: String,

    /// Table to export
    pub table: String,

    /// Server-side scan filter
    pub filter: ScanFilter,

    /// Output file format
    pub format: OutputFormat,

    /// Output file path
    pub output_path: PathBuf,

    /// Whether to show the progress display
    pub show_progress: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl ExportConfig {
    /// Validate CLI arguments and build the runtime configuration
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        let format = OutputFormat::parse(&args.format)?;

        let output_path = match args.output {
            Some(path) => {
                if path.is_dir() {
                    return Err(ConfigError::InvalidOutputPath {
                        path,
                        reason: "is a directory".into(),
                    });
                }
                path
            }
            None => PathBuf::from(format!("{}.{}", args.table, format.extension())),
        };

        Ok(Self {
            profile: args.profile,
            table: args.table,
            filter: ScanFilter::from_recette(args.recette),
            format,
            output_path,
            show_progress: !args.quiet,
            verbose: args.verbose,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> CliArgs {
        let mut argv = vec!["dynamodb-export", "-t", "recipes"];
        argv.extend_from_slice(extra);
        CliArgs::parse_from(argv)
    }

    #[test]
    fn test_defaults() {
        let config = ExportConfig::from_args(args(&[])).unwrap();
        assert_eq!(config.profile, "default");
        assert_eq!(config.table, "recipes");
        assert_eq!(config.filter, ScanFilter::StepZero);
        assert_eq!(config.format, OutputFormat::Csv);
        assert_eq!(config.output_path, PathBuf::from("recipes.csv"));
        assert!(config.show_progress);
        assert!(!config.verbose);
    }

    #[test]
    fn test_verbose_and_quiet_flags_carry_through() {
        let config = ExportConfig::from_args(args(&["-v", "-q"])).unwrap();
        assert!(config.verbose);
        assert!(!config.show_progress);
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(OutputFormat::parse("csv").unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::parse("JSON").unwrap(), OutputFormat::Json);
        assert!(matches!(
            OutputFormat::parse("xml"),
            Err(ConfigError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_json_default_output_name() {
        let config = ExportConfig::from_args(args(&["-f", "json"])).unwrap();
        assert_eq!(config.output_path, PathBuf::from("recipes.json"));
    }

    #[test]
    fn test_explicit_output_wins() {
        let config =
            ExportConfig::from_args(args(&["-o", "/tmp/snapshot.csv"])).unwrap();
        assert_eq!(config.output_path, PathBuf::from("/tmp/snapshot.csv"));
    }

    #[test]
    fn test_recette_selects_recipe_filter() {
        let config = ExportConfig::from_args(args(&["-r", "R42"])).unwrap();
        assert_eq!(config.filter, ScanFilter::RecipeCode("R42".into()));
    }

    #[test]
    fn test_table_is_required() {
        let parsed = CliArgs::try_parse_from(["dynamodb-export"]);
        assert!(parsed.is_err());
    }
}
