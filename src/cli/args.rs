//! Command-line argument definitions for the WMO header tool
//!
//! This module defines the complete CLI interface using the clap derive API.

use crate::config::{DEFAULT_MAX_SCAN_LINES, ScanConfig};
use crate::header::HeaderField;
use crate::{Result, WmoError};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the WMO abbreviated header tool
///
/// Validates and decomposes WMO abbreviated header lines and locates them
/// in bulletin files.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "wmo-header",
    version,
    about = "Validate and decompose WMO abbreviated header lines",
    long_about = "Validates WMO abbreviated header lines of the form \
                  'T1T2A1A2ii CCCC DDHHMM [BBB]', decomposes them into product, station, \
                  time and addendum fields, and locates headers inside bulletin files."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings and hides progress.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress output except errors"
    )]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Check whether lines are valid header lines
    Check(CheckArgs),
    /// Decompose a header line into its fields
    Parse(ParseArgs),
    /// Build the canonical header line from explicit fields
    Build(BuildArgs),
    /// Locate header lines in bulletin files
    Scan(ScanArgs),
}

/// Arguments for the check command
#[derive(Debug, Clone, Parser)]
pub struct CheckArgs {
    /// Candidate header lines
    #[arg(value_name = "LINE")]
    pub lines: Vec<String>,

    /// Read candidate lines from standard input, one per line
    #[arg(long = "stdin", help = "Read candidate lines from standard input")]
    pub stdin: bool,
}

/// Arguments for the parse command
#[derive(Debug, Clone, Parser)]
pub struct ParseArgs {
    /// Header line to decompose
    #[arg(value_name = "LINE")]
    pub line: String,

    /// Only print the named fields (repeatable)
    ///
    /// Available fields: raw, product, station, time, addendum, bbb, region,
    /// t1, t2, t1t2, tt, a1, a2, a1a2, ii
    #[arg(
        short = 'f',
        long = "field",
        value_name = "NAME",
        value_parser = parse_header_field,
        help = "Only print the named field (repeatable)"
    )]
    pub fields: Vec<HeaderField>,

    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the build command
#[derive(Debug, Clone, Parser)]
pub struct BuildArgs {
    /// Product designator, T1T2A1A2ii
    #[arg(long = "product", value_name = "TTAAII")]
    pub product: String,

    /// Originating station, CCCC
    #[arg(long = "station", value_name = "CCCC")]
    pub station: String,

    /// Issue time, DDHHMM
    #[arg(long = "time", value_name = "DDHHMM")]
    pub time: String,

    /// Addendum code without parentheses, e.g. RRA or COR
    #[arg(long = "addendum", value_name = "BBB")]
    pub addendum: Option<String>,
}

/// Arguments for the scan command
#[derive(Debug, Clone, Parser)]
pub struct ScanArgs {
    /// Bulletin files or directories to scan
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// File name pattern applied while walking directories
    #[arg(long = "pattern", value_name = "GLOB", default_value = "*")]
    pub pattern: String,

    /// Number of leading lines searched in each bulletin
    #[arg(
        long = "max-lines",
        value_name = "COUNT",
        default_value_t = DEFAULT_MAX_SCAN_LINES
    )]
    pub max_lines: usize,

    /// Stop at the first unreadable file
    #[arg(long = "fail-fast")]
    pub fail_fast: bool,

    /// Match lines as read, without stripping leading control characters
    #[arg(long = "keep-control-chars")]
    pub keep_control_chars: bool,

    /// Follow symbolic links while walking directories
    #[arg(long = "follow-links")]
    pub follow_links: bool,

    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Text,
    /// JSON format for scripting
    Json,
}

fn parse_header_field(s: &str) -> std::result::Result<HeaderField, String> {
    s.parse::<HeaderField>().map_err(|e| e.to_string())
}

impl Args {
    /// Log level implied by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress spinners (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl CheckArgs {
    /// Validate the check command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if self.lines.is_empty() && !self.stdin {
            return Err(WmoError::configuration(
                "Provide at least one LINE or use --stdin",
            ));
        }
        Ok(())
    }
}

impl ScanArgs {
    /// Build the scan configuration from the command arguments
    pub fn to_config(&self) -> ScanConfig {
        let mut config = ScanConfig::default()
            .with_max_scan_lines(self.max_lines)
            .with_file_pattern(self.pattern.clone());
        if self.fail_fast {
            config = config.with_fail_fast();
        }
        if self.keep_control_chars {
            config = config.without_control_stripping();
        }
        if self.follow_links {
            config = config.with_follow_links();
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_with_fields() {
        let args = Args::try_parse_from([
            "wmo-header",
            "parse",
            "SXUS51 KNYC 041200 (PAA)",
            "--field",
            "tt",
            "-f",
            "region",
            "--format",
            "json",
        ])
        .unwrap();

        match args.command {
            Some(Commands::Parse(parse)) => {
                assert_eq!(parse.line, "SXUS51 KNYC 041200 (PAA)");
                assert_eq!(parse.fields, vec![HeaderField::Tt, HeaderField::Region]);
                assert_eq!(parse.format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_command_rejects_unknown_field() {
        let result = Args::try_parse_from(["wmo-header", "parse", "FPUS61 KOKX 171530", "-f", "cccc"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_log_level() {
        let args = Args::try_parse_from(["wmo-header", "-vv", "check", "X"]).unwrap();
        assert_eq!(args.get_log_level(), "debug");

        let args = Args::try_parse_from(["wmo-header", "check", "X", "-q"]).unwrap();
        assert_eq!(args.get_log_level(), "error");
        assert!(!args.show_progress());

        let args = Args::try_parse_from(["wmo-header", "check", "X"]).unwrap();
        assert_eq!(args.get_log_level(), "warn");
    }

    #[test]
    fn test_check_args_validation() {
        let empty = CheckArgs {
            lines: vec![],
            stdin: false,
        };
        assert!(empty.validate().is_err());

        let stdin = CheckArgs {
            lines: vec![],
            stdin: true,
        };
        assert!(stdin.validate().is_ok());
    }

    #[test]
    fn test_scan_args_to_config() {
        let args = Args::try_parse_from([
            "wmo-header",
            "scan",
            "/data/bulletins",
            "--pattern",
            "*.txt",
            "--max-lines",
            "4",
            "--fail-fast",
            "--keep-control-chars",
        ])
        .unwrap();

        let Some(Commands::Scan(scan)) = args.command else {
            panic!("expected scan command");
        };
        let config = scan.to_config();

        assert_eq!(config.max_scan_lines, 4);
        assert_eq!(config.file_pattern, "*.txt");
        assert!(!config.continue_on_error);
        assert!(!config.strip_control_chars);
        assert!(!config.follow_links);
    }

    #[test]
    fn test_scan_requires_paths() {
        assert!(Args::try_parse_from(["wmo-header", "scan"]).is_err());
    }
}
