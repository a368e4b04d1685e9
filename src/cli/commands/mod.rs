//! Command implementations for the WMO header CLI
//!
//! Each command is implemented in its own module:
//! - `check`: validity of candidate lines
//! - `parse`: decomposition of a single header
//! - `build`: header synthesis from explicit fields
//! - `scan`: header location in bulletin files

pub mod build;
pub mod check;
pub mod parse;
pub mod scan;
pub mod shared;

use crate::cli::args::{Args, Commands};
use anyhow::Result;
use std::process::ExitCode;

/// Dispatch to the subcommand handler.
///
/// Returns an error if no subcommand was given; `main` shows help instead of
/// calling this in that case.
pub fn run(args: Args) -> Result<ExitCode> {
    let quiet = args.quiet;
    let show_progress = args.show_progress();

    match args.command {
        Some(Commands::Check(check_args)) => check::run_check(&check_args, quiet),
        Some(Commands::Parse(parse_args)) => parse::run_parse(&parse_args),
        Some(Commands::Build(build_args)) => build::run_build(&build_args),
        Some(Commands::Scan(scan_args)) => scan::run_scan(&scan_args, show_progress),
        None => anyhow::bail!("No command given"),
    }
}
