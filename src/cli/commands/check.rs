//! Check command: report whether candidate lines are valid headers

use crate::cli::args::CheckArgs;
use crate::grammar::is_valid;
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, BufRead};
use std::process::ExitCode;
use tracing::{debug, info};

/// Run the check command, failing the exit code if any line is invalid
pub fn run_check(args: &CheckArgs, quiet: bool) -> Result<ExitCode> {
    args.validate()?;

    let mut lines = args.lines.clone();
    if args.stdin {
        for line in io::stdin().lock().lines() {
            let line = line.context("Failed to read standard input")?;
            lines.push(line.trim_end().to_string());
        }
        debug!("Read {} lines from standard input", lines.len() - args.lines.len());
    }

    let results = check_lines(&lines);
    let invalid = results.iter().filter(|(_, valid)| !valid).count();

    if !quiet {
        for (line, valid) in &results {
            let status = if *valid {
                "valid".green()
            } else {
                "invalid".red()
            };
            println!("{}\t{}", status, line);
        }
    }

    info!("Checked {} lines, {} invalid", results.len(), invalid);

    Ok(if invalid == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Pair each line with its validity
pub fn check_lines(lines: &[String]) -> Vec<(&str, bool)> {
    lines
        .iter()
        .map(|line| (line.as_str(), is_valid(line)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_lines() {
        let lines = vec![
            "FPUS61 KOKX 171530".to_string(),
            "fpus61 kokx 171530".to_string(),
            "SXUS51 KNYC 041200 (PAA)".to_string(),
        ];

        let results = check_lines(&lines);
        assert_eq!(
            results,
            vec![
                ("FPUS61 KOKX 171530", true),
                ("fpus61 kokx 171530", false),
                ("SXUS51 KNYC 041200 (PAA)", true),
            ]
        );
    }
}
