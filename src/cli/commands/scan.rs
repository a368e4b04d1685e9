//! Scan command: locate header lines in bulletin files and directories

use crate::bulletin::{ScanOutcome, scan_paths_with_progress};
use crate::cli::args::{OutputFormat, ScanArgs};
use crate::models::{HeaderRecord, ScanStats};
use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Machine-readable scan output
#[derive(Debug, Serialize)]
pub struct ScanReport {
    pub files: Vec<ScannedFile>,
    pub stats: ScanStats,
}

#[derive(Debug, Serialize)]
pub struct ScannedFile {
    pub path: PathBuf,
    pub line_number: Option<usize>,
    pub header: Option<HeaderRecord>,
}

impl From<&ScanOutcome> for ScannedFile {
    fn from(outcome: &ScanOutcome) -> Self {
        Self {
            path: outcome.path.clone(),
            line_number: outcome.located.as_ref().map(|l| l.line_number),
            header: outcome
                .located
                .as_ref()
                .map(|l| HeaderRecord::from(&l.header)),
        }
    }
}

/// Run the scan command; the exit code fails if any file could not be read
pub fn run_scan(args: &ScanArgs, show_progress: bool) -> Result<ExitCode> {
    let start_time = Instant::now();
    let config = args.to_config();
    debug!("Scan configuration: {:?}", config);

    let progress_bar = if show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {pos} files {msg}")
                .context("Invalid progress template")?,
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let result = scan_paths_with_progress(&args.paths, &config, |path| {
        if let Some(pb) = &progress_bar {
            pb.inc(1);
            pb.set_message(path.display().to_string());
        }
    });

    if let Some(pb) = &progress_bar {
        pb.finish_and_clear();
    }

    let (outcomes, stats) = result.context("Scan failed")?;

    match args.format {
        OutputFormat::Text => {
            println!("{}", render_outcomes(&outcomes));
            if show_progress {
                print_summary(&stats, start_time.elapsed());
            }
        }
        OutputFormat::Json => {
            let report = ScanReport {
                files: outcomes.iter().map(ScannedFile::from).collect(),
                stats: stats.clone(),
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("Failed to serialize scan report")?
            );
        }
    }

    info!("Scan completed in {:.2?}", start_time.elapsed());

    Ok(if stats.error_count() == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// One `path:line<TAB>header` line per file, `path<TAB>-` when none was found
pub fn render_outcomes(outcomes: &[ScanOutcome]) -> String {
    outcomes
        .iter()
        .map(|outcome| match &outcome.located {
            Some(located) => format!(
                "{}:{}\t{}",
                outcome.path.display(),
                located.line_number,
                located.header
            ),
            None => format!("{}\t-", outcome.path.display()),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn print_summary(stats: &ScanStats, elapsed: Duration) {
    eprintln!();
    eprintln!("{}", "Scan summary".bright_green().bold());
    eprintln!("  Files scanned:   {}", stats.files_scanned);
    eprintln!(
        "  Headers found:   {} ({:.1}%)",
        stats.headers_found.to_string().bright_cyan(),
        stats.hit_rate()
    );
    eprintln!("  Without header:  {}", stats.files_without_header);
    if stats.error_count() > 0 {
        eprintln!("  Errors:          {}", stats.error_count().to_string().red());
        for (path, message) in &stats.errors {
            eprintln!("    {}: {}", path.display(), message);
        }
    }
    eprintln!("  Elapsed:         {:.2?}", elapsed);
}
