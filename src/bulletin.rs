//! Locating abbreviated header lines inside bulletins.
//!
//! A bulletin as received from a GTS or EMWIN feed may start with a
//! transmission preamble (SOH, a three digit sequence number, blank lines)
//! before the abbreviated heading. Only the first few lines are searched,
//! and each candidate line is stripped of trailing whitespace and carriage
//! returns before being matched against the header grammar.

use crate::config::ScanConfig;
use crate::error::{Result, WmoError};
use crate::header::WmoHeader;
use crate::models::ScanStats;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Bytes buffered per bulletin line; the longest valid header is 25 bytes.
pub const MAX_LINE_BYTES: u64 = 256;

/// A header line found in a bulletin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    /// 1-based line number of the header within the bulletin
    pub line_number: usize,
    pub header: WmoHeader,
}

/// Result of scanning a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    pub path: PathBuf,
    pub located: Option<Located>,
}

/// Search the leading lines of bulletin text for a header line
pub fn find_header(text: &str, config: &ScanConfig) -> Option<Located> {
    text.lines()
        .take(config.max_scan_lines)
        .enumerate()
        .find_map(|(index, line)| match_line(line, config).map(|header| Located {
            line_number: index + 1,
            header,
        }))
}

/// Search the leading lines of a bulletin file for a header line.
///
/// Only the first `max_scan_lines` lines are read, and at most
/// [`MAX_LINE_BYTES`] of each line is buffered; invalid UTF-8 is replaced
/// rather than rejected.
pub fn scan_file(path: &Path, config: &ScanConfig) -> Result<Option<Located>> {
    let file = File::open(path).map_err(|e| WmoError::io(path, e))?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();

    for line_num in 0..config.max_scan_lines {
        buf.clear();
        let read = (&mut reader)
            .take(MAX_LINE_BYTES)
            .read_until(b'\n', &mut buf)
            .map_err(|e| WmoError::io(path, e))?;
        if read == 0 {
            break;
        }

        if buf.last() != Some(&b'\n') && read as u64 == MAX_LINE_BYTES {
            // Too long for a header; discard the rest of the line unbuffered
            reader
                .skip_until(b'\n')
                .map_err(|e| WmoError::io(path, e))?;
            continue;
        }

        let line = String::from_utf8_lossy(&buf);
        if let Some(header) = match_line(&line, config) {
            debug!(
                "Found header '{}' in {} at line {}",
                header,
                path.display(),
                line_num + 1
            );
            return Ok(Some(Located {
                line_number: line_num + 1,
                header,
            }));
        }
    }

    debug!("No header within first {} lines of {}", config.max_scan_lines, path.display());
    Ok(None)
}

/// Scan files and directory trees for bulletin headers
pub fn scan_paths(paths: &[PathBuf], config: &ScanConfig) -> Result<(Vec<ScanOutcome>, ScanStats)> {
    scan_paths_with_progress(paths, config, |_| {})
}

/// Scan files and directory trees, reporting each file before it is read.
///
/// Directories are walked recursively and filtered by the configured file
/// pattern; explicitly named files are always scanned. Unreadable files are
/// recorded in the statistics, or abort the scan when `continue_on_error` is
/// disabled.
pub fn scan_paths_with_progress<F>(
    paths: &[PathBuf],
    config: &ScanConfig,
    mut on_file: F,
) -> Result<(Vec<ScanOutcome>, ScanStats)>
where
    F: FnMut(&Path),
{
    config.validate()?;

    let mut outcomes = Vec::new();
    let mut stats = ScanStats::default();

    for file in collect_files(paths, config, &mut stats)? {
        on_file(&file);

        match scan_file(&file, config) {
            Ok(located) => {
                stats.files_scanned += 1;
                if located.is_some() {
                    stats.headers_found += 1;
                } else {
                    stats.files_without_header += 1;
                }
                outcomes.push(ScanOutcome {
                    path: file,
                    located,
                });
            }
            Err(e) => {
                if !config.continue_on_error {
                    return Err(e);
                }
                warn!("Skipping unreadable file: {}", e);
                stats.errors.push((file, e.to_string()));
            }
        }
    }

    info!(
        "Scanned {} files: {} headers found, {} without header, {} errors",
        stats.files_scanned,
        stats.headers_found,
        stats.files_without_header,
        stats.error_count()
    );

    Ok((outcomes, stats))
}

/// Expand the input paths into the list of files to scan
fn collect_files(
    paths: &[PathBuf],
    config: &ScanConfig,
    stats: &mut ScanStats,
) -> Result<Vec<PathBuf>> {
    let pattern = config.file_glob()?;
    let mut files = Vec::new();

    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }

        for entry in WalkDir::new(path)
            .follow_links(config.follow_links)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let failed_path = e.path().map_or_else(|| path.clone(), Path::to_path_buf);
                    let error = WmoError::io(failed_path.clone(), std::io::Error::from(e));
                    if !config.continue_on_error {
                        return Err(error);
                    }
                    warn!("Skipping unreadable directory entry: {}", error);
                    stats.errors.push((failed_path, error.to_string()));
                    continue;
                }
            };

            let matches = entry
                .file_name()
                .to_str()
                .is_some_and(|name| pattern.matches(name));
            if entry.file_type().is_file() && matches {
                files.push(entry.into_path());
            }
        }
    }

    debug!("Collected {} files to scan", files.len());
    Ok(files)
}

fn match_line(line: &str, config: &ScanConfig) -> Option<WmoHeader> {
    let mut candidate = line.trim_end();
    if config.strip_control_chars {
        candidate = candidate.trim_start_matches(|c: char| c.is_ascii_control());
    }
    WmoHeader::parse(candidate).ok()
}
