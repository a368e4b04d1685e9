//! Configuration for bulletin scanning.
//!
//! Controls how far into a bulletin the header line is searched for, which
//! files are picked up when walking directories, and how read failures are
//! handled.

use crate::error::{Result, WmoError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Number of leading lines searched for the header by default.
///
/// Covers the SOH character, the transmission sequence number and a few
/// blank lines ahead of the abbreviated heading.
pub const DEFAULT_MAX_SCAN_LINES: usize = 8;

/// Settings for locating header lines in bulletin files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Maximum number of leading lines searched per bulletin
    pub max_scan_lines: usize,

    /// Remove leading ASCII control characters (SOH, etx) before matching
    pub strip_control_chars: bool,

    /// Glob pattern applied to file names found while walking directories
    pub file_pattern: String,

    /// Keep scanning after a file cannot be read
    pub continue_on_error: bool,

    /// Follow symbolic links while walking directories
    pub follow_links: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_scan_lines: DEFAULT_MAX_SCAN_LINES,
            strip_control_chars: true,
            file_pattern: "*".to_string(),
            continue_on_error: true,
            follow_links: false,
        }
    }
}

impl ScanConfig {
    /// Set the number of leading lines searched
    pub fn with_max_scan_lines(mut self, max_scan_lines: usize) -> Self {
        self.max_scan_lines = max_scan_lines;
        self
    }

    /// Set the file name pattern used when walking directories
    pub fn with_file_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.file_pattern = pattern.into();
        self
    }

    /// Stop at the first unreadable file
    pub fn with_fail_fast(mut self) -> Self {
        self.continue_on_error = false;
        self
    }

    /// Match lines exactly as read, without stripping control characters
    pub fn without_control_stripping(mut self) -> Self {
        self.strip_control_chars = false;
        self
    }

    pub fn with_follow_links(mut self) -> Self {
        self.follow_links = true;
        self
    }

    /// Check the configuration for unusable values
    pub fn validate(&self) -> Result<()> {
        if self.max_scan_lines == 0 {
            return Err(WmoError::configuration(
                "max_scan_lines must be greater than 0",
            ));
        }

        self.file_glob()?;

        debug!("Scan configuration validated: {:?}", self);
        Ok(())
    }

    /// Compile the file name pattern
    pub fn file_glob(&self) -> Result<glob::Pattern> {
        glob::Pattern::new(&self.file_pattern).map_err(|e| {
            WmoError::configuration(format!(
                "Invalid file pattern '{}': {}",
                self.file_pattern, e
            ))
        })
    }
}
