//! WMO Header Library
//!
//! A Rust library for validating and decomposing WMO abbreviated header lines,
//! the `T1T2A1A2ii CCCC DDHHMM [BBB]` headings that prefix weather bulletins
//! on the Global Telecommunication System.
//!
//! This library provides tools for:
//! - Checking a candidate line against the header grammar ([`is_valid`])
//! - Decomposing a header into product, station, time and addendum fields
//! - Deriving product sub-fields (`T1`, `T2`, `A1`, `A2`, `ii`) and the
//!   geographical region designator
//! - Classifying the `BBB` addendum (delayed, correction, amendment, segment)
//! - Locating header lines inside bulletin files and directory trees
//!
//! ```rust
//! use wmo_header::WmoHeader;
//!
//! let header = WmoHeader::parse("SXUS51 KNYC 041200 (PAA)")?;
//! assert_eq!(header.tt(), "SX");
//! assert_eq!(header.region(), Some("US"));
//! assert_eq!(header.addendum(), Some("PAA"));
//! # Ok::<(), wmo_header::WmoError>(())
//! ```

pub mod bulletin;
pub mod config;
pub mod error;
pub mod grammar;
pub mod header;
pub mod models;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use config::ScanConfig;
pub use error::{Result, WmoError};
pub use grammar::{AddendumKind, is_valid};
pub use header::{HeaderField, HeaderSlot, WmoHeader};
pub use models::{HeaderRecord, ScanStats};
