//! Serializable views of headers and scan statistics.
//!
//! Defines the flattened header record used for JSON output and the
//! counters reported after scanning bulletin files.

use crate::grammar::AddendumKind;
use crate::header::WmoHeader;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Every field of a [`WmoHeader`], with absent values as `None`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderRecord {
    pub raw: String,
    pub product: String,
    pub station: String,
    pub time: String,
    pub addendum: Option<String>,
    pub addendum_kind: Option<AddendumKind>,
    pub region: Option<String>,
    pub t1: String,
    pub t2: String,
    pub t1t2: String,
    pub a1: String,
    pub a2: String,
    pub a1a2: String,
    pub ii: String,
}

impl From<&WmoHeader> for HeaderRecord {
    fn from(header: &WmoHeader) -> Self {
        Self {
            raw: header.raw().to_string(),
            product: header.product().to_string(),
            station: header.station().to_string(),
            time: header.time().to_string(),
            addendum: header.addendum().map(str::to_string),
            addendum_kind: header.addendum_kind(),
            region: header.region().map(str::to_string),
            t1: header.t1().to_string(),
            t2: header.t2().to_string(),
            t1t2: header.t1t2().to_string(),
            a1: header.a1().to_string(),
            a2: header.a2().to_string(),
            a1a2: header.a1a2().to_string(),
            ii: header.ii().to_string(),
        }
    }
}

/// Counters collected while scanning bulletin files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// Number of files read
    pub files_scanned: usize,
    /// Files in which a header line was found
    pub headers_found: usize,
    /// Files read successfully but without a header line
    pub files_without_header: usize,
    /// Files that could not be read
    pub errors: Vec<(PathBuf, String)>,
}

impl ScanStats {
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Fraction of scanned files with a header, in percent
    pub fn hit_rate(&self) -> f64 {
        if self.files_scanned == 0 {
            0.0
        } else {
            self.headers_found as f64 / self.files_scanned as f64 * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_record_from_header() {
        let header = WmoHeader::parse("SXUS51 KNYC 041200 (CCA)").unwrap();
        let record = HeaderRecord::from(&header);

        assert_eq!(record.product, "SXUS51");
        assert_eq!(record.addendum.as_deref(), Some("CCA"));
        assert_eq!(record.addendum_kind, Some(AddendumKind::Correction));
        assert_eq!(record.region.as_deref(), Some("US"));
        assert_eq!(record.ii, "51");
    }

    #[test]
    fn test_header_record_serializes_absent_fields_as_null() {
        let header = WmoHeader::parse("TTAA00 EGRR 011200").unwrap();
        let json = serde_json::to_value(HeaderRecord::from(&header)).unwrap();

        assert!(json["addendum"].is_null());
        assert!(json["region"].is_null());
        assert_eq!(json["tt"], serde_json::Value::Null);
        assert_eq!(json["t1t2"], "TT");
    }

    #[test]
    fn test_scan_stats_hit_rate() {
        let mut stats = ScanStats::default();
        assert_eq!(stats.hit_rate(), 0.0);

        stats.files_scanned = 4;
        stats.headers_found = 3;
        assert_eq!(stats.hit_rate(), 75.0);
    }
}
