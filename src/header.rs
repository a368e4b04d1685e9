//! WMO abbreviated header decomposition.
//!
//! A header line such as `SXUS51 KNYC 041200 (PAA)` is split into its
//! product designator (`T1T2A1A2ii`), originating station (`CCCC`), issue
//! time (`DDHHMM`) and optional addendum (`BBB`). Product sub-fields and the
//! geographical region are derived from the product designator by fixed
//! character offsets.

use crate::error::{Result, WmoError};
use crate::grammar::{self, AddendumKind};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// A validated, decomposed WMO abbreviated header
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WmoHeader {
    raw: String,
    product: String,
    station: String,
    time: String,
    addendum: Option<String>,
}

impl WmoHeader {
    /// Parse a raw header line.
    ///
    /// The line must already be stripped of trailing newline and whitespace.
    pub fn parse(raw: &str) -> Result<Self> {
        if !grammar::is_valid(raw) {
            return Err(WmoError::invalid_header(raw));
        }

        // The grammar guarantees three or four single-space separated parts
        let mut parts = raw.splitn(4, ' ');
        let product = parts.next().unwrap_or_default().to_string();
        let station = parts.next().unwrap_or_default().to_string();
        let time = parts.next().unwrap_or_default().to_string();
        let addendum = parts
            .next()
            .map(|token| grammar::normalize_addendum(token).to_string());

        Ok(Self {
            raw: raw.to_string(),
            product,
            station,
            time,
            addendum,
        })
    }

    /// Build a header from its explicit fields.
    ///
    /// The canonical line is synthesized as `product station time`, followed by
    /// ` (addendum)` when an addendum is given, and then validated like any raw
    /// line. Each field must decompose back to itself, so a value containing a
    /// space cannot spill into the neighbouring fields.
    pub fn from_fields(
        product: &str,
        station: &str,
        time: &str,
        addendum: Option<&str>,
    ) -> Result<Self> {
        let raw = match addendum {
            Some(bbb) => format!("{product} {station} {time} ({bbb})"),
            None => format!("{product} {station} {time}"),
        };
        let header = Self::parse(&raw)?;

        if header.product != product
            || header.station != station
            || header.time != time
            || header.addendum() != addendum
        {
            return Err(WmoError::invalid_header(raw));
        }
        Ok(header)
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Product designator `T1T2A1A2ii`
    pub fn product(&self) -> &str {
        &self.product
    }

    /// Originating station `CCCC`
    pub fn station(&self) -> &str {
        &self.station
    }

    /// Issue time `DDHHMM`, verbatim
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Addendum code without parentheses, if present
    pub fn addendum(&self) -> Option<&str> {
        self.addendum.as_deref()
    }

    /// Alias for [`WmoHeader::addendum`]
    pub fn bbb(&self) -> Option<&str> {
        self.addendum()
    }

    pub fn t1(&self) -> &str {
        self.product_slice(0, 1)
    }

    pub fn t2(&self) -> &str {
        self.product_slice(1, 2)
    }

    /// Data type designator, `T1T2`
    pub fn t1t2(&self) -> &str {
        self.product_slice(0, 2)
    }

    /// Alias for [`WmoHeader::t1t2`]
    pub fn tt(&self) -> &str {
        self.t1t2()
    }

    pub fn a1(&self) -> &str {
        self.product_slice(2, 3)
    }

    pub fn a2(&self) -> &str {
        self.product_slice(3, 4)
    }

    /// Area or data type designator, `A1A2`
    pub fn a1a2(&self) -> &str {
        self.product_slice(2, 4)
    }

    pub fn ii(&self) -> &str {
        self.product_slice(4, 6)
    }

    /// Geographical area designator.
    ///
    /// Only defined when `T1` is one of the data types whose `A1A2` designates
    /// an area; `None` otherwise.
    pub fn region(&self) -> Option<&str> {
        grammar::has_region(self.t1()).then(|| self.a1a2())
    }

    /// Classification of the addendum group
    pub fn addendum_kind(&self) -> Option<AddendumKind> {
        self.addendum()
            .and_then(AddendumKind::classify)
            .map(|(kind, _)| kind)
    }

    /// Sequence letters of the addendum (`A` for the first correction, etc.)
    pub fn addendum_sequence(&self) -> Option<&str> {
        self.addendum()
            .and_then(AddendumKind::classify)
            .and_then(|(_, sequence)| sequence)
    }

    /// Whether both headers carry the same product designator
    pub fn same_product(&self, other: &WmoHeader) -> bool {
        self.product == other.product
    }

    /// Read a field by name.
    ///
    /// Optional fields return `None` when absent; product sub-fields are always
    /// present but may be empty.
    pub fn field(&self, field: HeaderField) -> Option<&str> {
        match field {
            HeaderField::Raw => Some(self.raw()),
            HeaderField::Product => Some(self.product()),
            HeaderField::Station => Some(self.station()),
            HeaderField::Time => Some(self.time()),
            HeaderField::Addendum | HeaderField::Bbb => self.addendum(),
            HeaderField::Region => self.region(),
            HeaderField::T1 => Some(self.t1()),
            HeaderField::T2 => Some(self.t2()),
            HeaderField::T1t2 | HeaderField::Tt => Some(self.t1t2()),
            HeaderField::A1 => Some(self.a1()),
            HeaderField::A2 => Some(self.a2()),
            HeaderField::A1a2 => Some(self.a1a2()),
            HeaderField::Ii => Some(self.ii()),
        }
    }

    // Offsets past the end of the product clamp to its length.
    fn product_slice(&self, start: usize, end: usize) -> &str {
        let len = self.product.len();
        self.product
            .get(start.min(len)..end.min(len))
            .unwrap_or_default()
    }
}

impl fmt::Display for WmoHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for WmoHeader {
    type Err = WmoError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for WmoHeader {
    type Error = WmoError;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl TryFrom<String> for WmoHeader {
    type Error = WmoError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

/// Named fields of a [`WmoHeader`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderField {
    Raw,
    Product,
    Station,
    Time,
    Addendum,
    Bbb,
    Region,
    T1,
    T2,
    T1t2,
    Tt,
    A1,
    A2,
    A1a2,
    Ii,
}

impl HeaderField {
    /// Every field, aliases included
    pub const ALL: [HeaderField; 15] = [
        Self::Raw,
        Self::Product,
        Self::Station,
        Self::Time,
        Self::Addendum,
        Self::Bbb,
        Self::Region,
        Self::T1,
        Self::T2,
        Self::T1t2,
        Self::Tt,
        Self::A1,
        Self::A2,
        Self::A1a2,
        Self::Ii,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Product => "product",
            Self::Station => "station",
            Self::Time => "time",
            Self::Addendum => "addendum",
            Self::Bbb => "bbb",
            Self::Region => "region",
            Self::T1 => "t1",
            Self::T2 => "t2",
            Self::T1t2 => "t1t2",
            Self::Tt => "tt",
            Self::A1 => "a1",
            Self::A2 => "a2",
            Self::A1a2 => "a1a2",
            Self::Ii => "ii",
        }
    }
}

impl fmt::Display for HeaderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HeaderField {
    type Err = WmoError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| WmoError::UnknownField {
                name: s.to_string(),
            })
    }
}

/// A header value that can be populated exactly once.
///
/// The slot starts [`HeaderSlot::Empty`] and moves to [`HeaderSlot::Set`] on
/// the first successful assignment; there is no way back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HeaderSlot {
    #[default]
    Empty,
    Set(WmoHeader),
}

impl HeaderSlot {
    pub fn new() -> Self {
        Self::Empty
    }

    /// Assign the raw header line.
    ///
    /// Fails with [`WmoError::AlreadySet`] if the slot is populated, and with
    /// [`WmoError::InvalidHeader`] if the line is invalid; the slot is left
    /// unchanged in both cases.
    pub fn assign(&mut self, raw: &str) -> Result<()> {
        if let Self::Set(current) = self {
            debug!("Rejecting reassignment of header '{}' to '{}'", current, raw);
            return Err(WmoError::AlreadySet {
                current: current.raw().to_string(),
            });
        }

        *self = Self::Set(WmoHeader::parse(raw)?);
        Ok(())
    }

    /// Set a field by name; only [`HeaderField::Raw`] is writable.
    pub fn set_field(&mut self, field: HeaderField, value: &str) -> Result<()> {
        match field {
            HeaderField::Raw => self.assign(value),
            other => Err(WmoError::ReadOnlyField {
                field: other.name().to_string(),
            }),
        }
    }

    pub fn get(&self) -> Option<&WmoHeader> {
        match self {
            Self::Set(header) => Some(header),
            Self::Empty => None,
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Self::Set(_))
    }

    pub fn into_inner(self) -> Option<WmoHeader> {
        match self {
            Self::Set(header) => Some(header),
            Self::Empty => None,
        }
    }
}

impl From<WmoHeader> for HeaderSlot {
    fn from(header: WmoHeader) -> Self {
        Self::Set(header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_without_addendum() {
        let header = WmoHeader::parse("FPUS61 KOKX 171530").unwrap();

        assert_eq!(header.raw(), "FPUS61 KOKX 171530");
        assert_eq!(header.product(), "FPUS61");
        assert_eq!(header.station(), "KOKX");
        assert_eq!(header.time(), "171530");
        assert_eq!(header.addendum(), None);
        assert_eq!(header.t1(), "F");
        assert_eq!(header.t2(), "P");
        assert_eq!(header.t1t2(), "FP");
        assert_eq!(header.tt(), "FP");
        assert_eq!(header.a1(), "U");
        assert_eq!(header.a2(), "S");
        assert_eq!(header.a1a2(), "US");
        assert_eq!(header.ii(), "61");
    }

    #[test]
    fn test_parse_parenthesized_addendum() {
        let header = WmoHeader::parse("SXUS51 KNYC 041200 (PAA)").unwrap();

        assert_eq!(header.addendum(), Some("PAA"));
        assert_eq!(header.bbb(), Some("PAA"));
        assert_eq!(header.t1(), "S");
        assert_eq!(header.region(), Some("US"));
        assert_eq!(header.addendum_kind(), Some(AddendumKind::Segment));
        assert_eq!(header.addendum_sequence(), Some("AA"));
    }

    #[test]
    fn test_parse_bare_addendum() {
        let header = WmoHeader::parse("SXUS51 KNYC 041200 RRB").unwrap();

        assert_eq!(header.addendum(), Some("RRB"));
        assert_eq!(header.addendum_kind(), Some(AddendumKind::Delayed));
        assert_eq!(header.addendum_sequence(), Some("B"));
    }

    #[test]
    fn test_parse_rejects_lowercase() {
        let err = WmoHeader::parse("fpus61 kokx 171530").unwrap_err();
        match err {
            WmoError::InvalidHeader { header } => assert_eq!(header, "fpus61 kokx 171530"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_short_product_decomposes() {
        let header = WmoHeader::parse("WWUS1 KOKX 1715").unwrap();

        assert_eq!(header.product(), "WWUS1");
        assert_eq!(header.a1a2(), "US");
        assert_eq!(header.ii(), "1");
        assert_eq!(header.region(), Some("US"));
    }

    #[test]
    fn test_product_slice_past_end_is_empty() {
        let header = WmoHeader {
            raw: String::new(),
            product: "FP".to_string(),
            station: String::new(),
            time: String::new(),
            addendum: None,
        };

        assert_eq!(header.t1t2(), "FP");
        assert_eq!(header.a1(), "");
        assert_eq!(header.a1a2(), "");
        assert_eq!(header.ii(), "");
        assert_eq!(header.region(), Some(""));
    }

    #[test]
    fn test_region_absent_for_non_area_types() {
        let header = WmoHeader::parse("TTAA00 EGRR 011200").unwrap();
        assert_eq!(header.region(), None);
        assert_eq!(header.field(HeaderField::Region), None);
    }

    #[test]
    fn test_from_fields() {
        let header = WmoHeader::from_fields("FPUS51", "KNYC", "041200", Some("PAA")).unwrap();
        assert_eq!(header.raw(), "FPUS51 KNYC 041200 (PAA)");
        assert_eq!(header.addendum(), Some("PAA"));

        let header = WmoHeader::from_fields("FPUS51", "KNYC", "041200", None).unwrap();
        assert_eq!(header.raw(), "FPUS51 KNYC 041200");
    }

    #[test]
    fn test_from_fields_rejects_inconsistent_fields() {
        assert!(WmoHeader::from_fields("FPUS51", "KNYC", "041200", Some("XYZ")).is_err());
        assert!(WmoHeader::from_fields("FPUS51 KNYC", "KNYC", "041200", None).is_err());
        // Already parenthesized addendum would be double-wrapped
        assert!(WmoHeader::from_fields("FPUS51", "KNYC", "041200", Some("(PAA)")).is_err());
    }

    #[test]
    fn test_from_fields_rejects_field_spilling_into_neighbours() {
        let err = WmoHeader::from_fields("FPUS61", "KOKX 171530", "RRA", None).unwrap_err();
        match err {
            WmoError::InvalidHeader { header } => assert_eq!(header, "FPUS61 KOKX 171530 RRA"),
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(WmoHeader::from_fields("FPUS61", "KOKX", "171530 RRA", None).is_err());
    }

    #[test]
    fn test_slot_from_header_is_populated() {
        let header = WmoHeader::parse("FPUS61 KOKX 171530").unwrap();
        let mut slot = HeaderSlot::from(header.clone());

        assert!(slot.is_set());
        assert_eq!(slot.get(), Some(&header));
        assert!(matches!(
            slot.assign("SXUS51 KNYC 041200"),
            Err(WmoError::AlreadySet { .. })
        ));
    }

    #[test]
    fn test_same_product() {
        let a = WmoHeader::parse("FPUS61 KOKX 171530").unwrap();
        let b = WmoHeader::parse("FPUS61 KNYC 041200 (CCA)").unwrap();
        let c = WmoHeader::parse("FPUS62 KOKX 171530").unwrap();

        assert!(a.same_product(&b));
        assert!(!a.same_product(&c));
        assert_ne!(a, b);
    }

    #[test]
    fn test_field_lookup() {
        let header = WmoHeader::parse("SXUS51 KNYC 041200 (PAA)").unwrap();

        assert_eq!(header.field(HeaderField::Tt), Some("SX"));
        assert_eq!(header.field(HeaderField::Bbb), Some("PAA"));
        assert_eq!(header.field(HeaderField::Ii), Some("51"));
        assert_eq!("A1A2".parse::<HeaderField>().unwrap(), HeaderField::A1a2);
        assert!(matches!(
            "cccc".parse::<HeaderField>(),
            Err(WmoError::UnknownField { .. })
        ));
    }

    #[test]
    fn test_slot_assign_once() {
        let mut slot = HeaderSlot::new();
        assert!(!slot.is_set());

        slot.assign("FPUS61 KOKX 171530").unwrap();
        let err = slot.assign("SXUS51 KNYC 041200").unwrap_err();

        assert!(matches!(err, WmoError::AlreadySet { ref current } if current == "FPUS61 KOKX 171530"));
        assert_eq!(slot.get().unwrap().raw(), "FPUS61 KOKX 171530");
    }

    #[test]
    fn test_slot_invalid_assignment_leaves_slot_empty() {
        let mut slot = HeaderSlot::new();
        assert!(slot.assign("not a header").is_err());
        assert_eq!(slot, HeaderSlot::Empty);

        slot.assign("FPUS61 KOKX 171530").unwrap();
        assert!(slot.is_set());
    }

    #[test]
    fn test_slot_set_field() {
        let mut slot = HeaderSlot::new();

        let err = slot.set_field(HeaderField::Region, "US").unwrap_err();
        assert!(matches!(err, WmoError::ReadOnlyField { ref field } if field == "region"));
        assert!(!slot.is_set());

        slot.set_field(HeaderField::Raw, "FPUS61 KOKX 171530").unwrap();
        assert_eq!(slot.into_inner().unwrap().product(), "FPUS61");
    }
}
