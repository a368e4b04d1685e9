//! Lexical grammar of the WMO abbreviated header line.
//!
//! ```text
//! HEADER   := PRODUCT " " STATION " " TIME [ " " ADDENDUM ]
//! PRODUCT  := LETTER{4} DIGIT{1,2}
//! STATION  := LETTER{3,4}
//! TIME     := DIGIT{4,6}
//! ADDENDUM := "(" CODE ")" | CODE
//! CODE     := ("AA"|"CC"|"RR"|"P" LETTER[A-X]) LETTER[A-X] | "COR"
//! ```
//!
//! Only uppercase ASCII letters and ASCII digits are accepted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

// `\d` is Unicode-aware in the regex crate, so digits are spelled out.
static HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z]{4}[0-9]{1,2} [A-Z]{3,4} [0-9]{4,6}( \(?((AA|CC|RR|P[A-X])[A-X]|COR)\)?)?$")
        .expect("Invalid WMO header regex")
});

/// Letters of `t1` for which `a1a2` designates a geographical area.
pub const REGION_T1: [char; 11] = ['A', 'B', 'C', 'E', 'F', 'M', 'N', 'R', 'S', 'W', 'V'];

/// Check whether `text` is a structurally valid WMO abbreviated header line.
///
/// The caller is expected to have stripped trailing newlines and whitespace.
pub fn is_valid(text: &str) -> bool {
    HEADER_REGEX.is_match(text)
}

/// Strip one enclosing parenthesis pair from an addendum token.
///
/// The grammar allows each parenthesis independently, so a lone leading or
/// trailing parenthesis is removed as well.
pub fn normalize_addendum(token: &str) -> &str {
    let token = token.strip_prefix('(').unwrap_or(token);
    token.strip_suffix(')').unwrap_or(token)
}

/// Whether a `t1` designator carries a geographical area in `a1a2`.
pub fn has_region(t1: &str) -> bool {
    let mut chars = t1.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => REGION_T1.contains(&c),
        _ => false,
    }
}

/// Meaning of the BBB addendum group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddendumKind {
    /// `RRx`: delayed routine bulletin
    Delayed,
    /// `CCx` or `COR`: correction to a previous bulletin
    Correction,
    /// `AAx`: amendment to a previous bulletin
    Amendment,
    /// `Pxx`: segment of a bulletin split for transmission
    Segment,
}

impl AddendumKind {
    /// Classify a normalized addendum code, returning its kind and sequence letters.
    ///
    /// `COR` carries no sequence. For segments both letters after `P` form the
    /// sequence. Sequence letters outside `A`-`X` are rejected.
    pub fn classify(code: &str) -> Option<(Self, Option<&str>)> {
        if code == "COR" {
            return Some((Self::Correction, None));
        }
        if code.len() != 3 || !code.is_ascii() {
            return None;
        }

        let (prefix, sequence) = code.split_at(2);
        let (kind, sequence) = match prefix {
            "RR" => (Self::Delayed, sequence),
            "CC" => (Self::Correction, sequence),
            "AA" => (Self::Amendment, sequence),
            _ if prefix.starts_with('P') => (Self::Segment, &code[1..]),
            _ => return None,
        };

        if !sequence.bytes().all(|b| (b'A'..=b'X').contains(&b)) {
            return None;
        }
        Some((kind, Some(sequence)))
    }
}

impl fmt::Display for AddendumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Delayed => "delayed",
            Self::Correction => "correction",
            Self::Amendment => "amendment",
            Self::Segment => "segment",
        };
        f.write_str(name)
    }
}
