//! # Century Markers
//!
//! The last digit of a kennitala selects the century of the two-digit year
//! in positions 4 and 5. How that digit is read is a policy decision:
//!
//! - [`CenturyPolicy::Reference`] accepts `9` and `0` only. `9` means the
//!   1900s and every other accepted marker means the 2000s. Generation writes
//!   `0` when the decimal year starts with `2` and `9` otherwise. This is the
//!   default and matches long-standing library behaviour.
//! - [`CenturyPolicy::Registry`] additionally accepts `8` for the 1800s, as
//!   the national registry does for people born before 1900.
//!
//! Markers outside the accepted set make an identifier invalid under either
//! policy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rule set for reading and writing the century marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CenturyPolicy {
    /// `9` → 1900s, `0` → 2000s.
    #[default]
    Reference,
    /// `8` → 1800s, `9` → 1900s, `0` → 2000s.
    Registry,
}

/// A century policy name that is neither `reference` nor `registry`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown century policy '{0}': expected 'reference' or 'registry'")]
pub struct UnknownCenturyPolicy(pub String);

impl CenturyPolicy {
    /// All policies, in declaration order.
    pub const ALL: [CenturyPolicy; 2] = [CenturyPolicy::Reference, CenturyPolicy::Registry];

    /// Returns the policy name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reference => "reference",
            Self::Registry => "registry",
        }
    }

    /// Returns true if `marker` is an accepted century digit.
    pub fn recognizes(&self, marker: u8) -> bool {
        match self {
            Self::Reference => matches!(marker, 0 | 9),
            Self::Registry => matches!(marker, 0 | 8 | 9),
        }
    }

    /// Resolve the full year from a century marker and a two-digit year.
    ///
    /// Returns `None` if the marker is not accepted by this policy.
    pub fn full_year(&self, marker: u8, year2: u8) -> Option<i32> {
        if !self.recognizes(marker) {
            return None;
        }
        let century = match (*self, marker) {
            (_, 9) => 1900,
            (Self::Registry, 8) => 1800,
            _ => 2000,
        };
        Some(century + i32::from(year2))
    }

    /// The century marker written when generating an identifier for `year`.
    ///
    /// Years the policy cannot represent still get a marker; the resulting
    /// identifier decodes to a different century, and fails validation when
    /// that century lacks the date (1600-02-29 reads back as 1900-02-29).
    pub fn marker_for(&self, year: i32) -> u8 {
        match self {
            Self::Registry if (1800..=1899).contains(&year) => 8,
            _ => {
                if year.to_string().starts_with('2') {
                    0
                } else {
                    9
                }
            }
        }
    }

    /// The inclusive range of years that survive a generate/decode round trip.
    pub fn representable_years(&self) -> std::ops::RangeInclusive<i32> {
        match self {
            Self::Reference => 1900..=2099,
            Self::Registry => 1800..=2099,
        }
    }
}

impl std::fmt::Display for CenturyPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CenturyPolicy {
    type Err = UnknownCenturyPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCenturyPolicy(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_reference() {
        assert_eq!(CenturyPolicy::default(), CenturyPolicy::Reference);
    }

    #[test]
    fn reference_markers() {
        let p = CenturyPolicy::Reference;
        assert_eq!(p.full_year(9, 43), Some(1943));
        assert_eq!(p.full_year(0, 5), Some(2005));
        assert_eq!(p.full_year(8, 43), None);
        for marker in 1..=8 {
            assert!(!p.recognizes(marker), "marker {marker}");
        }
    }

    #[test]
    fn registry_markers() {
        let p = CenturyPolicy::Registry;
        assert_eq!(p.full_year(8, 99), Some(1899));
        assert_eq!(p.full_year(9, 0), Some(1900));
        assert_eq!(p.full_year(0, 99), Some(2099));
        assert_eq!(p.full_year(7, 10), None);
    }

    #[test]
    fn reference_encoding_follows_leading_digit() {
        let p = CenturyPolicy::Reference;
        assert_eq!(p.marker_for(1975), 9);
        assert_eq!(p.marker_for(2024), 0);
        // Outside 1900-2099 the leading digit still decides.
        assert_eq!(p.marker_for(1850), 9);
        assert_eq!(p.marker_for(2150), 0);
        assert_eq!(p.marker_for(3001), 9);
    }

    #[test]
    fn registry_encoding_covers_1800s() {
        let p = CenturyPolicy::Registry;
        assert_eq!(p.marker_for(1800), 8);
        assert_eq!(p.marker_for(1899), 8);
        assert_eq!(p.marker_for(1900), 9);
        assert_eq!(p.marker_for(2000), 0);
    }

    #[test]
    fn encode_decode_agree_on_representable_years() {
        for policy in CenturyPolicy::ALL {
            for year in policy.representable_years() {
                let marker = policy.marker_for(year);
                let year2 = (year % 100) as u8;
                assert_eq!(policy.full_year(marker, year2), Some(year), "{policy} {year}");
            }
        }
    }

    #[test]
    fn parse_names() {
        assert_eq!("reference".parse::<CenturyPolicy>(), Ok(CenturyPolicy::Reference));
        assert_eq!("Registry".parse::<CenturyPolicy>(), Ok(CenturyPolicy::Registry));
        assert!("iso".parse::<CenturyPolicy>().is_err());
    }

    #[test]
    fn display_roundtrip() {
        for policy in CenturyPolicy::ALL {
            assert_eq!(policy.to_string().parse::<CenturyPolicy>(), Ok(policy));
        }
    }

    #[test]
    fn serde_lowercase() {
        let json = serde_json::to_string(&CenturyPolicy::Registry).unwrap();
        assert_eq!(json, "\"registry\"");
        let parsed: CenturyPolicy = serde_json::from_str("\"reference\"").unwrap();
        assert_eq!(parsed, CenturyPolicy::Reference);
    }
}
