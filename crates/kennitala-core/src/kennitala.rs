//! # The Kennitala Value Type
//!
//! A [`Kennitala`] wraps the text it was built from and never rejects it.
//! Construction runs only the shape parser (six digits, an optional single
//! non-digit separator, four digits) and keeps the extracted digits. Every
//! other fact (validity, birth date, entity type, canonical forms) is derived
//! on demand, so untrusted input can be wrapped first and judged later.
//!
//! ## Layout
//!
//! ```text
//! DD MM YY SS C M
//! |  |  |  |  | `- century marker (see `CenturyPolicy`)
//! |  |  |  |  `--- check digit over the first eight digits
//! |  |  |  `------ serial; first digit 0-3 is a person, 4-9 an organization
//! |  |  `--------- two-digit year
//! |  `------------ month
//! `--------------- day
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::century::CenturyPolicy;
use crate::checksum::compute_check_digit;
use crate::error::KennitalaError;

/// Number of digits in a kennitala.
pub const DIGITS: usize = 10;

/// Position the separator occupies in the 11-character form.
pub const SEPARATOR_POSITION: usize = 6;

/// Separator written by [`Kennitala::with_separator`].
pub const CANONICAL_SEPARATOR: char = '-';

/// Text rendered by `Display` for identifiers that do not validate.
pub const INVALID_DISPLAY: &str = "Invalid kennitala";

/// Whether a kennitala belongs to a natural person or to an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    /// Serial starts with 0-3.
    Person,
    /// Serial starts with 4-9 (companies, institutions, associations).
    Organization,
}

impl EntityType {
    /// Classify by the first digit of the serial field.
    pub fn from_serial_digit(digit: u8) -> Self {
        if digit <= 3 {
            Self::Person
        } else {
            Self::Organization
        }
    }

    /// Returns the lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Organization => "organization",
        }
    }

    /// Returns true for [`EntityType::Person`].
    pub fn is_person(&self) -> bool {
        matches!(self, Self::Person)
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An Icelandic national registry identifier.
///
/// Built from arbitrary text without failing. Use [`Kennitala::validate`] to
/// test it, or any of the extracting accessors, which return
/// [`KennitalaError::Invalid`] when it does not validate.
///
/// # Examples
///
/// ```
/// use kennitala_core::Kennitala;
///
/// let kt = Kennitala::new("1405433229");
/// assert!(kt.validate());
/// assert_eq!(kt.with_separator().unwrap(), "140543-3229");
/// assert_eq!(kt.to_string(), "140543-3229");
///
/// let bad = Kennitala::new("not a kennitala");
/// assert!(!bad.validate());
/// assert_eq!(bad.to_string(), "Invalid kennitala");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Kennitala {
    raw: String,
    digits: Option<[u8; DIGITS]>,
    policy: CenturyPolicy,
}

impl Kennitala {
    /// Wrap `raw` under the default [`CenturyPolicy::Reference`].
    pub fn new(raw: impl Into<String>) -> Self {
        Self::with_policy(raw, CenturyPolicy::default())
    }

    /// Wrap `raw`, reading the century marker with `policy`.
    pub fn with_policy(raw: impl Into<String>, policy: CenturyPolicy) -> Self {
        let raw = raw.into();
        let digits = parse_shape(&raw);
        Self { raw, digits, policy }
    }

    /// Build from already-assembled digit values, rendered without separator.
    pub(crate) fn from_digits(digits: [u8; DIGITS], policy: CenturyPolicy) -> Self {
        Self {
            raw: render(&digits, None),
            digits: Some(digits),
            policy,
        }
    }

    /// The text this value was built from, unchanged.
    pub fn as_raw(&self) -> &str {
        &self.raw
    }

    /// The century policy used to read this identifier.
    pub fn century_policy(&self) -> CenturyPolicy {
        self.policy
    }

    /// Returns true if the identifier is well-formed, has an accepted century
    /// marker, encodes a real calendar date, and carries the right check digit.
    pub fn validate(&self) -> bool {
        self.decode().is_some()
    }

    /// The encoded birth date (or registration date for organizations).
    pub fn birth_date(&self) -> Result<NaiveDate, KennitalaError> {
        self.decode()
            .map(|(_, date)| date)
            .ok_or(KennitalaError::Invalid)
    }

    /// Returns true if the identifier belongs to a person.
    pub fn is_person(&self) -> Result<bool, KennitalaError> {
        self.entity_type().map(|t| t.is_person())
    }

    /// Person or organization, from the first serial digit.
    pub fn entity_type(&self) -> Result<EntityType, KennitalaError> {
        let (digits, _) = self.decode().ok_or(KennitalaError::Invalid)?;
        Ok(EntityType::from_serial_digit(digits[SEPARATOR_POSITION]))
    }

    /// The check digit at position 8.
    pub fn check_digit(&self) -> Result<u8, KennitalaError> {
        let (digits, _) = self.decode().ok_or(KennitalaError::Invalid)?;
        Ok(digits[8])
    }

    /// The ten digits with any separator removed.
    pub fn digits_only(&self) -> Result<String, KennitalaError> {
        let (digits, _) = self.decode().ok_or(KennitalaError::Invalid)?;
        Ok(render(digits, None))
    }

    /// The canonical 11-character form, `DDMMYY-SSCM`.
    pub fn with_separator(&self) -> Result<String, KennitalaError> {
        let (digits, _) = self.decode().ok_or(KennitalaError::Invalid)?;
        Ok(render(digits, Some(CANONICAL_SEPARATOR)))
    }

    /// Shape, century, calendar, and checksum checks in one pass.
    fn decode(&self) -> Option<(&[u8; DIGITS], NaiveDate)> {
        let d = self.digits.as_ref()?;
        let year = self.policy.full_year(d[9], pair(d[4], d[5]))?;
        let date = NaiveDate::from_ymd_opt(
            year,
            u32::from(pair(d[2], d[3])),
            u32::from(pair(d[0], d[1])),
        )?;
        if compute_check_digit(d)? != d[8] {
            return None;
        }
        Some((d, date))
    }
}

fn pair(tens: u8, ones: u8) -> u8 {
    tens * 10 + ones
}

fn render(digits: &[u8; DIGITS], separator: Option<char>) -> String {
    let mut out = String::with_capacity(DIGITS + 1);
    for (pos, d) in digits.iter().enumerate() {
        if pos == SEPARATOR_POSITION {
            if let Some(sep) = separator {
                out.push(sep);
            }
        }
        out.push(char::from(b'0' + d));
    }
    out
}

/// Extract ten digit values from `DDMMYYSSCM` or `DDMMYY?SSCM`, where `?` is
/// any single non-digit character.
fn parse_shape(raw: &str) -> Option<[u8; DIGITS]> {
    let mut digits = [0u8; DIGITS];
    let mut count = 0;
    for (pos, c) in raw.chars().enumerate() {
        match c.to_digit(10) {
            Some(d) => {
                *digits.get_mut(count)? = d as u8;
                count += 1;
            }
            // Only one separator can sit at position 6, since a second
            // non-digit would leave `count` behind `pos`.
            None if pos == SEPARATOR_POSITION && count == SEPARATOR_POSITION => {}
            None => return None,
        }
    }
    (count == DIGITS).then_some(digits)
}

impl std::fmt::Display for Kennitala {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.with_separator() {
            Ok(dashed) => f.write_str(&dashed),
            Err(_) => f.write_str(INVALID_DISPLAY),
        }
    }
}

/// Strict parsing: unlike [`Kennitala::new`], rejects identifiers that do not
/// validate.
impl std::str::FromStr for Kennitala {
    type Err = KennitalaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kt = Self::new(s);
        if kt.validate() {
            Ok(kt)
        } else {
            Err(KennitalaError::Invalid)
        }
    }
}

impl From<&str> for Kennitala {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for Kennitala {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

/// Absent input becomes an identifier that never validates.
impl From<Option<&str>> for Kennitala {
    fn from(raw: Option<&str>) -> Self {
        Self::new(raw.unwrap_or_default())
    }
}

impl Serialize for Kennitala {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.raw)
    }
}

/// Deserializes leniently, like [`Kennitala::new`]: any string is accepted
/// and validity is checked later.
impl<'de> Deserialize<'de> for Kennitala {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::new(raw))
    }
}
