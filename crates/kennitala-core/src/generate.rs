//! # Generation
//!
//! Builds identifiers that always validate. The date and entity type are
//! chosen by the caller; the serial is picked from the entity's range and the
//! check digit is computed from the resulting prefix.
//!
//! Serials run 20-39 for persons and 40-99 for organizations. Within any
//! decade of serials the ten check sums are distinct modulo 11, so at most
//! one serial per decade lacks a check digit. Skipping to the next serial
//! therefore always terminates.
//!
//! Random generation draws a day offset from the requested range rather than
//! listing every date in it.

use std::ops::RangeInclusive;

use chrono::{Datelike, Duration, NaiveDate, Utc};
use rand::Rng;

use crate::century::CenturyPolicy;
use crate::checksum::compute_check_digit;
use crate::error::KennitalaError;
use crate::kennitala::{Kennitala, DIGITS};

/// Serials handed out to persons.
pub const PERSON_SERIALS: RangeInclusive<u8> = 20..=39;

/// Serials handed out to organizations.
pub const ORGANIZATION_SERIALS: RangeInclusive<u8> = 40..=99;

/// The serial range for the requested entity type.
pub fn serial_range(is_person: bool) -> RangeInclusive<u8> {
    if is_person {
        PERSON_SERIALS
    } else {
        ORGANIZATION_SERIALS
    }
}

/// First date of the default random range, 1900-01-01.
pub fn default_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Last date of the default random range: the current UTC calendar date,
/// which is civil time in Iceland.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Generate the identifier for `date` under [`CenturyPolicy::Reference`].
///
/// Deterministic: the lowest usable serial in the entity's range is taken.
pub fn generate(date: NaiveDate, is_person: bool) -> Kennitala {
    generate_with(CenturyPolicy::Reference, date, is_person)
}

/// Generate the identifier for `date`, writing the century marker with
/// `policy`. Deterministic.
pub fn generate_with(policy: CenturyPolicy, date: NaiveDate, is_person: bool) -> Kennitala {
    let range = serial_range(is_person);
    let first = *range.start();
    assemble(policy, date, range, first)
}

/// Like [`generate_with`], but the serial is drawn uniformly from the
/// entity's range.
pub fn generate_with_rng<R: Rng + ?Sized>(
    rng: &mut R,
    policy: CenturyPolicy,
    date: NaiveDate,
    is_person: bool,
) -> Kennitala {
    let range = serial_range(is_person);
    let first = rng.gen_range(range.clone());
    assemble(policy, date, range, first)
}

/// Generate an identifier for a uniformly chosen date in `[start, end]`.
///
/// `start` defaults to [`default_start`] and `end` to [`today`]. Uses the
/// thread-local RNG and [`CenturyPolicy::Reference`].
///
/// # Errors
///
/// Returns [`KennitalaError::InvalidRange`] if `start` is after `end`.
pub fn random(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    is_person: bool,
) -> Result<Kennitala, KennitalaError> {
    random_with(
        &mut rand::thread_rng(),
        CenturyPolicy::Reference,
        start,
        end,
        is_person,
    )
}

/// [`random`] with an injected RNG and century policy.
///
/// When `start == end` no randomness is consumed and the result equals
/// [`generate_with`] for that date.
///
/// Only ranges within [`CenturyPolicy::representable_years`] decode back
/// into `[start, end]`. Outside them the drawn date is encoded like
/// [`generate_with`] does it, so the identifier reads as another century
/// and a leap day may not validate at all.
pub fn random_with<R: Rng + ?Sized>(
    rng: &mut R,
    policy: CenturyPolicy,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    is_person: bool,
) -> Result<Kennitala, KennitalaError> {
    let start = start.unwrap_or_else(default_start);
    let end = end.unwrap_or_else(today);

    if start > end {
        return Err(KennitalaError::InvalidRange { start, end });
    }
    if start == end {
        return Ok(generate_with(policy, start, is_person));
    }

    let span = (end - start).num_days();
    let date = start + Duration::days(rng.gen_range(0..=span));
    Ok(generate_with(policy, date, is_person))
}

/// Fill in date, century, serial, and check digit. Starts at `serial` and
/// advances through `range` (wrapping) until the prefix has a check digit.
fn assemble(
    policy: CenturyPolicy,
    date: NaiveDate,
    range: RangeInclusive<u8>,
    mut serial: u8,
) -> Kennitala {
    let day = date.day() as u8;
    let month = date.month() as u8;
    let year2 = date.year().rem_euclid(100) as u8;

    let mut digits: [u8; DIGITS] = [
        day / 10,
        day % 10,
        month / 10,
        month % 10,
        year2 / 10,
        year2 % 10,
        0,
        0,
        0,
        policy.marker_for(date.year()),
    ];

    let check = loop {
        digits[6] = serial / 10;
        digits[7] = serial % 10;
        if let Some(check) = compute_check_digit(&digits) {
            break check;
        }
        serial = if serial >= *range.end() {
            *range.start()
        } else {
            serial + 1
        };
    };
    digits[8] = check;

    Kennitala::from_digits(digits, policy)
}
