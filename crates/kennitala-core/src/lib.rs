//! # kennitala-core: Icelandic National Registry Identifiers
//!
//! Parses, validates, and generates the 10-digit *kennitala* issued by the
//! Icelandic national registry to persons and organizations.
//!
//! ## Key Design Principles
//!
//! 1. **Total construction.** [`Kennitala::new`] accepts any text, including
//!    empty or absent input. Validity is derived on demand, so untrusted data
//!    can be wrapped first and checked later.
//!
//! 2. **Two error kinds.** Accessors that need a valid identifier return
//!    [`KennitalaError::Invalid`]; range-based generation returns
//!    [`KennitalaError::InvalidRange`]. Validation itself returns `bool` and
//!    `Display` never fails.
//!
//! 3. **Century policy is explicit.** The trailing century marker is read
//!    through a [`CenturyPolicy`]. The default reproduces the established
//!    `9` → 1900s / otherwise 2000s reading; [`CenturyPolicy::Registry`]
//!    adds the registry's `8` → 1800s marker.
//!
//! 4. **Generation always validates.** Serials whose prefix has no check
//!    digit are skipped, never emitted.
//!
//! ## Crate Policy
//!
//! - No I/O and no logging; callers decide how to report.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//!
//! ```
//! use chrono::NaiveDate;
//! use kennitala_core::{generate, is_valid, Kennitala};
//!
//! assert!(is_valid("140543-3229"));
//!
//! let date = NaiveDate::from_ymd_opt(1975, 3, 12).unwrap();
//! let kt = generate(date, true);
//! assert_eq!(kt.birth_date().unwrap(), date);
//! assert_eq!(kt.is_person().unwrap(), true);
//! ```

pub mod century;
pub mod checksum;
pub mod error;
pub mod generate;
pub mod kennitala;

use chrono::NaiveDate;

// Re-export primary types for ergonomic imports.
pub use century::{CenturyPolicy, UnknownCenturyPolicy};
pub use checksum::compute_check_digit;
pub use error::KennitalaError;
pub use generate::{generate, generate_with, generate_with_rng, random, random_with};
pub use kennitala::{EntityType, Kennitala};

/// Returns true if `text` is a valid kennitala under the default policy.
///
/// Absent or empty input is simply invalid.
pub fn is_valid<'a>(text: impl Into<Option<&'a str>>) -> bool {
    Kennitala::from(text.into()).validate()
}

/// The birth or registration date encoded in `text`.
///
/// # Errors
///
/// Returns [`KennitalaError::Invalid`] if `text` does not validate.
pub fn to_date(text: &str) -> Result<NaiveDate, KennitalaError> {
    Kennitala::new(text).birth_date()
}

/// Returns true if `text` belongs to a person rather than an organization.
///
/// # Errors
///
/// Returns [`KennitalaError::Invalid`] if `text` does not validate.
pub fn is_personal(text: &str) -> Result<bool, KennitalaError> {
    Kennitala::new(text).is_person()
}
