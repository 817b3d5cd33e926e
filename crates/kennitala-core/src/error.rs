//! # Error Types
//!
//! The codec has exactly two failure modes. Malformed input is never an
//! error at construction time: it surfaces as [`KennitalaError::Invalid`]
//! only when a caller asks for something that requires a valid identifier.
//! Validity checks themselves return `bool` and never fail.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors produced by the kennitala codec.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KennitalaError {
    /// The identifier failed validation (shape, century marker, calendar
    /// date, or check digit).
    #[error("invalid kennitala")]
    Invalid,

    /// A random-generation date range was empty.
    #[error("invalid range: start {start} is after end {end}")]
    InvalidRange {
        /// Requested first date.
        start: NaiveDate,
        /// Requested last date.
        end: NaiveDate,
    },
}

impl KennitalaError {
    /// Returns true if this error reports an invalid identifier.
    pub fn is_invalid(&self) -> bool {
        matches!(self, KennitalaError::Invalid)
    }

    /// Returns true if this error reports an empty date range.
    pub fn is_range_error(&self) -> bool {
        matches!(self, KennitalaError::InvalidRange { .. })
    }
}
