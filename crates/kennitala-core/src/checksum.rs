//! # Check Digit
//!
//! Position 8 of a kennitala is a weighted mod-11 checksum over positions
//! 0 through 7. The weights are fixed by the registry.
//!
//! A prefix whose weighted sum leaves remainder 1 would need check digit
//! `10`, which cannot be written in a single position. Such prefixes have no
//! check digit at all: [`compute_check_digit`] returns `None`, validation
//! rejects them, and generation moves on to another serial.

/// Per-position weights applied to digits 0 through 7.
pub const WEIGHTS: [u32; 8] = [3, 2, 7, 6, 5, 4, 3, 2];

/// Compute the check digit for the first eight digits of a kennitala.
///
/// Only the first eight entries of `digits` are read; each must be a digit
/// value in `0..=9` (not an ASCII byte). Returns `None` when fewer than
/// eight digits are supplied, when any value is out of range, or when the
/// prefix has no representable check digit.
pub fn compute_check_digit(digits: &[u8]) -> Option<u8> {
    let prefix = digits.get(..WEIGHTS.len())?;
    if prefix.iter().any(|d| *d > 9) {
        return None;
    }

    let sum: u32 = prefix
        .iter()
        .zip(WEIGHTS)
        .map(|(d, w)| u32::from(*d) * w)
        .sum();

    match sum % 11 {
        0 => Some(0),
        1 => None,
        r => Some((11 - r) as u8),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(s: &str) -> Vec<u8> {
        s.bytes().map(|b| b - b'0').collect()
    }

    #[test]
    fn known_check_digits() {
        // 140543-3229
        assert_eq!(compute_check_digit(&digits("14054332")), Some(2));
        // 120375-3509
        assert_eq!(compute_check_digit(&digits("12037535")), Some(0));
    }

    #[test]
    fn remainder_zero_gives_zero() {
        assert_eq!(compute_check_digit(&digits("00000000")), Some(0));
        // 3*1 + 2*0 + 7*0 + 6*0 + 5*0 + 4*0 + 3*0 + 2*4 = 11
        assert_eq!(compute_check_digit(&digits("10000004")), Some(0));
    }

    #[test]
    fn remainder_one_has_no_check_digit() {
        // 2*6 = 12, remainder 1
        assert_eq!(compute_check_digit(&digits("00000006")), None);
    }

    #[test]
    fn extra_digits_are_ignored() {
        assert_eq!(compute_check_digit(&digits("1405433229")), Some(2));
    }

    #[test]
    fn short_input_is_rejected() {
        assert_eq!(compute_check_digit(&digits("1405433")), None);
        assert_eq!(compute_check_digit(&[]), None);
    }

    #[test]
    fn non_digit_values_are_rejected() {
        assert_eq!(compute_check_digit(&[1, 4, 0, 5, 4, 3, 3, 10]), None);
    }

    #[test]
    fn result_is_always_single_digit() {
        for n in 0u32..100_000 {
            let s = format!("{n:08}");
            if let Some(c) = compute_check_digit(&digits(&s)) {
                assert!(c <= 9, "prefix {s} produced {c}");
            }
        }
    }
}
