//! Validators that gate ambiguous pattern matches.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::detect::Candidate;

/// Minimum number of digits in a payment card number.
pub const CARD_MIN_DIGITS: usize = 13;

/// Maximum number of digits in a payment card number.
pub const CARD_MAX_DIGITS: usize = 19;

/// Validate a card number with the Luhn checksum.
///
/// Non-digit characters are ignored. Digit counts outside 13..=19 are
/// rejected, and so is an all-zero run (it has a zero checksum but is a
/// placeholder, not an issued number).
pub fn luhn_check(number: &str) -> bool {
    let digits: Vec<u32> = number.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() < CARD_MIN_DIGITS || digits.len() > CARD_MAX_DIGITS {
        return false;
    }

    if digits.iter().all(|&d| d == 0) {
        return false;
    }

    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();

    sum % 10 == 0
}

/// Text ending in an AT/DE/CH country code and check digits.
static RE_IBAN_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:AT|DE|CH)[0-9]{2} ?$").unwrap());

/// Card rule validator: a Luhn-valid run that is not the body of an IBAN.
pub fn card_candidate(candidate: &Candidate<'_>) -> bool {
    !follows_iban_prefix(candidate) && luhn_check(candidate.as_str())
}

/// Whether a match directly continues an IBAN's country code and check digits.
///
/// `AT61 1904 3002 3457 3201` contains a Luhn-valid 4x4 run right after
/// `AT61 `; that run is the account number, not a card.
fn follows_iban_prefix(candidate: &Candidate<'_>) -> bool {
    RE_IBAN_PREFIX.is_match(candidate.before())
}
