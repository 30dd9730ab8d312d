//! Segment validator.
//!
//! Every function here is pure: the same raw value and context always give
//! the same [`ValidationState`]. Cross-segment inputs (the detected brand
//! for CVC length, the country for postal rules, whether BIN metadata is
//! loaded, the BIN table issued lengths come from) arrive through
//! [`ValidationContext`].

use crate::bin::BinTable;
use crate::brand::{CardBrand, CvcLength, MAX_CARD_NUMBER_LENGTH};
use crate::country::PostalPolicy;
use chrono::Datelike;
use payform_foundation::{SegmentKind, ValidationState};

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub const fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// The current month in the local time zone.
    pub fn current() -> Self {
        let today = chrono::Local::now().date_naive();
        Self::new(today.year(), today.month())
    }
}

/// Cross-segment data a validation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationContext {
    /// Brand detected for the number segment.
    pub brand: CardBrand,
    /// Whether BIN metadata for the number's prefix is available.
    pub metadata_loaded: bool,
    pub postal_policy: PostalPolicy,
    pub today: YearMonth,
    /// Configured CVC maximum, raising the brand maximum.
    pub cvc_max_override: Option<usize>,
    pub bin_table: BinTable,
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self {
            brand: CardBrand::Unknown,
            metadata_loaded: true,
            postal_policy: PostalPolicy::Freeform,
            today: YearMonth::current(),
            cvc_max_override: None,
            bin_table: BinTable::standard(),
        }
    }
}

impl ValidationContext {
    pub fn with_brand(mut self, brand: CardBrand) -> Self {
        self.brand = brand;
        self
    }

    pub fn with_metadata_loaded(mut self, loaded: bool) -> Self {
        self.metadata_loaded = loaded;
        self
    }

    pub fn with_postal_policy(mut self, policy: PostalPolicy) -> Self {
        self.postal_policy = policy;
        self
    }

    pub fn with_today(mut self, today: YearMonth) -> Self {
        self.today = today;
        self
    }

    pub fn with_cvc_max_override(mut self, max: Option<usize>) -> Self {
        self.cvc_max_override = max;
        self
    }

    pub fn with_bin_table(mut self, table: BinTable) -> Self {
        self.bin_table = table;
        self
    }

    /// CVC lengths accepted for the current brand and configuration.
    pub fn cvc_length(&self) -> CvcLength {
        self.brand
            .cvc_length()
            .with_max_override(self.cvc_max_override)
    }
}

/// Segments whose validity depends on `kind`, in the order they are re-validated.
pub fn dependents(kind: SegmentKind) -> &'static [SegmentKind] {
    match kind {
        SegmentKind::Number => &[SegmentKind::Cvc],
        _ => &[],
    }
}

/// Classifies `raw` for the given segment kind.
pub fn validate(kind: SegmentKind, raw: &str, context: &ValidationContext) -> ValidationState {
    match kind {
        SegmentKind::Number => validate_number(raw, context),
        SegmentKind::Expiry => validate_expiry(raw, context.today),
        SegmentKind::Cvc => validate_cvc(raw, context.cvc_length()),
        SegmentKind::PostalCode => validate_postal_code(raw, context.postal_policy),
        SegmentKind::OneTimeCodeDigit => validate_one_time_code_digit(raw),
    }
}

fn is_digits(raw: &str) -> bool {
    raw.bytes().all(|b| b.is_ascii_digit())
}

/// Mod-10 checksum over an all-digit string.
pub fn luhn_valid(digits: &str) -> bool {
    let mut sum = 0;
    for (position, byte) in digits.bytes().rev().enumerate() {
        if !byte.is_ascii_digit() {
            return false;
        }
        let mut digit = u32::from(byte - b'0');
        if position % 2 == 1 {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
    }
    sum % 10 == 0
}

pub fn validate_number(raw: &str, context: &ValidationContext) -> ValidationState {
    if raw.is_empty() {
        return ValidationState::Incomplete;
    }
    if !is_digits(raw) {
        return ValidationState::invalid("card number must contain only digits");
    }
    if raw.len() > MAX_CARD_NUMBER_LENGTH {
        return ValidationState::invalid("card number is too long");
    }

    let table = &context.bin_table;
    let brand = context.brand;
    if brand == CardBrand::Unknown {
        if table.possible_brands(raw).is_empty() {
            return ValidationState::invalid("card number is not recognized");
        }
        return ValidationState::Incomplete;
    }

    let lengths = table.issued_lengths(raw, brand);
    let max_length = lengths.last().copied().unwrap_or(MAX_CARD_NUMBER_LENGTH);
    if raw.len() > max_length {
        return ValidationState::invalid("card number is too long");
    }
    if !lengths.contains(&raw.len()) {
        return ValidationState::Incomplete;
    }
    if !luhn_valid(raw) {
        return if raw.len() == max_length {
            ValidationState::invalid("card number is invalid")
        } else {
            ValidationState::Incomplete
        };
    }
    if !context.metadata_loaded {
        log::trace!("number passes checks but BIN metadata is not loaded yet");
        return ValidationState::Incomplete;
    }
    ValidationState::Valid
}

/// Validates up to four raw digits `MMYY` against `today`.
pub fn validate_expiry(raw: &str, today: YearMonth) -> ValidationState {
    if raw.is_empty() {
        return ValidationState::Incomplete;
    }
    if !is_digits(raw) {
        return ValidationState::invalid("expiration date must contain only digits");
    }
    if raw.len() > 4 {
        return ValidationState::invalid("expiration date is too long");
    }

    let digits: Vec<u32> = raw.bytes().map(|b| u32::from(b - b'0')).collect();
    if digits.len() == 1 {
        return if digits[0] <= 1 {
            ValidationState::Incomplete
        } else {
            ValidationState::invalid("expiration month is invalid")
        };
    }

    let month = digits[0] * 10 + digits[1];
    if !(1..=12).contains(&month) {
        return ValidationState::invalid("expiration month is invalid");
    }

    let current_two_digit_year = today.year.rem_euclid(100);
    match digits.len() {
        2 => ValidationState::Incomplete,
        3 => {
            let current_decade = (current_two_digit_year / 10) as u32;
            if digits[2] < current_decade {
                ValidationState::invalid("expiration year is in the past")
            } else {
                ValidationState::Incomplete
            }
        }
        _ => {
            let two_digit_year = (digits[2] * 10 + digits[3]) as i32;
            let year = today.year - current_two_digit_year + two_digit_year;
            if YearMonth::new(year, month) < today {
                ValidationState::invalid("card has expired")
            } else {
                ValidationState::Valid
            }
        }
    }
}

pub fn validate_cvc(raw: &str, length: CvcLength) -> ValidationState {
    if raw.is_empty() {
        return ValidationState::Incomplete;
    }
    if !is_digits(raw) {
        return ValidationState::invalid("security code must contain only digits");
    }
    if raw.len() > length.max {
        return ValidationState::invalid("security code is too long");
    }
    if raw.len() < length.min {
        return ValidationState::Incomplete;
    }
    ValidationState::Valid
}

pub fn validate_postal_code(raw: &str, policy: PostalPolicy) -> ValidationState {
    match policy {
        PostalPolicy::NotRequired => ValidationState::Valid,
        PostalPolicy::Freeform => {
            if raw.trim().is_empty() {
                ValidationState::Incomplete
            } else {
                ValidationState::Valid
            }
        }
        PostalPolicy::Numeric { lengths } => {
            if raw.is_empty() {
                return ValidationState::Incomplete;
            }
            if !is_digits(raw) {
                return ValidationState::invalid("postal code must contain only digits");
            }
            if lengths.contains(&raw.len()) {
                return ValidationState::Valid;
            }
            let max = lengths.iter().copied().max().unwrap_or(0);
            if raw.len() > max {
                ValidationState::invalid("postal code is too long")
            } else {
                ValidationState::Incomplete
            }
        }
    }
}

pub fn validate_one_time_code_digit(raw: &str) -> ValidationState {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (None, _) => ValidationState::Incomplete,
        (Some(ch), None) if ch.is_ascii_digit() => ValidationState::Valid,
        (Some(_), None) => ValidationState::invalid("code digit must be numeric"),
        (Some(_), Some(_)) => ValidationState::invalid("code slot holds a single digit"),
    }
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
