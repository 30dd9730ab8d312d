//! Segments are the logical data units of a structured input field.
//!
//! A card field owns one segment per [`SegmentKind`] (number, expiry, CVC,
//! postal code) in a fixed declared order. A one-time-code field is made of
//! `OneTimeCodeDigit` slots instead.

use std::fmt;

/// Kind of a logical input segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SegmentKind {
    /// Card number (PAN).
    Number,
    /// Expiration date, stored as up to four raw digits `MMYY`.
    Expiry,
    /// Card security code.
    Cvc,
    /// Billing postal code.
    PostalCode,
    /// A single digit slot of a one-time code.
    OneTimeCodeDigit,
}

impl SegmentKind {
    /// Declared order of the card field segments.
    pub const CARD_ORDER: [SegmentKind; 4] = [
        SegmentKind::Number,
        SegmentKind::Expiry,
        SegmentKind::Cvc,
        SegmentKind::PostalCode,
    ];

    /// Returns true if this segment only ever holds ASCII digits.
    pub fn is_numeric(self) -> bool {
        !matches!(self, SegmentKind::PostalCode)
    }

    /// Position of this kind in [`CARD_ORDER`](Self::CARD_ORDER), if it is a card segment.
    pub fn card_index(self) -> Option<usize> {
        Self::CARD_ORDER.iter().position(|kind| *kind == self)
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SegmentKind::Number => "number",
            SegmentKind::Expiry => "expiry",
            SegmentKind::Cvc => "cvc",
            SegmentKind::PostalCode => "postal code",
            SegmentKind::OneTimeCodeDigit => "one-time code digit",
        };
        f.write_str(name)
    }
}

/// Result of classifying a segment's raw value.
///
/// `Invalid` carries a human-readable reason the host may surface next to
/// the tinted segment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ValidationState {
    /// Not enough input yet to judge.
    #[default]
    Incomplete,
    /// Input is present but breaks a rule.
    Invalid(String),
    /// Input satisfies every rule.
    Valid,
}

impl ValidationState {
    pub fn invalid(reason: impl Into<String>) -> Self {
        ValidationState::Invalid(reason.into())
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationState::Valid)
    }

    #[inline]
    pub fn is_invalid(&self) -> bool {
        matches!(self, ValidationState::Invalid(_))
    }

    /// Reason attached to an `Invalid` state.
    pub fn reason(&self) -> Option<&str> {
        match self {
            ValidationState::Invalid(reason) => Some(reason),
            _ => None,
        }
    }
}

/// One logical unit of structured input.
///
/// Segments are created once with their field and live as long as it does;
/// only `raw_value`, `validation` and `is_focused` change afterwards. The
/// formatted form is always derived from `raw_value` on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    kind: SegmentKind,
    raw_value: String,
    validation: ValidationState,
    is_focused: bool,
}

impl Segment {
    pub fn new(kind: SegmentKind) -> Self {
        Self {
            kind,
            raw_value: String::new(),
            validation: ValidationState::Incomplete,
            is_focused: false,
        }
    }

    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    pub fn raw_value(&self) -> &str {
        &self.raw_value
    }

    pub fn is_empty(&self) -> bool {
        self.raw_value.is_empty()
    }

    pub fn validation(&self) -> &ValidationState {
        &self.validation
    }

    pub fn is_focused(&self) -> bool {
        self.is_focused
    }

    pub fn set_raw_value(&mut self, raw_value: impl Into<String>) {
        self.raw_value = raw_value.into();
    }

    /// Removes and returns the last character of the raw value.
    pub fn pop_char(&mut self) -> Option<char> {
        self.raw_value.pop()
    }

    /// Stores a new validation state, returning true if it differs from the old one.
    pub fn set_validation(&mut self, state: ValidationState) -> bool {
        if self.validation == state {
            return false;
        }
        self.validation = state;
        true
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.is_focused = focused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_order_indices() {
        assert_eq!(SegmentKind::Number.card_index(), Some(0));
        assert_eq!(SegmentKind::PostalCode.card_index(), Some(3));
        assert_eq!(SegmentKind::OneTimeCodeDigit.card_index(), None);
    }

    #[test]
    fn set_validation_reports_changes() {
        let mut segment = Segment::new(SegmentKind::Cvc);
        assert!(!segment.set_validation(ValidationState::Incomplete));
        assert!(segment.set_validation(ValidationState::Valid));
        assert!(!segment.set_validation(ValidationState::Valid));
        assert!(segment.set_validation(ValidationState::invalid("too short")));
        assert_eq!(segment.validation().reason(), Some("too short"));
    }

    #[test]
    fn pop_char_trims_raw_value() {
        let mut segment = Segment::new(SegmentKind::Expiry);
        segment.set_raw_value("1225");
        assert_eq!(segment.pop_char(), Some('5'));
        assert_eq!(segment.raw_value(), "122");
    }
}
