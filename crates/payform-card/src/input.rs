//! Input filtering applied before validation.
//!
//! Characters outside a segment's character class never reach the
//! validator: pasted separators are stripped and anything past the
//! segment's maximum length is dropped.

use crate::brand::{CardBrand, CvcLength};
use crate::country::PostalPolicy;
use payform_foundation::SegmentKind;

pub const EXPIRY_MAX_LENGTH: usize = 4;
pub const POSTAL_CODE_MAX_LENGTH: usize = 10;

/// Keeps only the characters `kind` accepts. Postal codes are uppercased
/// and filtered as freeform; see [`filter_postal_code`].
pub fn filter_input(kind: SegmentKind, text: &str) -> String {
    if kind.is_numeric() {
        text.chars().filter(char::is_ascii_digit).collect()
    } else {
        filter_postal_code(text, PostalPolicy::Freeform)
    }
}

/// Keeps the postal code characters `policy` accepts.
///
/// Numeric countries keep digits only, so a ZIP+4 typed as `94107-1234`
/// is stored as `941071234`.
pub fn filter_postal_code(text: &str, policy: PostalPolicy) -> String {
    match policy {
        PostalPolicy::Numeric { .. } => text.chars().filter(char::is_ascii_digit).collect(),
        PostalPolicy::Freeform | PostalPolicy::NotRequired => text
            .chars()
            .filter(|ch| ch.is_ascii_alphanumeric() || *ch == ' ' || *ch == '-')
            .map(|ch| ch.to_ascii_uppercase())
            .collect(),
    }
}

/// Longest postal code `policy` accepts.
pub fn postal_code_max_length(policy: PostalPolicy) -> usize {
    match policy {
        PostalPolicy::Numeric { lengths } => lengths
            .iter()
            .copied()
            .max()
            .unwrap_or(POSTAL_CODE_MAX_LENGTH),
        PostalPolicy::Freeform | PostalPolicy::NotRequired => POSTAL_CODE_MAX_LENGTH,
    }
}

/// Appends `incoming` to a postal code under `policy`'s character set and length.
pub fn append_postal_code(current: &str, incoming: &str, policy: PostalPolicy) -> String {
    let filtered = filter_postal_code(incoming, policy);
    let room = postal_code_max_length(policy).saturating_sub(current.chars().count());
    let mut combined = String::with_capacity(current.len() + room);
    combined.push_str(current);
    combined.extend(filtered.chars().take(room));
    combined
}

/// Longest raw value a segment accepts.
pub fn max_length(kind: SegmentKind, brand: CardBrand, cvc: CvcLength) -> usize {
    match kind {
        SegmentKind::Number => brand.max_length(),
        SegmentKind::Expiry => EXPIRY_MAX_LENGTH,
        SegmentKind::Cvc => cvc.max,
        SegmentKind::PostalCode => POSTAL_CODE_MAX_LENGTH,
        SegmentKind::OneTimeCodeDigit => 1,
    }
}

/// Appends filtered `incoming` text to `current`, respecting `max_length`.
///
/// For expiry, a first month digit of 2-9 can only mean a single-digit
/// month, so it is stored zero-padded.
pub fn append_filtered(kind: SegmentKind, current: &str, incoming: &str, max_length: usize) -> String {
    let mut filtered = filter_input(kind, incoming);
    if kind == SegmentKind::Expiry && current.is_empty() {
        if let Some(first @ '2'..='9') = filtered.chars().next() {
            log::trace!("padding single-digit month {first}");
            filtered.insert(0, '0');
        }
    }
    let room = max_length.saturating_sub(current.chars().count());
    let mut combined = String::with_capacity(current.len() + room);
    combined.push_str(current);
    combined.extend(filtered.chars().take(room));
    combined
}
