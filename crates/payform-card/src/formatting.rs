//! Formatting engine.
//!
//! `format` turns a canonical raw value into the string shown to the user
//! and `unformat` strips it back. For every valid raw value of a kind,
//! `unformat(kind, &format(kind, raw)) == raw`.

use crate::bin::BinTable;
use crate::brand::CardBrand;
use payform_foundation::SegmentKind;
use smallvec::SmallVec;

pub const NUMBER_GROUP_SEPARATOR: char = ' ';
pub const EXPIRY_SEPARATOR: char = '/';

/// Formats `raw` for display, detecting the card brand from the standard BIN table.
///
/// Hosts with their own brand source use [`format_for_brand`].
pub fn format(kind: SegmentKind, raw: &str) -> String {
    let brand = match kind {
        SegmentKind::Number => BinTable::standard().brand_for(raw),
        _ => CardBrand::Unknown,
    };
    format_for_brand(kind, raw, brand)
}

/// Formats `raw` for display, grouping card numbers for `brand`.
pub fn format_for_brand(kind: SegmentKind, raw: &str, brand: CardBrand) -> String {
    match kind {
        SegmentKind::Number => format_number(raw, brand),
        SegmentKind::Expiry => format_expiry(raw),
        SegmentKind::Cvc | SegmentKind::PostalCode | SegmentKind::OneTimeCodeDigit => {
            raw.to_string()
        }
    }
}

/// Strips display formatting back to the canonical raw value.
pub fn unformat(kind: SegmentKind, display: &str) -> String {
    match kind {
        SegmentKind::PostalCode => display.to_string(),
        _ => display.chars().filter(char::is_ascii_digit).collect(),
    }
}

/// Splits `raw` into display groups for `brand`.
///
/// Digits beyond the brand's grouping pattern form one trailing group.
pub fn number_groups(raw: &str, brand: CardBrand) -> SmallVec<[&str; 6]> {
    let mut groups = SmallVec::new();
    let mut rest = raw;
    for &size in brand.groupings(raw) {
        if rest.is_empty() {
            break;
        }
        let split = size.min(rest.len());
        let (group, tail) = rest.split_at(split);
        groups.push(group);
        rest = tail;
    }
    if !rest.is_empty() {
        groups.push(rest);
    }
    groups
}

/// Groups digits with spaces following the brand's pattern.
///
/// Grouping is recomputed from scratch on every call, so a brand detected
/// mid-entry re-flows the whole number.
pub fn format_number(raw: &str, brand: CardBrand) -> String {
    let groups = number_groups(raw, brand);
    let mut formatted = String::with_capacity(raw.len() + groups.len());
    for (index, group) in groups.iter().enumerate() {
        if index > 0 {
            formatted.push(NUMBER_GROUP_SEPARATOR);
        }
        formatted.push_str(group);
    }
    formatted
}

/// The trailing display group of a number, shown when the number segment is compressed.
pub fn last_number_group(raw: &str, brand: CardBrand) -> &str {
    number_groups(raw, brand).last().copied().unwrap_or("")
}

/// Renders `MMYY` digits as `MM/YY`.
///
/// The separator appears once the month has two digits, so `"1"` renders
/// as `"1"` and `"12"` as `"12/"`.
pub fn format_expiry(raw: &str) -> String {
    match raw.get(..2) {
        Some(month) => {
            let mut formatted = String::with_capacity(raw.len() + 1);
            formatted.push_str(month);
            formatted.push(EXPIRY_SEPARATOR);
            formatted.push_str(&raw[2..]);
            formatted
        }
        None => raw.to_string(),
    }
}

#[cfg(test)]
#[path = "tests/formatting_tests.rs"]
mod tests;
